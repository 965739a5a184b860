// src/extract/text.rs

//! Visible-text collection.
//!
//! A parsed document has no computed style, so visibility is read from
//! markup: the `hidden` attribute, inline `display`/`visibility` and
//! elements that never render.

use scraper::{ElementRef, node::Element};

/// Elements whose content is never rendered.
const NON_RENDERED: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line in rendered text.
const BLOCK_LEVEL: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

/// Collapse whitespace runs to single spaces and trim the edges.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize text, treating an empty result as absent.
pub fn clean(s: &str) -> Option<String> {
    let cleaned = normalize_whitespace(s);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Visible text of every text node under `container`, one trimmed node per line.
pub fn collect_visible_text(container: ElementRef<'_>) -> String {
    let mut parts = Vec::new();

    for node in (*container).descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        if node.parent().and_then(ElementRef::wrap).is_some_and(is_visible) {
            parts.push(trimmed);
        }
    }

    parts.join("\n").trim().to_string()
}

/// Rendered text of an element on a single line.
///
/// Hidden descendants are skipped and block boundaries become spaces.
pub fn rendered_text(element: ElementRef<'_>) -> Option<String> {
    if !is_visible(element) {
        return None;
    }

    let mut raw = String::new();
    for node in (*element).descendants() {
        match node.value() {
            scraper::Node::Element(el) if BLOCK_LEVEL.contains(&el.name()) => raw.push(' '),
            scraper::Node::Text(text) => {
                if node.parent().and_then(ElementRef::wrap).is_some_and(is_visible) {
                    raw.push_str(text);
                }
            }
            _ => {}
        }
    }

    clean(&raw)
}

/// Whether an element would be rendered.
///
/// `display:none` anywhere up the tree hides the subtree. `visibility` is
/// inherited, so the nearest element declaring it decides.
pub fn is_visible(element: ElementRef<'_>) -> bool {
    let mut visibility_decided = false;

    for node in std::iter::once(*element).chain((*element).ancestors()) {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        let value = el.value();

        if hides_subtree(value) {
            return false;
        }

        if !visibility_decided {
            if let Some(visibility) = style_property(value, "visibility") {
                visibility_decided = true;
                if visibility == "hidden" || visibility == "collapse" {
                    return false;
                }
            }
        }
    }

    true
}

fn hides_subtree(el: &Element) -> bool {
    NON_RENDERED.contains(&el.name())
        || el.attr("hidden").is_some()
        || style_property(el, "display").as_deref() == Some("none")
}

/// Value of one inline style property, lowercased and without `!important`.
fn style_property(el: &Element, property: &str) -> Option<String> {
    let style = el.attr("style")?;

    // Later declarations win, as in CSS.
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| {
            value
                .trim()
                .trim_end_matches("!important")
                .trim()
                .to_ascii_lowercase()
        })
        .last()
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    fn first<'a>(document: &'a Html, css: &str) -> ElementRef<'a> {
        let selector = Selector::parse(css).unwrap();
        document.select(&selector).next().unwrap()
    }

    #[test]
    fn test_normalize_whitespace() {
        assert_eq!(normalize_whitespace("  Senior   Engineer \n"), "Senior Engineer");
        assert_eq!(normalize_whitespace("a\u{a0}\tb"), "a b");
        assert_eq!(clean(" \n\t "), None);
    }

    #[test]
    fn test_collect_keeps_document_order() {
        let document = Html::parse_document(
            r#"<div id="c"><p>First <b>bold</b> line</p>
               <ul><li> One </li><li>Two</li></ul></div>"#,
        );
        let text = collect_visible_text(first(&document, "#c"));
        assert_eq!(text, "First\nbold\nline\nOne\nTwo");
    }

    #[test]
    fn test_collect_skips_hidden() {
        let document = Html::parse_document(
            r#"<div id="c">
                <p>Shown</p>
                <p style="display: none">Gone <span>nested gone</span></p>
                <div style="visibility:hidden">Invisible
                    <span style="visibility: visible">Back again</span>
                </div>
                <p hidden>Attr hidden</p>
                <script>var x = 1;</script>
                <style>.a { color: red }</style>
                <p style="color: red; DISPLAY: None !important">Loud gone</p>
            </div>"#,
        );
        let text = collect_visible_text(first(&document, "#c"));
        assert_eq!(text, "Shown\nBack again");
    }

    #[test]
    fn test_display_none_not_overridden_by_child() {
        let document = Html::parse_document(
            r#"<div id="c"><div style="display:none"><p style="display:block">No</p></div>Yes</div>"#,
        );
        assert_eq!(collect_visible_text(first(&document, "#c")), "Yes");
    }

    #[test]
    fn test_rendered_text_separates_blocks() {
        let document = Html::parse_document(
            r#"<div id="c"><dt>Time Type</dt><dd>Full   time</dd><span hidden>x</span></div>"#,
        );
        assert_eq!(
            rendered_text(first(&document, "#c")).as_deref(),
            Some("Time Type Full time")
        );
    }

    #[test]
    fn test_rendered_text_of_hidden_element() {
        let document = Html::parse_document(r#"<p id="c" style="display:none">x</p>"#);
        assert_eq!(rendered_text(first(&document, "#c")), None);
    }
}
