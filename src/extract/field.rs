// src/extract/field.rs

//! Single-field extraction with per-field cleanup.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Selector};

use super::text::{clean, rendered_text};

static REQUISITION_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*job\s+requisition\s+id\s*:?").expect("requisition label pattern")
});

static LOCATION_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*locations?\s*:").expect("location label pattern"));

static VALUE_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("dd").expect("value cell selector"));

/// Cleanup rule applied to a field's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Title or header: whitespace only
    Title,
    /// Strips a leading `Location:` label
    Location,
    /// Reads the value cell of a label/value pair
    Time,
    /// Strips a leading `Job Requisition ID` label
    Requisition,
    /// Whitespace only
    Plain,
}

/// Find the first element matching `selector` under `scope` and return its
/// cleaned text.
///
/// A missing element and an element with no visible text both yield `None`.
pub fn extract_field(scope: ElementRef<'_>, selector: &Selector, kind: FieldKind) -> Option<String> {
    let element = scope.select(selector).next()?;

    let text = match kind {
        FieldKind::Time => element
            .select(&VALUE_CELL)
            .find_map(rendered_text)
            .or_else(|| rendered_text(element))?,
        _ => rendered_text(element)?,
    };

    let text = match kind {
        FieldKind::Requisition => REQUISITION_LABEL.replace(&text, "").into_owned(),
        FieldKind::Location => LOCATION_LABEL.replace(&text, "").into_owned(),
        FieldKind::Title | FieldKind::Time | FieldKind::Plain => text,
    };

    clean(&text)
}
