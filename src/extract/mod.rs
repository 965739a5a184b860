// src/extract/mod.rs

//! Job posting extraction from a parsed page.
//!
//! - `field`: one element's cleaned text
//! - `text`: visible text of a container
//! - `jsonld`: linked-data metadata
//! - `record`: assembly into a [`JobRecord`](crate::models::JobRecord)

pub mod field;
pub mod jsonld;
pub mod record;
pub mod text;

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};

pub use field::{FieldKind, extract_field};
pub use jsonld::read_structured_data;
pub use record::{DirectFields, PageContext, assemble, assemble_at};
pub use text::{collect_visible_text, normalize_whitespace};

use crate::error::Result;
use crate::models::{ExtractionConfig, ExtractionResult, StructuredJobData};

static PAGE_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("title selector"));

static SITE_HEADER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("header").expect("header selector"));

/// Compiled selectors for one page template.
#[derive(Debug, Clone)]
struct FieldSelectors {
    root: Selector,
    title: Selector,
    location: Selector,
    time: Selector,
    requisition: Selector,
    description: Selector,
    about_company: Selector,
}

/// Extracts job records from pages of a single template.
#[derive(Debug, Clone)]
pub struct PageExtractor {
    config: ExtractionConfig,
    selectors: FieldSelectors,
}

impl PageExtractor {
    /// Compile the configured identifiers into selectors.
    pub fn new(config: ExtractionConfig) -> Result<Self> {
        let selectors = FieldSelectors {
            root: config.selector_for(&config.root_id)?,
            title: config.selector_for(&config.title_id)?,
            location: config.selector_for(&config.location_id)?,
            time: config.selector_for(&config.time_id)?,
            requisition: config.selector_for(&config.requisition_id)?,
            description: config.selector_for(&config.description_id)?,
            about_company: config.selector_for(&config.about_company_id)?,
        };
        Ok(Self { config, selectors })
    }

    /// Extract a job record from `document`, stamped with the current time.
    pub fn extract(&self, document: &Html, page_url: &str) -> ExtractionResult {
        self.extract_at(document, page_url, Utc::now())
    }

    /// Extract a job record from `document`.
    ///
    /// Fails without reading anything else when the root job container is
    /// missing.
    pub fn extract_at(
        &self,
        document: &Html,
        page_url: &str,
        scraped_at: DateTime<Utc>,
    ) -> ExtractionResult {
        let Some(container) = document.select(&self.selectors.root).next() else {
            log::debug!("No {} container on {}", self.config.root_id, page_url);
            return ExtractionResult::failure(format!(
                "{} not found. Make sure you are on a {} job posting page.",
                self.config.root_id, self.config.platform
            ));
        };

        let direct = self.direct_fields(document, container);
        let structured = self.structured_data(document);
        let page = PageContext {
            url: page_url,
            platform: &self.config.platform,
        };

        ExtractionResult::Success(assemble_at(direct, structured, page, scraped_at))
    }

    /// Linked-data metadata from anywhere in the document.
    ///
    /// A record with nothing usable in it counts as absent.
    pub fn structured_data(&self, document: &Html) -> Option<StructuredJobData> {
        let data = read_structured_data(document, &self.config.jsonld_type)
            .filter(|data| !data.is_empty());
        if data.is_none() {
            log::debug!("No usable {} linked data found", self.config.jsonld_type);
        }
        data
    }

    fn direct_fields(&self, document: &Html, container: ElementRef<'_>) -> DirectFields {
        let s = &self.selectors;

        DirectFields {
            job_title: extract_field(container, &s.title, FieldKind::Title),
            location: extract_field(container, &s.location, FieldKind::Location),
            employment_type: extract_field(container, &s.time, FieldKind::Time),
            job_id: extract_field(container, &s.requisition, FieldKind::Requisition),
            about_company: extract_field(container, &s.about_company, FieldKind::Plain),
            header: page_header(document),
            description: container
                .select(&s.description)
                .next()
                .map(collect_visible_text)
                .filter(|text| !text.is_empty()),
        }
    }
}

/// The page's `<title>`, or the site banner when the title is empty.
fn page_header(document: &Html) -> Option<String> {
    let root = document.root_element();

    // <title> lives in <head>, which never renders, so read its raw text.
    root.select(&PAGE_TITLE)
        .next()
        .and_then(|title| text::clean(&title.text().collect::<String>()))
        .or_else(|| {
            root.select(&SITE_HEADER)
                .next()
                .and_then(text::rendered_text)
        })
}
