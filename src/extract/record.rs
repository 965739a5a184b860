// src/extract/record.rs

//! Job record assembly.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::{JobRecord, RawFields, StructuredJobData};

/// Values read straight from the page's job container.
#[derive(Debug, Default, Clone)]
pub struct DirectFields {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub job_id: Option<String>,
    pub about_company: Option<String>,
    pub header: Option<String>,
    pub description: Option<String>,
}

/// Page-level values that do not come from the markup.
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    pub url: &'a str,
    pub platform: &'a str,
}

/// Combine direct and linked-data values into a record stamped now.
pub fn assemble(
    direct: DirectFields,
    structured: Option<StructuredJobData>,
    page: PageContext<'_>,
) -> JobRecord {
    assemble_at(direct, structured, page, Utc::now())
}

/// Combine direct and linked-data values into a record stamped `scraped_at`.
///
/// Direct values win; linked data only fills fields the page left empty.
pub fn assemble_at(
    direct: DirectFields,
    structured: Option<StructuredJobData>,
    page: PageContext<'_>,
    scraped_at: DateTime<Utc>,
) -> JobRecord {
    let structured = structured.unwrap_or_default();

    JobRecord::from_raw(RawFields {
        job_title: direct.job_title,
        location: direct.location.or(structured.location),
        employment_type: direct.employment_type.or(structured.employment_type),
        job_id: direct.job_id,
        about_company: direct.about_company,
        header: direct.header,
        company_name: structured.company_name,
        company_url: structured.company_url,
        full_job_description: direct.description,
        url: Some(page.url.to_string()),
        scraped_at: Some(scraped_at.to_rfc3339_opts(SecondsFormat::Millis, true)),
        platform: Some(page.platform.to_string()),
    })
}
