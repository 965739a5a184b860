//! Job record and extraction result.

use serde::Serialize;

/// Placeholder for any field the page did not provide.
pub const NOT_FOUND: &str = "Not found";

/// A normalized job posting scraped from a single page.
///
/// Every field is populated; missing values hold [`NOT_FOUND`].
/// Records are built by the extractor and read through accessors only.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    job_title: String,
    location: String,
    employment_type: String,
    job_id: String,
    about_company: String,
    header: String,
    company_name: String,
    company_url: String,
    full_job_description: String,
    url: String,
    scraped_at: String,
    platform: String,
}

/// Field values gathered before sentinel substitution.
#[derive(Debug, Default, Clone)]
pub(crate) struct RawFields {
    pub job_title: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub job_id: Option<String>,
    pub about_company: Option<String>,
    pub header: Option<String>,
    pub company_name: Option<String>,
    pub company_url: Option<String>,
    pub full_job_description: Option<String>,
    pub url: Option<String>,
    pub scraped_at: Option<String>,
    pub platform: Option<String>,
}

fn or_sentinel(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_FOUND.to_string(),
    }
}

impl JobRecord {
    /// Build a record, replacing every absent or blank value with the sentinel.
    pub(crate) fn from_raw(raw: RawFields) -> Self {
        Self {
            job_title: or_sentinel(raw.job_title),
            location: or_sentinel(raw.location),
            employment_type: or_sentinel(raw.employment_type),
            job_id: or_sentinel(raw.job_id),
            about_company: or_sentinel(raw.about_company),
            header: or_sentinel(raw.header),
            company_name: or_sentinel(raw.company_name),
            company_url: or_sentinel(raw.company_url),
            full_job_description: or_sentinel(raw.full_job_description),
            url: or_sentinel(raw.url),
            scraped_at: or_sentinel(raw.scraped_at),
            platform: or_sentinel(raw.platform),
        }
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn employment_type(&self) -> &str {
        &self.employment_type
    }

    pub fn job_id(&self) -> &str {
        &self.job_id
    }

    pub fn about_company(&self) -> &str {
        &self.about_company
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn company_url(&self) -> &str {
        &self.company_url
    }

    pub fn full_job_description(&self) -> &str {
        &self.full_job_description
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn scraped_at(&self) -> &str {
        &self.scraped_at
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    /// Company name, unless the page did not provide one.
    pub fn known_company_name(&self) -> Option<&str> {
        (self.company_name != NOT_FOUND).then_some(self.company_name.as_str())
    }

    /// `(field name, value)` pairs in schema order.
    pub fn fields(&self) -> [(&'static str, &str); 12] {
        [
            ("jobTitle", self.job_title.as_str()),
            ("location", self.location.as_str()),
            ("employmentType", self.employment_type.as_str()),
            ("jobId", self.job_id.as_str()),
            ("aboutCompany", self.about_company.as_str()),
            ("header", self.header.as_str()),
            ("companyName", self.company_name.as_str()),
            ("companyUrl", self.company_url.as_str()),
            ("fullJobDescription", self.full_job_description.as_str()),
            ("url", self.url.as_str()),
            ("scrapedAt", self.scraped_at.as_str()),
            ("platform", self.platform.as_str()),
        ]
    }
}

/// Outcome of one extraction attempt.
///
/// Serializes as `{"success": true, "data": ...}` or `{"success": false, "error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionResult {
    Success(JobRecord),
    Failure(String),
}

#[derive(Serialize)]
struct Envelope<'a> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a JobRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl Serialize for ExtractionResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        Envelope {
            success: self.is_success(),
            data: self.record(),
            error: self.reason(),
        }
        .serialize(serializer)
    }
}

impl ExtractionResult {
    pub fn failure(reason: impl Into<String>) -> Self {
        Self::Failure(reason.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn record(&self) -> Option<&JobRecord> {
        match self {
            Self::Success(record) => Some(record),
            Self::Failure(_) => None,
        }
    }

    /// Failure reason, if extraction failed.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(reason) => Some(reason),
        }
    }
}
