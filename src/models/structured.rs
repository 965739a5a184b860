//! Metadata recovered from embedded JSON-LD.

use serde::{Deserialize, Serialize};

/// Organization and job metadata read from a `JobPosting` linked-data record.
///
/// Each field is independent; a gap anywhere along its path leaves it `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredJobData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_salary: Option<String>,
}

impl StructuredJobData {
    /// True when no field could be recovered.
    pub fn is_empty(&self) -> bool {
        self.company_name.is_none()
            && self.company_url.is_none()
            && self.location.is_none()
            && self.employment_type.is_none()
            && self.base_salary.is_none()
    }
}
