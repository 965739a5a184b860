//! Analysis backend request and response types.

use serde::{Deserialize, Serialize};

/// Verdict returned by the analysis backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResponse {
    /// Category tag, `"yes"` or `"no"`
    pub status: String,

    /// Short display text
    pub message: String,

    /// Confidence between 0.0 and 1.0
    #[serde(default)]
    pub confidence: f64,

    #[serde(default)]
    pub reasoning: String,

    #[serde(default)]
    pub positive_indicators: Vec<String>,

    #[serde(default)]
    pub negative_indicators: Vec<String>,

    /// Display color hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_metadata: Option<JobMetadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_analysis: Option<Vec<String>>,
}

impl AnalysisResponse {
    /// Whether the backend judged the posting as sponsoring.
    pub fn sponsors(&self) -> bool {
        self.status.eq_ignore_ascii_case("yes")
    }

    /// Best company name the backend settled on.
    pub fn company_name(&self) -> Option<&str> {
        let meta = self.job_metadata.as_ref()?;
        non_blank(&meta.final_company_name).or_else(|| non_blank(&meta.company_name))
    }
}

fn non_blank(name: &Option<String>) -> Option<&str> {
    name.as_deref().filter(|n| !n.trim().is_empty())
}

/// Echo of the submitted job plus backend-side company resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_confidence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_company_name: Option<String>,
}

/// Body for the legacy free-text analysis endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct TextAnalysisRequest<'a> {
    pub text: &'a str,
    pub url: &'a str,
}

/// Backend health report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
