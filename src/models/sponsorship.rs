//! Sponsorship-history lookup types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body for a sponsorship-history lookup.
#[derive(Debug, Clone, Serialize)]
pub struct SponsorshipQuery<'a> {
    pub company_name: &'a str,
}

/// Sponsorship history for a company.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SponsorshipResponse {
    pub found: bool,

    #[serde(default)]
    pub message: String,

    /// Filings per year, keyed by year
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly_breakdown: Option<BTreeMap<String, u64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_per_year: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_confidence: Option<f64>,
}

impl SponsorshipResponse {
    /// Sum of all yearly filings.
    pub fn total(&self) -> u64 {
        self.yearly_breakdown
            .as_ref()
            .map_or(0, |years| years.values().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_found() {
        let json = r#"{"found": true, "message": "Found ACME INC",
            "yearly_breakdown": {"2023": 12, "2021": 4, "2022": 8},
            "average_per_year": 8.0, "match_confidence": 0.9}"#;
        let response: SponsorshipResponse = serde_json::from_str(json).unwrap();

        assert!(response.found);
        assert_eq!(response.total(), 24);
        let years: Vec<_> = response.yearly_breakdown.unwrap().into_keys().collect();
        assert_eq!(years, vec!["2021", "2022", "2023"]);
    }

    #[test]
    fn test_parse_not_found() {
        let response: SponsorshipResponse =
            serde_json::from_str(r#"{"found": false, "message": "No records"}"#).unwrap();
        assert!(!response.found);
        assert_eq!(response.total(), 0);
    }
}
