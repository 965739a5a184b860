// src/report.rs

//! Plain-text rendering of extraction results and backend verdicts.

use std::fmt::Write;

use crate::error::AppError;
use crate::models::{AnalysisResponse, ExtractionResult, JobRecord, SponsorshipResponse};

/// Shown for any failure talking to a backend.
pub const CONNECTIVITY_MESSAGE: &str = "Could not reach the analysis service. Is it running?";

/// Render an extraction result as a short field listing.
pub fn render_extraction(result: &ExtractionResult) -> String {
    match result {
        ExtractionResult::Success(record) => render_record(record),
        ExtractionResult::Failure(reason) => format!("✗ {reason}\n"),
    }
}

/// Render a job record, without its full description.
pub fn render_record(record: &JobRecord) -> String {
    let mut out = String::new();
    for (name, value) in record.fields() {
        if name == "fullJobDescription" {
            let _ = writeln!(out, "{name:>20}: {} chars", value.chars().count());
        } else {
            let _ = writeln!(out, "{name:>20}: {value}");
        }
    }
    out
}

/// Render an analysis verdict.
pub fn render_analysis(analysis: &AnalysisResponse) -> String {
    let mut out = String::new();
    let mark = if analysis.sponsors() { "✓" } else { "✗" };

    let _ = writeln!(
        out,
        "{mark} {} (confidence {:.0}%)",
        analysis.message,
        analysis.confidence * 100.0
    );
    if let Some(company) = analysis.company_name() {
        let _ = writeln!(out, "Company: {company}");
    }
    if !analysis.reasoning.is_empty() {
        let _ = writeln!(out, "{}", analysis.reasoning);
    }

    push_list(&mut out, "Positive indicators", &analysis.positive_indicators);
    push_list(&mut out, "Negative indicators", &analysis.negative_indicators);
    if let Some(notes) = &analysis.company_analysis {
        push_list(&mut out, "Company analysis", notes);
    }
    out
}

/// Render a sponsorship-history lookup.
pub fn render_sponsorship(company_name: &str, history: &SponsorshipResponse) -> String {
    let mut out = String::new();

    if !history.found {
        let _ = writeln!(out, "No sponsorship history for {company_name}");
        if !history.message.is_empty() {
            let _ = writeln!(out, "{}", history.message);
        }
        return out;
    }

    let _ = writeln!(out, "Sponsorship history for {company_name}");
    if !history.message.is_empty() {
        let _ = writeln!(out, "{}", history.message);
    }
    if let Some(years) = &history.yearly_breakdown {
        for (year, count) in years {
            let _ = writeln!(out, "    {year}: {count}");
        }
        let _ = writeln!(out, "    total: {}", history.total());
    }
    if let Some(average) = history.average_per_year {
        let _ = writeln!(out, "Average per year: {average:.1}");
    }
    if let Some(confidence) = history.match_confidence {
        let _ = writeln!(out, "Match confidence: {:.0}%", confidence * 100.0);
    }
    out
}

/// User-facing text for an error.
///
/// Missing page structure is shown verbatim; transport failures collapse
/// to one connectivity message.
pub fn render_error(error: &AppError) -> String {
    match error {
        AppError::Structure(reason) => reason.clone(),
        e if e.is_transport() => CONNECTIVITY_MESSAGE.to_string(),
        e => e.to_string(),
    }
}

fn push_list(out: &mut String, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title}:");
    for item in items {
        let _ = writeln!(out, "  - {item}");
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn verdict(status: &str) -> AnalysisResponse {
        AnalysisResponse {
            status: status.into(),
            message: "NO SPONSORSHIP".into(),
            confidence: 0.9,
            reasoning: "Explicit restriction found".into(),
            positive_indicators: vec![],
            negative_indicators: vec!["we do not sponsor".into()],
            color: Some("red".into()),
            job_metadata: None,
            company_analysis: None,
        }
    }

    #[test]
    fn test_render_analysis() {
        let text = render_analysis(&verdict("no"));
        assert!(text.starts_with("✗ NO SPONSORSHIP (confidence 90%)"));
        assert!(text.contains("Negative indicators:\n  - we do not sponsor"));
        assert!(!text.contains("Positive indicators"));
    }

    #[test]
    fn test_render_sponsorship() {
        let history = SponsorshipResponse {
            found: true,
            message: String::new(),
            yearly_breakdown: Some(BTreeMap::from([
                ("2022".to_string(), 3),
                ("2021".to_string(), 5),
            ])),
            average_per_year: Some(4.0),
            match_confidence: Some(0.8),
        };
        let text = render_sponsorship("Acme", &history);
        assert_eq!(
            text,
            "Sponsorship history for Acme\n    2021: 5\n    2022: 3\n    total: 8\n\
             Average per year: 4.0\nMatch confidence: 80%\n"
        );
    }

    #[test]
    fn test_render_error() {
        assert_eq!(
            render_error(&AppError::structure("jobPostingPage not found")),
            "jobPostingPage not found"
        );
        assert_eq!(
            render_error(&AppError::backend("/analyze-job", reqwest::StatusCode::INTERNAL_SERVER_ERROR)),
            CONNECTIVITY_MESSAGE
        );
        assert_eq!(render_error(&AppError::Busy), "An analysis request is already in progress");
    }

    #[test]
    fn test_render_failure() {
        assert_eq!(
            render_extraction(&ExtractionResult::failure("jobPostingPage not found")),
            "✗ jobPostingPage not found\n"
        );
    }

    #[test]
    fn test_render_record() {
        let record = crate::models::JobRecord::from_raw(crate::models::RawFields {
            job_title: Some("Engineer".into()),
            full_job_description: Some("Build things".into()),
            ..Default::default()
        });
        let text = render_extraction(&ExtractionResult::Success(record));

        assert_eq!(text.lines().count(), 12);
        assert!(text.contains("            jobTitle: Engineer\n"));
        assert!(text.contains("  fullJobDescription: 12 chars\n"));
        assert!(text.contains("         companyName: Not found\n"));
    }

    #[test]
    fn test_render_page_fetch_error() {
        let err = AppError::fetch("https://acme.example/job/1", reqwest::StatusCode::NOT_FOUND);
        assert_eq!(
            render_error(&err),
            "Could not fetch https://acme.example/job/1: 404 Not Found"
        );
    }
}
