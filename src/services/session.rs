// src/services/session.rs

//! One user-triggered analysis: extract, submit, report.

use std::sync::atomic::{AtomicBool, Ordering};

use scraper::Html;

use crate::error::{AppError, Result};
use crate::extract::PageExtractor;
use crate::models::{AnalysisResponse, ExtractionResult, JobRecord, SponsorshipResponse};
use crate::services::AnalysisBackend;

/// A submitted record and the backend's verdict on it.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub record: JobRecord,
    pub analysis: AnalysisResponse,
}

impl AnalysisOutcome {
    /// Company name to use for a sponsorship lookup.
    pub fn company_query(&self) -> Option<&str> {
        sponsorship_query(&self.record, Some(&self.analysis))
    }
}

/// Pick the company name for a sponsorship lookup.
///
/// The backend's resolved name wins over what the page carried.
pub fn sponsorship_query<'a>(
    record: &'a JobRecord,
    analysis: Option<&'a AnalysisResponse>,
) -> Option<&'a str> {
    analysis
        .and_then(AnalysisResponse::company_name)
        .or_else(|| record.known_company_name())
}

/// Runs analyses against a backend, one request at a time.
pub struct AnalysisSession<B> {
    extractor: PageExtractor,
    backend: B,
    in_flight: AtomicBool,
}

/// Marks a request as outstanding until dropped.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<B: AnalysisBackend> AnalysisSession<B> {
    pub fn new(extractor: PageExtractor, backend: B) -> Self {
        Self {
            extractor,
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Extract a record from `document` and submit it for analysis.
    ///
    /// A page without a job container fails before any request is made.
    pub async fn analyze(&self, document: &Html, page_url: &str) -> Result<AnalysisOutcome> {
        let _guard = self.begin()?;

        let record = match self.extractor.extract(document, page_url) {
            ExtractionResult::Success(record) => record,
            ExtractionResult::Failure(reason) => return Err(AppError::structure(reason)),
        };

        log::info!("Submitting '{}' for analysis", record.job_title());
        let analysis = self.backend.analyze_job(&record).await?;
        log::debug!(
            "Verdict '{}' with confidence {:.2}",
            analysis.status,
            analysis.confidence
        );

        Ok(AnalysisOutcome { record, analysis })
    }

    /// Look up sponsorship history for a company name.
    pub async fn lookup_sponsorship(&self, company_name: &str) -> Result<SponsorshipResponse> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(AppError::validation("Company name is empty"));
        }

        let _guard = self.begin()?;
        log::info!("Looking up sponsorship history for '{company_name}'");
        self.backend.lookup_sponsorship(company_name).await
    }

    /// Follow an analysis with a sponsorship lookup when a company is known.
    pub async fn lookup_for(&self, outcome: &AnalysisOutcome) -> Result<Option<SponsorshipResponse>> {
        match outcome.company_query() {
            Some(name) => self.lookup_sponsorship(name).await.map(Some),
            None => {
                log::warn!("No company name available for a sponsorship lookup");
                Ok(None)
            }
        }
    }

    fn begin(&self) -> Result<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .map(|_| InFlight(&self.in_flight))
            .map_err(|_| AppError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::models::{ExtractionConfig, JobMetadata};

    const JOB_PAGE: &str = r#"<html><body>
        <div data-automation-id="jobPostingPage">
            <h2 data-automation-id="jobPostingHeader">Data Engineer</h2>
        </div>
        <script type="application/ld+json">
            {"@type": "JobPosting", "hiringOrganization": {"name": "Acme"}}
        </script></body></html>"#;

    #[derive(Default)]
    struct MockBackend {
        analyze_calls: AtomicUsize,
        lookups: Mutex<Vec<String>>,
        final_company: Option<String>,
        gate: Option<Notify>,
    }

    #[async_trait]
    impl AnalysisBackend for MockBackend {
        async fn analyze_job(&self, record: &JobRecord) -> Result<AnalysisResponse> {
            self.analyze_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            Ok(AnalysisResponse {
                status: "yes".into(),
                message: "SPONSORS VISA".into(),
                confidence: 0.8,
                reasoning: format!("checked {}", record.job_title()),
                positive_indicators: vec!["visa sponsorship available".into()],
                negative_indicators: vec![],
                color: Some("green".into()),
                job_metadata: Some(JobMetadata {
                    final_company_name: self.final_company.clone(),
                    ..JobMetadata::default()
                }),
                company_analysis: None,
            })
        }

        async fn lookup_sponsorship(&self, company_name: &str) -> Result<SponsorshipResponse> {
            self.lookups.lock().unwrap().push(company_name.to_string());
            Ok(SponsorshipResponse {
                found: true,
                message: format!("Found {company_name}"),
                yearly_breakdown: None,
                average_per_year: None,
                match_confidence: Some(1.0),
            })
        }
    }

    fn session(backend: MockBackend) -> AnalysisSession<MockBackend> {
        let extractor = PageExtractor::new(ExtractionConfig::default()).unwrap();
        AnalysisSession::new(extractor, backend)
    }

    #[tokio::test]
    async fn test_missing_container_never_calls_backend() {
        let session = session(MockBackend::default());
        let document = Html::parse_document("<p>Search results</p>");

        let err = session.analyze(&document, "https://example.com").await.unwrap_err();
        assert!(matches!(err, AppError::Structure(ref m) if m.contains("jobPostingPage not found")));
        assert_eq!(session.backend().analyze_calls.load(Ordering::SeqCst), 0);

        // The guard is released after the failure.
        let document = Html::parse_document(JOB_PAGE);
        assert!(session.analyze(&document, "https://example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_analyze_then_lookup_uses_page_company() {
        let session = session(MockBackend::default());
        let document = Html::parse_document(JOB_PAGE);

        let outcome = session.analyze(&document, "https://example.com/job").await.unwrap();
        assert_eq!(outcome.record.job_title(), "Data Engineer");
        assert_eq!(outcome.analysis.reasoning, "checked Data Engineer");

        let history = session.lookup_for(&outcome).await.unwrap().unwrap();
        assert!(history.found);
        assert_eq!(*session.backend().lookups.lock().unwrap(), vec!["Acme"]);
    }

    #[tokio::test]
    async fn test_lookup_prefers_backend_company() {
        let session = session(MockBackend {
            final_company: Some("Acme Corporation".into()),
            ..MockBackend::default()
        });
        let document = Html::parse_document(JOB_PAGE);

        let outcome = session.analyze(&document, "u").await.unwrap();
        assert_eq!(outcome.company_query(), Some("Acme Corporation"));
    }

    #[tokio::test]
    async fn test_second_trigger_is_busy() {
        let session = session(MockBackend {
            gate: Some(Notify::new()),
            ..MockBackend::default()
        });
        let document = Html::parse_document(JOB_PAGE);

        let (first, second, ()) = tokio::join!(
            session.analyze(&document, "u"),
            session.analyze(&document, "u"),
            async {
                tokio::task::yield_now().await;
                if let Some(gate) = &session.backend().gate {
                    gate.notify_one();
                }
            },
        );

        assert!(first.is_ok());
        assert!(matches!(second, Err(AppError::Busy)));
        assert_eq!(session.backend().analyze_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_company_rejected() {
        let session = session(MockBackend::default());
        let err = session.lookup_sponsorship("   ").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(session.backend().lookups.lock().unwrap().is_empty());
    }
}
