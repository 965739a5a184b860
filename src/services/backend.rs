// src/services/backend.rs

//! HTTP client for the analysis and sponsorship backends.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, Result};
use crate::models::{
    AnalysisResponse, BackendConfig, HealthStatus, JobRecord, SponsorshipQuery,
    SponsorshipResponse, TextAnalysisRequest,
};
use crate::utils::http;

/// Remote services a job record is checked against.
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Submit a job record for sponsorship analysis.
    async fn analyze_job(&self, record: &JobRecord) -> Result<AnalysisResponse>;

    /// Look up a company's sponsorship history.
    async fn lookup_sponsorship(&self, company_name: &str) -> Result<SponsorshipResponse>;
}

/// [`AnalysisBackend`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    config: BackendConfig,
    client: Client,
}

impl HttpBackend {
    /// Create a backend client with the configured timeout and user agent.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = http::create_client(&config)?;
        Ok(Self { config, client })
    }

    /// Analyze free text through the legacy endpoint.
    pub async fn analyze_text(&self, text: &str, url: &str) -> Result<AnalysisResponse> {
        self.post_json(&self.config.legacy_path, &TextAnalysisRequest { text, url })
            .await
    }

    /// Ask the backend whether it is up.
    pub async fn health(&self) -> Result<HealthStatus> {
        let path = &self.config.health_path;
        let endpoint = self.config.endpoint(path);
        log::debug!("GET {endpoint}");

        let response = self.client.get(&endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::backend(path, status));
        }
        Ok(response.json().await?)
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let endpoint = self.config.endpoint(path);
        log::debug!("POST {endpoint}");

        let response = self.client.post(&endpoint).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{endpoint} answered {status}");
            return Err(AppError::backend(path, status));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl AnalysisBackend for HttpBackend {
    async fn analyze_job(&self, record: &JobRecord) -> Result<AnalysisResponse> {
        self.post_json(&self.config.analyze_path, record).await
    }

    async fn lookup_sponsorship(&self, company_name: &str) -> Result<SponsorshipResponse> {
        self.post_json(
            &self.config.sponsorship_path,
            &SponsorshipQuery { company_name },
        )
        .await
    }
}
