// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::BackendConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &BackendConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a page and parse it as HTML.
///
/// Failures are reported against the page, not the analysis backend.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<Html> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| AppError::fetch(url, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::fetch(url, status));
    }
    let text = response.text().await.map_err(|e| AppError::fetch(url, e))?;
    log::debug!("Fetched {} bytes from {}", text.len(), url);
    Ok(Html::parse_document(&text))
}
