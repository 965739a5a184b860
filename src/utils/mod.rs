//! Utility functions and helpers.

pub mod http;

#[cfg(test)]
pub(crate) mod test_server;

use std::path::Path;

use url::Url;

use crate::error::{AppError, Result};

/// `file://` URL for a saved page on disk.
pub fn file_url(path: &Path) -> Result<String> {
    let absolute = std::path::absolute(path)?;
    Url::from_file_path(&absolute)
        .map(|u| u.to_string())
        .map_err(|_| AppError::config(format!("Cannot build a URL for {}", path.display())))
}

/// Check that a page address is an absolute http(s) URL.
pub fn parse_page_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(AppError::validation(format!(
            "Unsupported URL scheme '{other}' in {raw}"
        ))),
    }
}
