//! HTTP fetching of remote schema documents.

use std::time::Duration;

use crate::error::{DirschemaError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client abstraction for dependency injection.
pub trait HttpClient {
    /// Perform a GET request and return the response body.
    ///
    /// # Errors
    /// Returns an error on connection failure or a non-success status.
    fn get(&self, url: &str) -> Result<String>;
}

/// Production HTTP client using reqwest.
///
/// This implementation cannot be unit tested without a real HTTP server;
/// tests inject a stub client instead.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReqwestClient;

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<String> {
        let http_error = |reason: String| DirschemaError::Http {
            url: url.to_string(),
            reason,
        };
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| http_error(e.to_string()))?;
        let response = client
            .get(url)
            .send()
            .map_err(|e| http_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(http_error(format!("status {}", response.status())));
        }
        response.text().map_err(|e| http_error(e.to_string()))
    }
}
