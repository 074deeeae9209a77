//! HTTP client configuration with sensible defaults.

use crate::error::Result;
use std::time::Duration;

/// Default timeout for API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an HTTP client with the default timeout.
pub fn create_client() -> Result<reqwest::Client> {
    create_client_with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
}

/// Create an HTTP client with a custom timeout.
///
/// A stuck call is only ever ended by this timeout; there is no cancellation.
pub fn create_client_with_timeout(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("yt-article/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Read the body of a failed response for error reporting.
pub async fn error_body(response: reqwest::Response) -> String {
    response.text().await.unwrap_or_default()
}
