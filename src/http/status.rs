//! Translation of HTTP failures into user-facing network errors.

use reqwest::StatusCode;

use crate::error::ModuleError;

/// Describe a failed response status.
pub fn describe_status(status: StatusCode, url: &str) -> String {
    match status {
        StatusCode::UNAUTHORIZED => format!(
            "Authentication failed for {}. Check your GITHUB_TOKEN.",
            url
        ),
        StatusCode::FORBIDDEN => format!(
            "Access to {} is forbidden (HTTP 403). The GitHub API rate limit may be exhausted; \
             set GITHUB_TOKEN to raise it.",
            url
        ),
        StatusCode::TOO_MANY_REQUESTS => {
            format!("Too many requests to {}. Try again later.", url)
        }
        StatusCode::NOT_FOUND => format!("Not found: {}", url),
        s => format!("HTTP {} from {}", s.as_u16(), url),
    }
}

/// Fail unless the response status is a success.
pub fn check_status(
    response: reqwest::Response,
    url: &str,
) -> Result<reqwest::Response, ModuleError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ModuleError::Network(describe_status(status, url)))
    }
}

/// Wrap a transport-level failure (DNS, connect, TLS, body read).
pub fn transport_error(error: reqwest::Error, url: &str) -> ModuleError {
    ModuleError::Network(format!("Request to {} failed: {}", url, error))
}
