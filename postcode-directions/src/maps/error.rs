//! Maps client error types.

/// Errors from the maps HTTP client.
///
/// These cover requests that produced no usable payload. A payload whose
/// `status` field is not `OK` is not an error at this level.
#[derive(Debug, thiserror::Error)]
pub enum MapsError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid API key or unauthorized
    #[error("unauthorized (check the API key)")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by maps API")]
    RateLimited,
}

impl MapsError {
    /// Build a JSON error, keeping the start of the body for diagnostics.
    pub(crate) fn json(err: serde_json::Error, body: &str) -> Self {
        MapsError::Json {
            message: err.to_string(),
            body: Some(body.chars().take(500).collect()),
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
