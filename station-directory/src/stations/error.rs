//! Station dataset error types.

/// Errors that can occur when fetching the station dataset.
#[derive(Debug, thiserror::Error)]
pub enum StationError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// ArcGIS reported a query failure inside an HTTP 200 body
    #[error("query service error {code}: {message}")]
    Service { code: i64, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
