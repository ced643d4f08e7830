use thiserror::Error;

/// Top-level error type for the `roswatch-api` crate.
///
/// Covers transport failures, authentication rejection, structured RouterOS
/// API errors, and payload decoding. `roswatch-core` decides which of these
/// count as a lost connection via [`Error::is_transient`].
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Credentials rejected by the device (HTTP 401/403).
    #[error("Authentication rejected (HTTP {status})")]
    Authentication { status: u16 },

    /// Structured error from the RouterOS REST API
    /// (parsed from the `{error, message, detail}` body).
    #[error("RouterOS API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error indicates the device itself is
    /// unreachable (as opposed to a request the device rejected).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
