use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to fetch schedule page: {0}")]
    Fetch(#[from] reqwest::Error),

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    // Specific HTTP status code errors from the schedule page
    #[error("Schedule page not found (404): {url}")]
    UpstreamNotFound { url: String },

    #[error("Schedule page rate limit exceeded (429): {message} (URL: {url})")]
    UpstreamRateLimit { message: String, url: String },

    #[error("Schedule page client error ({status}): {message} (URL: {url})")]
    UpstreamClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Schedule page server error ({status}): {message} (URL: {url})")]
    UpstreamServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("Schedule page unavailable ({status}): {message} (URL: {url})")]
    UpstreamUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    /// Reported to requests that waited on a refresh attempt which failed
    #[error("Schedule refresh failed: {message}")]
    RefreshFailed { message: String },

    // Document-level parse failure
    #[error("Schedule page returned no parseable HTML: {message} (URL: {url})")]
    EmptyDocument { message: String, url: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an upstream not found error
    pub fn upstream_not_found(url: impl Into<String>) -> Self {
        Self::UpstreamNotFound { url: url.into() }
    }

    /// Create an upstream rate limit error
    pub fn upstream_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::UpstreamRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an upstream client error (4xx status codes except 404 and 429)
    pub fn upstream_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::UpstreamClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an upstream server error (5xx status codes)
    pub fn upstream_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::UpstreamServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an upstream unavailable error (502 and 503)
    pub fn upstream_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::UpstreamUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a refresh failed error from the failed attempt's message
    pub fn refresh_failed(message: impl Into<String>) -> Self {
        Self::RefreshFailed {
            message: message.into(),
        }
    }

    /// Create an empty document error
    pub fn empty_document(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::EmptyDocument {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Check if the error came from fetching or reading the schedule page
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Fetch(_)
                | AppError::NetworkTimeout { .. }
                | AppError::NetworkConnection { .. }
                | AppError::UpstreamNotFound { .. }
                | AppError::UpstreamRateLimit { .. }
                | AppError::UpstreamClientError { .. }
                | AppError::UpstreamServerError { .. }
                | AppError::UpstreamUnavailable { .. }
                | AppError::RefreshFailed { .. }
                | AppError::EmptyDocument { .. }
        )
    }

    fn status_code(&self) -> StatusCode {
        if self.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Request failed: {self}");
        (self.status_code(), self.to_string()).into_response()
    }
}
