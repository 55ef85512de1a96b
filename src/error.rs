use thiserror::Error;

/// Error type for Asana API operations.
///
/// - `RequestFailed` — network/transport errors (wraps `reqwest::Error`)
/// - `InvalidRequest` — HTTP 400, carries the raw `errors` array if any
/// - `NoAuthorization` — HTTP 401
/// - `PremiumOnly` — HTTP 402
/// - `Forbidden` — HTTP 403
/// - `NotFound` — HTTP 404
/// - `RateLimitEnforced` — HTTP 429, with the `Retry-After` delay in seconds
/// - `ServerError` — HTTP 5xx
/// - `Api` — any other non-2xx status code
/// - `Decode` — a response could not be turned into the requested model
/// - `Configuration` — the client could not be built from its settings
#[derive(Debug, Error)]
pub enum AsanaError {
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        errors: Option<serde_json::Value>,
    },

    #[error("No authorization: {message}")]
    NoAuthorization { message: String },

    #[error("Premium only: {message}")]
    PremiumOnly { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Rate limit enforced: {message}")]
    RateLimitEnforced {
        message: String,
        retry_after: Option<u64>,
    },

    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl AsanaError {
    /// HTTP status of a remote failure, `None` for local ones.
    pub fn status(&self) -> Option<u16> {
        match self {
            AsanaError::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            AsanaError::InvalidRequest { .. } => Some(400),
            AsanaError::NoAuthorization { .. } => Some(401),
            AsanaError::PremiumOnly { .. } => Some(402),
            AsanaError::Forbidden { .. } => Some(403),
            AsanaError::NotFound { .. } => Some(404),
            AsanaError::RateLimitEnforced { .. } => Some(429),
            AsanaError::ServerError { status, .. } | AsanaError::Api { status, .. } => {
                Some(*status)
            }
            AsanaError::Decode(_) | AsanaError::Configuration { .. } => None,
        }
    }

    /// Whether the HTTP transport would retry the request that produced this error.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AsanaError::RateLimitEnforced { .. } | AsanaError::ServerError { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AsanaError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, AsanaError>;
