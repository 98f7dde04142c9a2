use thiserror::Error;

pub type RsaLabResult<T> = Result<T, RsaLabError>;

#[derive(Debug, Error)]
pub enum RsaLabError {
    #[error("{0}")]
    InvalidParameter(String),

    #[error("{0}")]
    KeyUnavailable(String),

    #[error("crypto error: {0}")]
    Crypto(String),

    #[error("encoding error: {0}")]
    Encoding(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RsaLabError {
    /// Stable label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RsaLabError::InvalidParameter(_) => "invalid_parameter",
            RsaLabError::KeyUnavailable(_) => "key_unavailable",
            RsaLabError::Crypto(_) => "crypto",
            RsaLabError::Encoding(_) => "encoding",
            RsaLabError::NotFound(_) => "not_found",
            RsaLabError::Unauthorized(_) => "unauthorized",
            RsaLabError::Storage(_) => "storage",
            RsaLabError::Config(_) => "config",
            RsaLabError::Io(_) => "io",
            RsaLabError::Other(_) => "other",
        }
    }

    /// True for errors caused by the caller's input rather than the service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RsaLabError::InvalidParameter(_)
                | RsaLabError::KeyUnavailable(_)
                | RsaLabError::Encoding(_)
                | RsaLabError::NotFound(_)
                | RsaLabError::Unauthorized(_)
        )
    }
}
