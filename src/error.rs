use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    #[error("Invalid client ID format: {0}")]
    InvalidClientId(String),

    #[error("Invalid lane status: {0}")]
    InvalidStatus(String),

    #[error("Remote service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to sync client {client_id} (rolled back: {rolled_back}): {source}")]
    SyncFailed {
        client_id: String,
        rolled_back: bool,
        #[source]
        source: Box<BoardError>,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl BoardError {
    /// Whether a remote call that failed with this error is worth retrying
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            #[cfg(feature = "http")]
            Self::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::IoError(_) => true,
            _ => false,
        }
    }
}
