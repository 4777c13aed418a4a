use thiserror::Error;

/// Failure of a single HTTP GET, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("http status {0}")]
    Status(u16),
}

/// Failure of the persistent key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
    #[error("store quota exceeded")]
    QuotaExceeded,
    #[error("{0}")]
    Backend(String),
}
