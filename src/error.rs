use thiserror::Error;

/// Errors raised at the edges of the app: config, logging and terminal setup.
/// The scoring core itself never fails.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unsupported test duration: {0}s (expected 15, 30 or 60)")]
    InvalidDuration(u64),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
