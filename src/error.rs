use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Batch-level failures. Per-task failures never surface here.
#[derive(Debug, Error)]
pub enum LoadTestError {
    #[error("failed to read token file {path:?}")]
    TokenFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse token file {path:?}")]
    TokenFileParse {
        path: PathBuf,
        #[source]
        source: sonic_rs::Error,
    },

    #[error("pool width must be at least 1")]
    ZeroWorkers,

    #[error("failed to create latency histogram")]
    Histogram(#[from] hdrhistogram::CreationError),

    #[error("failed to build HTTP client")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to serialize run summary")]
    SummarySerialize(#[source] sonic_rs::Error),

    #[error("failed to write summary file {path:?}")]
    SummaryWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised by a [`crate::RecordClient`] before any response is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() {
            TransportError::Connect(e.to_string())
        } else {
            TransportError::Request(e.to_string())
        }
    }
}

pub type Result<T, E = LoadTestError> = std::result::Result<T, E>;
