//! Error types for docfresh-fetch.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("timed out after {0:?} waiting for {1}")]
    Timeout(Duration, &'static str),

    #[error("response body is not valid UTF-8")]
    Decode(#[source] std::string::FromUtf8Error),

    #[error("failed to write {path}")]
    Write {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Stage(#[from] docfresh_fs::Error),
}

impl FetchError {
    pub(crate) fn network<E: std::error::Error>(e: E) -> Self { Self::Network(e.to_string()) }
}

pub type Result<T> = std::result::Result<T, FetchError>;
