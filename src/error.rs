//! Error types for convert-uuid.
//!
//! Per-username lookup failures live in [`crate::lookup::LookupError`] and
//! never surface here; the dispatcher absorbs them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("input error: {0}")]
    Input(String),

    #[error("failed to write results: {0}")]
    Output(#[source] std::io::Error),

    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
