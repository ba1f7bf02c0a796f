//! Profile lookup client.
//!
//! One call resolves one username. The dispatcher only depends on the
//! [`ProfileLookup`] trait; [`HttpProfileLookup`] is the production
//! implementation against the Mojang profile API.

pub mod http;

pub use http::HttpProfileLookup;

use crate::model::Identifier;
use async_trait::async_trait;
use thiserror::Error;

/// Why a single username could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no profile exists for this username")]
    NotFound,

    #[error("lookup rejected with status {0}")]
    Rejected(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("transient failure: {0}")]
    Transient(String),
}

impl LookupError {
    /// Whether retrying the same username could ever succeed.
    ///
    /// Nothing in this crate retries; the flag only labels skipped usernames.
    pub fn is_permanent(&self) -> bool {
        !matches!(self, Self::Transient(_))
    }

    /// Short label used for metrics and the unresolved report.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::Rejected(_) => "rejected",
            Self::Malformed(_) => "malformed",
            Self::Transient(_) => "transient",
        }
    }
}

/// Resolves a single username into its identifier.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn resolve(&self, username: &str) -> Result<Identifier, LookupError>;
}
