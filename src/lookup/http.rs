//! HTTP lookup against `GET {base}/users/profiles/minecraft/{username}`.

use super::{LookupError, ProfileLookup};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::Identifier;
use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Body of a successful profile lookup.
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    id: String,
}

/// Lookup client backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpProfileLookup {
    client: reqwest::Client,
    base: Url,
}

impl HttpProfileLookup {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| Error::Config(format!("invalid profile API url {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "profile API url {base_url:?} cannot carry a path"
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("convertuuid/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, base })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(&config.api_url, config.lookup_timeout)
    }

    fn profile_url(&self, username: &str) -> std::result::Result<Url, LookupError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::Malformed("profile API url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["users", "profiles", "minecraft", username]);
        Ok(url)
    }
}

#[async_trait]
impl ProfileLookup for HttpProfileLookup {
    async fn resolve(&self, username: &str) -> std::result::Result<Identifier, LookupError> {
        let url = self.profile_url(username)?;
        debug!(%url, "requesting profile");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transient(e.to_string()))?;

        if let Some(err) = classify_status(response.status()) {
            return Err(err);
        }

        let profile: ProfileResponse = response
            .json()
            .await
            .map_err(|e| LookupError::Malformed(e.to_string()))?;

        uuid::Uuid::try_parse(&profile.id)
            .map_err(|e| LookupError::Malformed(format!("id {:?} is not a uuid: {e}", profile.id)))?;

        Ok(Identifier(profile.id))
    }
}

/// Map a response status to a lookup failure, or `None` if the body
/// should be parsed.
///
/// The profile API answers unknown names with 204 (older deployments) or
/// 404, and throttles with 429.
pub fn classify_status(status: StatusCode) -> Option<LookupError> {
    match status {
        StatusCode::OK => None,
        StatusCode::NO_CONTENT | StatusCode::NOT_FOUND => Some(LookupError::NotFound),
        StatusCode::TOO_MANY_REQUESTS | StatusCode::REQUEST_TIMEOUT => Some(
            LookupError::Transient(format!("profile API returned {status}")),
        ),
        s if s.is_server_error() => {
            Some(LookupError::Transient(format!("profile API returned {s}")))
        }
        s => Some(LookupError::Rejected(s.as_u16())),
    }
}
