use async_trait::async_trait;
use reqwest::Client;
use shared::{error::FetchError, protocol::CapsuleListResponse};
use url::Url;

use crate::CapsuleService;

/// Capsule listing service over HTTP: `GET {base}/capsules?{query}`.
#[derive(Debug, Clone)]
pub struct RestCapsuleService {
    http: Client,
    base: Url,
}

impl RestCapsuleService {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        // A trailing slash keeps Url::join from replacing the last path
        // segment of versioned bases like `/v2`.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base = Url::parse(&normalized)
            .map_err(|err| FetchError::new(format!("invalid api url {base_url:?}: {err}")))?;
        Ok(Self {
            http: Client::new(),
            base,
        })
    }
}

#[async_trait]
impl CapsuleService for RestCapsuleService {
    async fn fetch(&self, query: &str) -> Result<CapsuleListResponse, FetchError> {
        let mut url = self
            .base
            .join("capsules")
            .map_err(|err| FetchError::new(err.to_string()))?;
        // The query is pre-assembled with a fixed field order; set it
        // verbatim rather than rebuilding it pair by pair.
        url.set_query(Some(query));

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|err| FetchError::new(err.to_string()))?
            .error_for_status()
            .map_err(|err| FetchError::new(err.to_string()))?;

        response
            .json::<CapsuleListResponse>()
            .await
            .map_err(|err| FetchError::new(err.to_string()))
    }
}
