// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Moments Tracking Service Client Library
//!
//! This client provides typed access to the moments ingestion endpoint of
//! the tracking service: it builds the HTTP request from typed input, sends
//! it with bearer-token authentication against the configured base path, and
//! surfaces the service's JSON response or error.
//!
//! ## Usage
//!
//! ```ignore
//! use moments_client::{MomentsClient, MomentsConfig, PostMomentsRequest};
//! use secrecy::SecretString;
//! use std::collections::HashMap;
//! use url::Url;
//!
//! let config = MomentsConfig::new(
//!     Url::parse("https://api.moments.example.com")?,
//!     SecretString::from(std::env::var("MOMENTS_ACCESS_TOKEN")?),
//! );
//! let client = MomentsClient::new(config)?;
//!
//! let mut data = HashMap::new();
//! data.insert("message".to_string(), serde_json::json!("hello world"));
//!
//! let posted = client
//!     .post_moments(&PostMomentsRequest {
//!         schema_id: "sch_fGk2x".to_string(),
//!         project_id: "prj_9fH3t".to_string(),
//!         data,
//!     })
//!     .await?;
//! println!("accepted as {}", posted.moment_id);
//! ```
//!
//! ## Errors
//!
//! Failures surface as [`MomentsError`]: transport problems keep the
//! underlying `reqwest` error, and non-success statuses carry the service's
//! error body - parsed into [`ValidationErrors`] when it has the structured
//! shape, or preserved raw otherwise. The client performs no retries; a
//! failed call is reported to the caller as-is.

mod config;
mod error;

pub use config::MomentsConfig;
pub use error::MomentsError;

// Re-export types from the API crate for convenience
pub use moments_api::{
    InvalidMomentId, MomentId, PostMomentsRequest, PostMomentsResponse, ValidationErrors,
};

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use url::Url;

/// Client for the moments ingestion endpoint
///
/// Holds a pre-authenticated `reqwest::Client`; the bearer token is attached
/// to every request as a default header and never leaves the client.
#[derive(Debug, Clone)]
pub struct MomentsClient {
    client: reqwest::Client,
    base_path: Url,
    endpoint: Url,
}

impl MomentsClient {
    /// Create a new moments client
    ///
    /// Builds the underlying HTTP client with the bearer `Authorization`
    /// header, timeout, and user agent from `config`.
    pub fn new(config: MomentsConfig) -> Result<Self, MomentsError> {
        let token = config.access_token.expose_secret();
        if token.is_empty() {
            return Err(MomentsError::Config("access token is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|e| {
            MomentsError::Config(format!("access token is not a valid header value: {}", e))
        })?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()?;

        let endpoint = endpoint_url(&config.base_path)?;

        Ok(Self {
            client,
            base_path: config.base_path,
            endpoint,
        })
    }

    /// The base path this client resolves the endpoint against
    pub fn base_path(&self) -> &Url {
        &self.base_path
    }

    /// Post a moment to the tracking service
    ///
    /// Serializes `moment` as JSON and POSTs it to `{base_path}/moments`.
    /// On 2xx the response body is deserialized into [`PostMomentsResponse`];
    /// any other status is surfaced as [`MomentsError::Api`] when the body has
    /// the service's structured error shape, or
    /// [`MomentsError::UnexpectedResponse`] with the raw body otherwise.
    pub async fn post_moments(
        &self,
        moment: &PostMomentsRequest,
    ) -> Result<PostMomentsResponse, MomentsError> {
        tracing::debug!(
            url = %self.endpoint,
            schema_id = %moment.schema_id,
            project_id = %moment.project_id,
            "Posting moment"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(moment)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let posted: PostMomentsResponse = response.json().await?;
            tracing::debug!(moment_id = %posted.moment_id, "Moment accepted");
            return Ok(posted);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(
            status = %status,
            "Moments API returned non-success status"
        );

        match serde_json::from_str::<ValidationErrors>(&body) {
            Ok(errors) => Err(MomentsError::Api { status, errors }),
            Err(_) => Err(MomentsError::UnexpectedResponse { status, body }),
        }
    }
}

/// Resolve the ingestion endpoint against a base path
///
/// A trailing slash on the base path must not produce a double slash in the
/// endpoint URL.
fn endpoint_url(base_path: &Url) -> Result<Url, MomentsError> {
    let base = base_path.as_str().trim_end_matches('/');
    Url::parse(&format!("{}/moments", base)).map_err(|e| {
        MomentsError::Config(format!("invalid base path '{}': {}", base_path, e))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    #[test]
    fn test_endpoint_url_plain_host() {
        let base = Url::parse("https://api.moments.example.com").unwrap();
        let url = endpoint_url(&base).unwrap();
        assert_eq!(url.as_str(), "https://api.moments.example.com/moments");
    }

    #[test]
    fn test_endpoint_url_trailing_slash() {
        let base = Url::parse("https://api.moments.example.com/").unwrap();
        let url = endpoint_url(&base).unwrap();
        assert_eq!(url.as_str(), "https://api.moments.example.com/moments");
    }

    #[test]
    fn test_endpoint_url_with_path_segment() {
        let base = Url::parse("https://example.com/tracking/v1").unwrap();
        let url = endpoint_url(&base).unwrap();
        assert_eq!(url.as_str(), "https://example.com/tracking/v1/moments");
    }

    #[test]
    fn test_new_rejects_empty_token() {
        let config = MomentsConfig::new(
            Url::parse("https://api.moments.example.com").unwrap(),
            SecretString::from(""),
        );
        let err = MomentsClient::new(config).unwrap_err();
        assert!(matches!(err, MomentsError::Config(_)));
    }

    #[test]
    fn test_new_rejects_token_with_control_chars() {
        let config = MomentsConfig::new(
            Url::parse("https://api.moments.example.com").unwrap(),
            SecretString::from("tok\nwith-newline"),
        );
        let err = MomentsClient::new(config).unwrap_err();
        assert!(matches!(err, MomentsError::Config(_)));
    }
}
