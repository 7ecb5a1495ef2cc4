// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Client configuration

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Default HTTP timeout for requests to the moments API (seconds)
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Default User-Agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("moments-client/", env!("CARGO_PKG_VERSION"));

/// Moments client configuration
///
/// Carries the base path the single endpoint is resolved against and the
/// bearer credential attached to outgoing requests.
#[derive(Clone, Debug)]
pub struct MomentsConfig {
    /// Root URL of the tracking service (e.g. "https://api.moments.example.com")
    pub base_path: Url,
    /// Bearer access token for authentication
    pub access_token: SecretString,
    /// Per-request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl MomentsConfig {
    /// Create a configuration with default timeout and user agent
    pub fn new(base_path: Url, access_token: SecretString) -> Self {
        Self {
            base_path,
            access_token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Override the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
