// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Moments API Trait Definition
//!
//! **IMPORTANT**: This trait defines a *subset* of the moments tracking
//! service's REST API. This is NOT a complete definition of that API - it
//! only includes the single ingestion endpoint our tooling depends on:
//! posting a moment.
//!
//! The actual moments API is implemented by the vendor's servers. This trait
//! exists to:
//! 1. Document the exact API surface we depend on
//! 2. Enable mock implementations for testing (see moments-stub-server)
//! 3. Pin the wire contract the client in clients/internal/moments-client
//!    is written against

use dropshot::{HttpError, HttpResponseOk, RequestContext, TypedBody};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// Newtypes
// ============================================================================

/// A moment identifier in mom_xxx format, as issued by the tracking service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct MomentId(String);

impl MomentId {
    /// Create a new MomentId, validating the format
    pub fn new(id: impl Into<String>) -> Result<Self, InvalidMomentId> {
        let id = id.into();
        // Must be a "mom_" prefix followed by a non-empty suffix
        match id.strip_prefix("mom_") {
            Some(suffix) if !suffix.is_empty() => Ok(Self(id)),
            _ => Err(InvalidMomentId(id)),
        }
    }

    /// Create without validation (for trusted sources like service responses)
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MomentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for MomentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug)]
pub struct InvalidMomentId(pub String);

impl fmt::Display for InvalidMomentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid moment id format: '{}' (expected mom_xxx)",
            self.0
        )
    }
}

impl std::error::Error for InvalidMomentId {}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for posting a moment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PostMomentsRequest {
    /// Schema the moment's payload conforms to
    #[serde(rename = "schemaId")]
    pub schema_id: String,

    /// Project the moment belongs to
    #[serde(rename = "projectId")]
    pub project_id: String,

    /// Moment payload as a dynamic JSON object
    pub data: HashMap<String, serde_json::Value>,
}

/// Response from the moments ingestion endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PostMomentsResponse {
    /// Identifier assigned to the accepted moment
    #[serde(rename = "momentId")]
    pub moment_id: MomentId,
}

/// Error body returned by the service when a moment is rejected
///
/// The service always includes `message`; `errors` carries one entry per
/// validation failure and may be absent on non-validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationErrors {
    /// Human-readable summary (e.g. "validation failed")
    pub message: String,

    /// Individual validation failures (e.g. "missing datetime")
    #[serde(default)]
    pub errors: Vec<String>,
}

// ============================================================================
// API Trait
// ============================================================================

/// Moments Tracking Service REST API (Subset)
///
/// **IMPORTANT**: This is a partial definition of the tracking service's API,
/// containing only the ingestion endpoint used by our client and CLI.
///
/// The actual implementation of this endpoint is provided by the vendor's
/// servers, not by us. moments-stub-server implements this trait for local
/// development and integration testing.
#[dropshot::api_description]
pub trait MomentsApi {
    /// Context type for request handlers
    type Context: Send + Sync + 'static;

    /// Post a moment
    ///
    /// Submits a single event record to the tracking service. The payload in
    /// `data` is validated server-side against the schema named by `schemaId`;
    /// rejected moments come back as 422 with a `ValidationErrors` body.
    ///
    /// **Service API Reference**: POST /moments
    #[endpoint {
        method = POST,
        path = "/moments",
        tags = ["moments"],
    }]
    async fn post_moments(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<PostMomentsRequest>,
    ) -> Result<HttpResponseOk<PostMomentsResponse>, HttpError>;
}

// ============================================================================
// Tests
// ============================================================================
