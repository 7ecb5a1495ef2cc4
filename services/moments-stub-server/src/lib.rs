// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Stub moments tracking service for testing
//!
//! This crate provides a Dropshot-based HTTP server that implements the
//! moments API trait with in-memory state. It can be used for:
//!
//! - Integration testing of moments-client without the real tracking service
//! - Local development and demos
//! - End-to-end testing of the moments CLI
//!
//! The server accepts posted moments, records them, and hands out sequential
//! moment identifiers. It mirrors the vendor's observed validation behavior:
//! payloads missing the required `datetime`, `author`, or `apiKey` keys are
//! rejected with 422.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use dropshot::{
    ClientErrorStatusCode, HttpError, HttpResponseOk, RequestContext, TypedBody,
};
use moments_api::{MomentId, MomentsApi, PostMomentsRequest, PostMomentsResponse};

/// Data keys the tracking service requires in every moment payload
const REQUIRED_DATA_KEYS: [&str; 3] = ["datetime", "author", "apiKey"];

// ============================================================================
// Server Context
// ============================================================================

/// Context for the stub moments server
#[derive(Debug, Default)]
pub struct StubContext {
    /// Moments accepted so far, in arrival order
    moments: Mutex<Vec<PostMomentsRequest>>,
    /// Counter backing the sequential moment identifiers
    next_id: AtomicU64,
}

impl StubContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a snapshot of all accepted moments
    pub fn moments(&self) -> Vec<PostMomentsRequest> {
        self.moments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn record(&self, moment: PostMomentsRequest) -> MomentId {
        let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        self.moments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(moment);
        MomentId::new_unchecked(format!("mom_stub{:06}", n))
    }
}

// ============================================================================
// API Implementation
// ============================================================================

/// Marker type for the stub moments API implementation
pub enum StubMomentsApi {}

impl MomentsApi for StubMomentsApi {
    type Context = Arc<StubContext>;

    async fn post_moments(
        rqctx: RequestContext<Self::Context>,
        body: TypedBody<PostMomentsRequest>,
    ) -> Result<HttpResponseOk<PostMomentsResponse>, HttpError> {
        let ctx = rqctx.context();
        let moment = body.into_inner();

        if moment.schema_id.is_empty() {
            return Err(HttpError::for_bad_request(
                None,
                "schemaId must not be empty".to_string(),
            ));
        }
        if moment.project_id.is_empty() {
            return Err(HttpError::for_bad_request(
                None,
                "projectId must not be empty".to_string(),
            ));
        }

        let missing = missing_data_keys(&moment.data);
        if !missing.is_empty() {
            tracing::warn!(
                schema_id = %moment.schema_id,
                missing = ?missing,
                "Rejecting moment with incomplete payload"
            );
            let details: Vec<String> =
                missing.iter().map(|k| format!("missing {}", k)).collect();
            return Err(HttpError::for_client_error(
                None,
                ClientErrorStatusCode::UNPROCESSABLE_ENTITY,
                format!("validation failed: {}", details.join(", ")),
            ));
        }

        let moment_id = ctx.record(moment);
        tracing::info!(moment_id = %moment_id, "Accepted moment");

        Ok(HttpResponseOk(PostMomentsResponse { moment_id }))
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Return the required payload keys absent from `data`, in canonical order
fn missing_data_keys(data: &HashMap<String, serde_json::Value>) -> Vec<&'static str> {
    REQUIRED_DATA_KEYS
        .iter()
        .filter(|key| !data.contains_key(**key))
        .copied()
        .collect()
}

/// Create the Dropshot API description for the stub server
pub fn api_description() -> Result<dropshot::ApiDescription<Arc<StubContext>>, String> {
    moments_api::moments_api_mod::api_description::<StubMomentsApi>().map_err(|e| e.to_string())
}

// ============================================================================
// Tests
// ============================================================================
