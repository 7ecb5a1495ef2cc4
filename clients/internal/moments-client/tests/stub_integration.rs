// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

// Allow expect/unwrap in tests - they provide clear panic messages on failure
#![allow(clippy::expect_used, clippy::unwrap_used)]

//! Integration test for moments-client against moments-stub-server
//!
//! Spins up the stub tracking service and drives it through the client,
//! verifying that the stub can stand in for the real service in end-to-end
//! testing: accepted moments get sequential ids and are recorded, and
//! payloads missing required keys are rejected with 422.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moments_client::{MomentsClient, MomentsConfig, MomentsError, PostMomentsRequest};
use secrecy::SecretString;
use serde_json::json;
use url::Url;

fn complete_data() -> HashMap<String, serde_json::Value> {
    let mut data = HashMap::new();
    data.insert("datetime".to_string(), json!("2026-08-06T12:00:00Z"));
    data.insert("author".to_string(), json!("avery"));
    data.insert("apiKey".to_string(), json!("key_123"));
    data.insert("message".to_string(), json!("hello world"));
    data
}

#[tokio::test]
async fn test_moments_stub_server_with_client() {
    // reqwest is built without a default TLS provider; install ring before
    // the first client is constructed (idempotent across parallel tests).
    let _ = rustls::crypto::ring::default_provider().install_default();

    // ========================================================================
    // Step 1: Start the stub moments server
    // ========================================================================
    let context = Arc::new(moments_stub_server::StubContext::new());

    let api = moments_stub_server::api_description().expect("moments api description");

    let config_dropshot = dropshot::ConfigDropshot {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    let log = dropshot::ConfigLogging::StderrTerminal {
        level: dropshot::ConfigLoggingLevel::Warn,
    }
    .to_logger("moments-stub-test")
    .expect("stub logger");

    let server =
        dropshot::HttpServerStarter::new(&config_dropshot, api, Arc::clone(&context), &log)
            .expect("failed to create stub server")
            .start();

    let base_path = format!("http://{}", server.local_addr());

    // Give server a moment to be ready
    tokio::time::sleep(Duration::from_millis(50)).await;

    // ========================================================================
    // Step 2: Drive the stub through the client
    // ========================================================================
    let client = MomentsClient::new(MomentsConfig::new(
        Url::parse(&base_path).unwrap(),
        SecretString::from("tok_test"),
    ))
    .expect("client should build");

    // A complete moment is accepted and gets the first sequential id
    let posted = client
        .post_moments(&PostMomentsRequest {
            schema_id: "sch_fGk2x".to_string(),
            project_id: "prj_9fH3t".to_string(),
            data: complete_data(),
        })
        .await
        .expect("complete moment should be accepted");

    assert_eq!(posted.moment_id.as_str(), "mom_stub000001");

    // A payload missing required keys is rejected with 422, and the
    // validation message names each missing key
    let mut incomplete = complete_data();
    incomplete.remove("datetime");
    incomplete.remove("author");

    let err = client
        .post_moments(&PostMomentsRequest {
            schema_id: "sch_fGk2x".to_string(),
            project_id: "prj_9fH3t".to_string(),
            data: incomplete,
        })
        .await
        .expect_err("incomplete moment should be rejected");

    match err {
        MomentsError::Api { status, errors } => {
            assert_eq!(status.as_u16(), 422);
            assert!(errors.message.contains("missing datetime"));
            assert!(errors.message.contains("missing author"));
        }
        other => panic!("expected Api error, got: {:?}", other),
    }

    // An empty schemaId is a bad request
    let err = client
        .post_moments(&PostMomentsRequest {
            schema_id: String::new(),
            project_id: "prj_9fH3t".to_string(),
            data: complete_data(),
        })
        .await
        .expect_err("empty schemaId should be rejected");

    match err {
        MomentsError::Api { status, .. } => assert_eq!(status.as_u16(), 400),
        other => panic!("expected Api error, got: {:?}", other),
    }

    // ========================================================================
    // Step 3: Only the accepted moment was recorded
    // ========================================================================
    let recorded = context.moments();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].schema_id, "sch_fGk2x");
    assert_eq!(recorded[0].project_id, "prj_9fH3t");
    assert_eq!(recorded[0].data["message"], json!("hello world"));

    server.close().await.expect("stub server shutdown");
}
