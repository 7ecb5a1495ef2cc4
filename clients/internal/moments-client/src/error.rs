// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright 2026 Edgecast Cloud LLC.

//! Error types for moments-client

use moments_api::ValidationErrors;
use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the moments API
#[derive(Debug, Error)]
pub enum MomentsError {
    /// The HTTP round-trip itself failed (connect, timeout, body decode)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service rejected the request with a structured error body
    #[error("moments API rejected the request ({status}): {}", .errors.message)]
    Api {
        status: StatusCode,
        errors: ValidationErrors,
    },

    /// The service returned a non-success status with an unrecognized body
    #[error("moments API returned unexpected response ({status})")]
    UnexpectedResponse { status: StatusCode, body: String },

    /// Configuration error (bad base path, unusable access token)
    #[error("configuration error: {0}")]
    Config(String),
}
