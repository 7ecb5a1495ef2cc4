// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

// Copyright 2026 Edgecast Cloud LLC.

//! Standalone stub moments server for testing and development
//!
//! Run with:
//! ```bash
//! cargo run -p moments-stub-server
//! ```
//!
//! Then point moments-client (or the CLI) at it:
//! ```bash
//! MOMENTS_BASE_PATH=http://localhost:9090 MOMENTS_ACCESS_TOKEN=tok_dev \
//!     cargo run -p moments-cli -- post --schema-id sch_dev --project-id prj_dev
//! ```

use anyhow::Result;
use dropshot::{ConfigDropshot, ConfigLogging, ConfigLoggingLevel, HttpServerStarter};
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use moments_stub_server::{StubContext, api_description};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(
            "moments_stub_server=info,dropshot=info",
        ))
        .init();

    let log_config = ConfigLogging::StderrTerminal {
        level: ConfigLoggingLevel::Info,
    };
    let log = log_config.to_logger("moments-stub-server")?;

    let context = Arc::new(StubContext::new());

    // Configure the server
    let config = ConfigDropshot {
        bind_address: SocketAddr::from((Ipv4Addr::LOCALHOST, 9090)),
        default_request_body_max_bytes: 1024 * 1024,
        default_handler_task_mode: dropshot::HandlerTaskMode::Detached,
        ..Default::default()
    };

    // Create and start the server
    let api = api_description().map_err(|e| anyhow::anyhow!(e))?;
    let server = HttpServerStarter::new(&config, api, context, &log)
        .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))?
        .start();

    tracing::info!("Stub moments server listening on http://localhost:9090");
    tracing::info!("Available endpoints:");
    tracing::info!("  POST /moments");

    server
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
