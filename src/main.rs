// SPDX-License-Identifier: MIT
// Copyright 2026 Mateen IT Corp

//! MITC site server
//!
//! Serves the public marketing pages, account pages and the admin console.

use mitc_site::{config::Config, db::FirestoreDb, services::IdentityClient, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, site_url = %config.site_url, "Starting MITC site");

    // Without Firebase config the server still runs; data access reports errors
    let db = match config.project_id() {
        Some(project_id) => FirestoreDb::new(project_id).await?,
        None => {
            tracing::warn!("Firestore not initialized, database access disabled");
            FirestoreDb::new_mock()
        }
    };

    let identity = IdentityClient::new(&config)?;
    if config.google_client_id.is_none() {
        tracing::info!("GOOGLE_CLIENT_ID not set, Google sign-in button hidden");
    }

    // Build shared state
    let state = Arc::new(AppState::new(config.clone(), db, identity));

    // Build router
    let app = mitc_site::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["mitc_site=debug", "info"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
