// ABOUTME: HTTP server assembly for the Ora wellness API
// ABOUTME: Router wiring, middleware layers, and graceful shutdown
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! Router assembly and server lifecycle.

use crate::middleware::require_auth;
use crate::resources::ServerResources;
use crate::routes::{
    auth, content, health, journal, onboarding, practice, recommendations, stats,
};
use anyhow::Result;
use axum::http::HeaderValue;
use axum::middleware as axum_middleware;
use axum::routing::{get, post, put};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Request timeout applied to every route
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Build the CORS layer from the configured origin list
fn cors_layer(resources: &ServerResources) -> CorsLayer {
    let origins = &resources.config.cors_origins;

    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Assemble the full application router
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let public = Router::new()
        .route("/api/health", get(health::handle_health))
        .route("/api/auth/register", post(auth::handle_register))
        .route("/api/auth/login", post(auth::handle_login))
        .route("/api/auth/google", post(auth::handle_google_login))
        .route("/api/onboarding/flow", get(onboarding::handle_flow));

    let protected = Router::new()
        .route("/api/auth/me", get(auth::handle_me))
        .route("/api/sessions", post(practice::handle_record_session))
        .route(
            "/api/sessions/recent",
            get(practice::handle_recent_sessions),
        )
        .route("/api/stats", get(stats::handle_user_stats))
        .route("/api/stats/practices", get(stats::handle_practice_stats))
        .route("/api/content", get(content::handle_list_content))
        .route("/api/content/:id", get(content::handle_get_content))
        .route("/api/programs", get(content::handle_list_programs))
        .route("/api/programs/:id", get(content::handle_get_program))
        .route(
            "/api/subcategories",
            get(content::handle_list_subcategories),
        )
        .route("/api/journal", get(journal::handle_list_entries))
        .route(
            "/api/journal/:date",
            put(journal::handle_upsert_entry).get(journal::handle_get_entry),
        )
        .route(
            "/api/onboarding/answers",
            post(onboarding::handle_submit_answers),
        )
        .route(
            "/api/recommendations/massage",
            get(recommendations::handle_massage_recommendations),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            Arc::clone(&resources),
            require_auth,
        ));

    public
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(REQUEST_TIMEOUT_SECS)))
        .layer(cors_layer(&resources))
        .with_state(resources)
}

/// Bind and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if binding the listener or serving fails
pub async fn run(resources: Arc<ServerResources>) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], resources.config.http_port));
    let app = build_router(Arc::clone(&resources));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Ora HTTP server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Ora HTTP server stopped");
    Ok(())
}

/// Resolve when the process receives ctrl-c
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
