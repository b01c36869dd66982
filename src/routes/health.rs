// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness and readiness endpoints reporting database status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::errors::AppResult;
use crate::resources::ServerResources;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

/// Health status response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: &'static str,
}

/// `GET /api/health`
pub async fn handle_health(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<impl IntoResponse> {
    let database = match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(resources.database.pool())
        .await
    {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!("Health check database probe failed: {}", e);
            "unavailable"
        }
    };

    let status = if database == "ok" { "ok" } else { "degraded" };

    Ok(Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        database,
    }))
}
