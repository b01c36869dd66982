// ABOUTME: Practice session recording route handlers
// ABOUTME: Thin wrappers over the practice statistics pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::errors::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{BodyZone, PracticeSession, PracticeType, UserStats};
use crate::resources::ServerResources;
use crate::utils::format_minutes;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Session recording request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionRequest {
    pub practice: PracticeType,
    pub content_id: Option<Uuid>,
    pub duration_seconds: i64,
    pub body_zone: Option<BodyZone>,
}

/// Refreshed statistics snapshot returned after recording
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSessionResponse {
    pub total_sessions: i64,
    pub total_minutes: i64,
    pub streak_days: i64,
    pub longest_streak: i64,
    pub formatted_total_time: String,
}

impl From<&UserStats> for RecordSessionResponse {
    fn from(stats: &UserStats) -> Self {
        Self {
            total_sessions: stats.total_sessions,
            total_minutes: stats.total_minutes,
            streak_days: stats.streak_days,
            longest_streak: stats.longest_streak,
            formatted_total_time: format_minutes(stats.total_minutes),
        }
    }
}

/// Query parameters for recent session history
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentSessionsQuery {
    pub limit: Option<i64>,
}

/// One session in the history response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub practice: PracticeType,
    pub content_id: Option<String>,
    pub duration_seconds: i64,
    pub body_zone: Option<BodyZone>,
    pub completed_at: String,
}

impl From<&PracticeSession> for SessionSummary {
    fn from(session: &PracticeSession) -> Self {
        Self {
            id: session.id.to_string(),
            practice: session.practice,
            content_id: session.content_id.map(|id| id.to_string()),
            duration_seconds: session.duration_seconds,
            body_zone: session.body_zone,
            completed_at: session.completed_at.to_rfc3339(),
        }
    }
}

/// `POST /api/sessions`
pub async fn handle_record_session(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<RecordSessionRequest>,
) -> AppResult<impl IntoResponse> {
    let stats = resources
        .practice_service
        .record_session(
            &user,
            request.practice,
            request.content_id,
            request.duration_seconds,
            request.body_zone,
        )
        .await?;

    Ok(Json(RecordSessionResponse::from(&stats)))
}

/// `GET /api/sessions/recent`
pub async fn handle_recent_sessions(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<RecentSessionsQuery>,
) -> AppResult<impl IntoResponse> {
    let limit = params.limit.unwrap_or(20).clamp(1, 100);
    let sessions = resources
        .database
        .get_recent_sessions(user.id, limit)
        .await
        .map_err(|e| {
            crate::errors::AppError::database(format!("Failed to load sessions: {e}"))
        })?;

    let summaries: Vec<SessionSummary> = sessions.iter().map(SessionSummary::from).collect();
    Ok(Json(summaries))
}
