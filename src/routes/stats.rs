// ABOUTME: Aggregate statistics route handlers
// ABOUTME: Global and per-practice counters for profile display
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::errors::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{PracticeStats, PracticeType, UserStats};
use crate::resources::ServerResources;
use crate::utils::format_minutes;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

/// Global statistics response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStatsResponse {
    pub total_sessions: i64,
    pub total_minutes: i64,
    pub streak_days: i64,
    pub longest_streak: i64,
    pub last_practice_at: Option<String>,
    pub formatted_total_time: String,
}

impl From<&UserStats> for UserStatsResponse {
    fn from(stats: &UserStats) -> Self {
        Self {
            total_sessions: stats.total_sessions,
            total_minutes: stats.total_minutes,
            streak_days: stats.streak_days,
            longest_streak: stats.longest_streak,
            last_practice_at: stats.last_practice_at.map(|at| at.to_rfc3339()),
            formatted_total_time: format_minutes(stats.total_minutes),
        }
    }
}

/// Per-practice aggregate response entry
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeStatsResponse {
    pub practice: PracticeType,
    pub session_count: i64,
    pub total_minutes: i64,
    pub last_session_at: Option<String>,
    pub formatted_total_time: String,
}

impl From<&PracticeStats> for PracticeStatsResponse {
    fn from(stats: &PracticeStats) -> Self {
        Self {
            practice: stats.practice,
            session_count: stats.session_count,
            total_minutes: stats.total_minutes,
            last_session_at: stats.last_session_at.map(|at| at.to_rfc3339()),
            formatted_total_time: format_minutes(stats.total_minutes),
        }
    }
}

/// `GET /api/stats`
pub async fn handle_user_stats(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let stats = resources.practice_service.user_stats(user.id).await?;
    Ok(Json(UserStatsResponse::from(&stats)))
}

/// `GET /api/stats/practices`
pub async fn handle_practice_stats(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let stats = resources.practice_service.practice_stats(user.id).await?;
    let response: Vec<PracticeStatsResponse> =
        stats.iter().map(PracticeStatsResponse::from).collect();
    Ok(Json(response))
}
