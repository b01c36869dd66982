// ABOUTME: Massage recommendation route handlers
// ABOUTME: Serves the ranked suggestion list from the heuristic engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::errors::AppResult;
use crate::middleware::CurrentUser;
use crate::recommendations::{MassageRecommendation, RecommendationEngineTrait};
use crate::resources::ServerResources;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::Utc;
use std::sync::Arc;

/// `GET /api/recommendations/massage`
pub async fn handle_massage_recommendations(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    let recommendations: Vec<MassageRecommendation> = resources
        .recommendation_engine
        .recommend(user.id, Utc::now())
        .await?;

    Ok(Json(recommendations))
}
