// ABOUTME: Onboarding flow and answer submission route handlers
// ABOUTME: Serves the merged question/screen sequence and records validated answers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::errors::AppResult;
use crate::middleware::CurrentUser;
use crate::models::{AnswerValue, OnboardingStep};
use crate::resources::ServerResources;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// One submitted answer
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    pub answer: AnswerValue,
}

/// Answer submission request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersRequest {
    pub answers: Vec<SubmittedAnswer>,
}

/// Answer submission response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAnswersResponse {
    pub stored: usize,
    pub message: String,
}

/// `GET /api/onboarding/flow`
pub async fn handle_flow(
    State(resources): State<Arc<ServerResources>>,
) -> AppResult<impl IntoResponse> {
    let steps: Vec<OnboardingStep> = resources.onboarding_service.flow().await?;
    Ok(Json(steps))
}

/// `POST /api/onboarding/answers`
pub async fn handle_submit_answers(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(request): Json<SubmitAnswersRequest>,
) -> AppResult<impl IntoResponse> {
    let answers = request
        .answers
        .into_iter()
        .map(|submitted| (submitted.question_id, submitted.answer))
        .collect();

    let stored = resources
        .onboarding_service
        .submit_answers(user.id, answers)
        .await?;

    Ok(Json(SubmitAnswersResponse {
        stored,
        message: "Onboarding answers saved".into(),
    }))
}
