// ABOUTME: Catalog browsing route handlers
// ABOUTME: Content, program, and subcategory listings with tag filtering and plan gating
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

//! Catalog routes.
//!
//! Tag filtering happens here, after the fetch, on the already-mapped models;
//! premium entries are listed for free-tier users but flagged as locked so
//! clients can render upsell tiles.

use crate::errors::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{ContentItem, PracticeType, Program, Subcategory};
use crate::resources::ServerResources;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Catalog listing query parameters
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentQuery {
    pub practice: Option<PracticeType>,
    pub subcategory: Option<Uuid>,
    /// Comma-separated tag list, any-match
    pub tags: Option<String>,
}

/// One catalog entry in a listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemResponse {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub practice: PracticeType,
    pub subcategory_id: Option<String>,
    pub duration_seconds: i64,
    pub audio_url: Option<String>,
    pub tags: Vec<String>,
    pub locked: bool,
}

impl ContentItemResponse {
    fn from_item(item: &ContentItem, locked: bool) -> Self {
        Self {
            id: item.id.to_string(),
            title: item.title.clone(),
            subtitle: item.subtitle.clone(),
            practice: item.practice,
            subcategory_id: item.subcategory_id.map(|id| id.to_string()),
            duration_seconds: item.duration_seconds,
            audio_url: if locked { None } else { item.audio_url.clone() },
            tags: item.tags.clone(),
            locked,
        }
    }
}

/// One program in a listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub practice: PracticeType,
    pub item_ids: Vec<String>,
    pub tags: Vec<String>,
    pub locked: bool,
}

impl ProgramResponse {
    fn from_program(program: &Program, locked: bool) -> Self {
        Self {
            id: program.id.to_string(),
            title: program.title.clone(),
            description: program.description.clone(),
            practice: program.practice,
            item_ids: program.item_ids.iter().map(ToString::to_string).collect(),
            tags: program.tags.clone(),
            locked,
        }
    }
}

/// One subcategory in a listing
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubcategoryResponse {
    pub id: String,
    pub title: String,
    pub practice: PracticeType,
}

impl From<&Subcategory> for SubcategoryResponse {
    fn from(subcategory: &Subcategory) -> Self {
        Self {
            id: subcategory.id.to_string(),
            title: subcategory.title.clone(),
            practice: subcategory.practice,
        }
    }
}

/// Split a comma-separated tag parameter into a clean list
fn parse_tags(raw: Option<&str>) -> Vec<String> {
    raw.map(|tags| {
        tags.split(',')
            .map(|tag| tag.trim().to_owned())
            .filter(|tag| !tag.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// `GET /api/content`
pub async fn handle_list_content(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<ContentQuery>,
) -> AppResult<impl IntoResponse> {
    let items = resources
        .database
        .list_content(params.practice, params.subcategory)
        .await
        .map_err(|e| AppError::database(format!("Failed to list content: {e}")))?;

    let wanted_tags = parse_tags(params.tags.as_deref());
    let response: Vec<ContentItemResponse> = items
        .iter()
        .filter(|item| item.matches_tags(&wanted_tags))
        .map(|item| ContentItemResponse::from_item(item, !item.unlocked_for(user.plan)))
        .collect();

    Ok(Json(response))
}

/// `GET /api/content/{id}`
pub async fn handle_get_content(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let item = resources
        .database
        .get_content_item(id)
        .await
        .map_err(|e| AppError::database(format!("Failed to load content: {e}")))?
        .ok_or_else(|| AppError::not_found("Content item").with_resource_id(id.to_string()))?;

    Ok(Json(ContentItemResponse::from_item(
        &item,
        !item.unlocked_for(user.plan),
    )))
}

/// `GET /api/programs`
pub async fn handle_list_programs(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<ContentQuery>,
) -> AppResult<impl IntoResponse> {
    let programs = resources
        .database
        .list_programs(params.practice)
        .await
        .map_err(|e| AppError::database(format!("Failed to list programs: {e}")))?;

    let wanted_tags = parse_tags(params.tags.as_deref());
    let response: Vec<ProgramResponse> = programs
        .iter()
        .filter(|program| program.matches_tags(&wanted_tags))
        .map(|program| ProgramResponse::from_program(program, !program.unlocked_for(user.plan)))
        .collect();

    Ok(Json(response))
}

/// `GET /api/programs/{id}`
pub async fn handle_get_program(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let program = resources
        .database
        .get_program(id)
        .await
        .map_err(|e| AppError::database(format!("Failed to load program: {e}")))?
        .ok_or_else(|| AppError::not_found("Program").with_resource_id(id.to_string()))?;

    Ok(Json(ProgramResponse::from_program(
        &program,
        !program.unlocked_for(user.plan),
    )))
}

/// `GET /api/subcategories`
pub async fn handle_list_subcategories(
    State(resources): State<Arc<ServerResources>>,
    Query(params): Query<ContentQuery>,
) -> AppResult<impl IntoResponse> {
    let subcategories = resources
        .database
        .list_subcategories(params.practice)
        .await
        .map_err(|e| AppError::database(format!("Failed to list subcategories: {e}")))?;

    let response: Vec<SubcategoryResponse> =
        subcategories.iter().map(SubcategoryResponse::from).collect();
    Ok(Json(response))
}
