// ABOUTME: Daily journal route handlers
// ABOUTME: Upsert and fetch of per-day entries with gratitude list handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::errors::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::DailyJournalEntry;
use crate::resources::ServerResources;
use crate::utils::validation_error;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Journal entry upsert request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertJournalRequest {
    pub mood: Option<i64>,
    pub body: Option<String>,
    #[serde(default)]
    pub gratitudes: Vec<String>,
}

/// Journal entry response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntryResponse {
    pub entry_date: String,
    pub mood: Option<i64>,
    pub body: Option<String>,
    pub gratitudes: Vec<String>,
    pub updated_at: String,
}

impl From<&DailyJournalEntry> for JournalEntryResponse {
    fn from(entry: &DailyJournalEntry) -> Self {
        Self {
            entry_date: entry.entry_date.to_string(),
            mood: entry.mood,
            body: entry.body.clone(),
            gratitudes: entry.gratitudes.clone(),
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }
}

/// Date-range query for journal history
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalRangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Parse a path segment as an ISO calendar date
fn parse_entry_date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse()
        .map_err(|_| validation_error(&format!("'{raw}' is not a valid date (expected YYYY-MM-DD)")))
}

/// Validate the optional mood rating
fn validate_mood(mood: Option<i64>) -> AppResult<()> {
    if let Some(value) = mood {
        if !(1..=5).contains(&value) {
            return Err(validation_error("Mood must be between 1 and 5"));
        }
    }
    Ok(())
}

/// `PUT /api/journal/{date}`
pub async fn handle_upsert_entry(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(date): Path<String>,
    Json(request): Json<UpsertJournalRequest>,
) -> AppResult<impl IntoResponse> {
    let entry_date = parse_entry_date(&date)?;
    validate_mood(request.mood)?;

    let entry = DailyJournalEntry::new(
        user.id,
        entry_date,
        request.mood,
        request.body.filter(|body| !body.trim().is_empty()),
        request.gratitudes,
    );

    resources
        .database
        .upsert_journal_entry(&entry)
        .await
        .map_err(|e| AppError::database(format!("Failed to save journal entry: {e}")))?;

    let saved = resources
        .database
        .get_journal_entry(user.id, entry_date)
        .await
        .map_err(|e| AppError::database(format!("Failed to reload journal entry: {e}")))?
        .ok_or_else(|| AppError::internal("Journal entry missing after save"))?;

    Ok(Json(JournalEntryResponse::from(&saved)))
}

/// `GET /api/journal/{date}`
pub async fn handle_get_entry(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(date): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entry_date = parse_entry_date(&date)?;

    let entry = resources
        .database
        .get_journal_entry(user.id, entry_date)
        .await
        .map_err(|e| AppError::database(format!("Failed to load journal entry: {e}")))?
        .ok_or_else(|| AppError::not_found("Journal entry").with_resource_id(date))?;

    Ok(Json(JournalEntryResponse::from(&entry)))
}

/// `GET /api/journal?from=&to=`
pub async fn handle_list_entries(
    State(resources): State<Arc<ServerResources>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(params): Query<JournalRangeQuery>,
) -> AppResult<impl IntoResponse> {
    if params.from > params.to {
        return Err(validation_error("'from' must not be after 'to'"));
    }

    let entries = resources
        .database
        .list_journal_entries(user.id, params.from, params.to)
        .await
        .map_err(|e| AppError::database(format!("Failed to list journal entries: {e}")))?;

    let response: Vec<JournalEntryResponse> =
        entries.iter().map(JournalEntryResponse::from).collect();
    Ok(Json(response))
}
