// ABOUTME: Daily journal entry model with mood, free text, and gratitude list
// ABOUTME: Enforces the three-gratitude cap and blank-entry cleanup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum gratitude entries kept per day; extras are silently dropped
pub const MAX_GRATITUDES: usize = 3;

/// One journal entry per user per calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyJournalEntry {
    /// Unique entry identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Calendar day the entry belongs to
    pub entry_date: NaiveDate,
    /// Mood rating, 1 (low) to 5 (high)
    pub mood: Option<i64>,
    /// Free-form journal text
    pub body: Option<String>,
    /// Gratitude list, at most [`MAX_GRATITUDES`] entries
    pub gratitudes: Vec<String>,
    /// When the entry was first written
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated
    pub updated_at: DateTime<Utc>,
}

impl DailyJournalEntry {
    /// Create a fresh entry for a day, normalizing the gratitude list
    #[must_use]
    pub fn new(
        user_id: Uuid,
        entry_date: NaiveDate,
        mood: Option<i64>,
        body: Option<String>,
        gratitudes: Vec<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            entry_date,
            mood,
            body,
            gratitudes: sanitize_gratitudes(gratitudes),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Trim entries, drop blanks, cap the list at [`MAX_GRATITUDES`]
#[must_use]
pub fn sanitize_gratitudes(gratitudes: Vec<String>) -> Vec<String> {
    gratitudes
        .into_iter()
        .map(|g| g.trim().to_owned())
        .filter(|g| !g.is_empty())
        .take(MAX_GRATITUDES)
        .collect()
}
