// ABOUTME: Practice session records and denormalized statistics aggregates
// ABOUTME: PracticeType, BodyZone, PracticeSession, PracticeStats, and UserStats definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Kind of guided practice a session belongs to
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PracticeType {
    /// Guided meditation
    Meditation,
    /// Yoga flows
    Yoga,
    /// Self-massage routines
    Massage,
    /// Breathing exercises
    Breathing,
}

impl PracticeType {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Meditation => "meditation",
            Self::Yoga => "yoga",
            Self::Massage => "massage",
            Self::Breathing => "breathing",
        }
    }
}

impl Display for PracticeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "meditation" => Ok(Self::Meditation),
            "yoga" => Ok(Self::Yoga),
            "massage" => Ok(Self::Massage),
            "breathing" => Ok(Self::Breathing),
            _ => Err(AppError::invalid_input(format!(
                "Invalid practice type: {s}"
            ))),
        }
    }
}

/// Body zone targeted by a massage routine
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BodyZone {
    Head,
    Face,
    Neck,
    Shoulders,
    Back,
    LowerBack,
    Hands,
    Legs,
    Feet,
}

impl BodyZone {
    /// All zones, in catalog order
    pub const ALL: [Self; 9] = [
        Self::Head,
        Self::Face,
        Self::Neck,
        Self::Shoulders,
        Self::Back,
        Self::LowerBack,
        Self::Hands,
        Self::Legs,
        Self::Feet,
    ];

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Face => "face",
            Self::Neck => "neck",
            Self::Shoulders => "shoulders",
            Self::Back => "back",
            Self::LowerBack => "lower_back",
            Self::Hands => "hands",
            Self::Legs => "legs",
            Self::Feet => "feet",
        }
    }
}

impl Display for BodyZone {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyZone {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|zone| zone.as_str() == s)
            .copied()
            .ok_or_else(|| AppError::invalid_input(format!("Invalid body zone: {s}")))
    }
}

/// A completed practice session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeSession {
    /// Unique session identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Practice kind
    pub practice: PracticeType,
    /// Catalog entry the session played, if any
    pub content_id: Option<Uuid>,
    /// Session length in seconds
    pub duration_seconds: i64,
    /// Targeted body zone (massage sessions only)
    pub body_zone: Option<BodyZone>,
    /// Completion timestamp
    pub completed_at: DateTime<Utc>,
}

impl PracticeSession {
    /// Create a new session record completed now
    #[must_use]
    pub fn new(
        user_id: Uuid,
        practice: PracticeType,
        content_id: Option<Uuid>,
        duration_seconds: i64,
        body_zone: Option<BodyZone>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            practice,
            content_id,
            duration_seconds,
            body_zone,
            completed_at: Utc::now(),
        }
    }

    /// Session length in whole minutes, rounded down with a one-minute floor
    #[must_use]
    pub const fn duration_minutes(&self) -> i64 {
        let minutes = self.duration_seconds / 60;
        if minutes == 0 {
            1
        } else {
            minutes
        }
    }
}

/// Per-practice-type aggregate for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticeStats {
    /// Owning user
    pub user_id: Uuid,
    /// Practice kind this row aggregates
    pub practice: PracticeType,
    /// Completed session count
    pub session_count: i64,
    /// Total practiced minutes
    pub total_minutes: i64,
    /// Most recent session completion
    pub last_session_at: Option<DateTime<Utc>>,
}

impl PracticeStats {
    /// Zero-valued aggregate for a user/practice pair
    #[must_use]
    pub const fn empty(user_id: Uuid, practice: PracticeType) -> Self {
        Self {
            user_id,
            practice,
            session_count: 0,
            total_minutes: 0,
            last_session_at: None,
        }
    }
}

/// Global denormalized counters for one user, kept for fast profile display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserStats {
    /// Owning user
    pub user_id: Uuid,
    /// Completed session count across all practices
    pub total_sessions: i64,
    /// Total practiced minutes across all practices
    pub total_minutes: i64,
    /// Consecutive days with at least one completed session
    pub streak_days: i64,
    /// Longest streak ever reached
    pub longest_streak: i64,
    /// Most recent session completion
    pub last_practice_at: Option<DateTime<Utc>>,
    /// Last aggregate update
    pub updated_at: DateTime<Utc>,
}

impl UserStats {
    /// Zero-valued aggregate for a user who has never practiced
    #[must_use]
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            total_sessions: 0,
            total_minutes: 0,
            streak_days: 0,
            longest_streak: 0,
            last_practice_at: None,
            updated_at: Utc::now(),
        }
    }
}
