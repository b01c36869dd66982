// ABOUTME: Practice session recording pipeline with aggregate maintenance
// ABOUTME: Streak tracking, milestone detection, and best-effort notifications
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! # Practice Statistics Pipeline
//!
//! Recording a completed session performs, in order: the session insert,
//! first-session detection, a read-modify-write of the per-practice aggregate,
//! and a read-modify-write of the global aggregate that captures the previous
//! streak value. When the streak crosses a fixed milestone, a best-effort
//! email is scheduled on a background task; delivery failures are logged and
//! swallowed and never fail the recording call.

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{
    BodyZone, PracticeSession, PracticeStats, PracticeType, User, UserStats,
};
use crate::notifications::{EmailMessage, EmailNotifier};
use crate::utils::days_between;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Streak day counts that trigger a congratulation email, ascending
pub const STREAK_MILESTONES: [i64; 7] = [7, 14, 30, 60, 90, 180, 365];

/// Service owning the session-recording pipeline
pub struct PracticeService {
    database: Arc<Database>,
    notifier: Arc<dyn EmailNotifier>,
    // Serializes the aggregate read-modify-writes; concurrent recordings
    // from several devices must not interleave between read and write.
    stats_lock: Mutex<()>,
}

impl PracticeService {
    /// Create a new practice service
    #[must_use]
    pub fn new(database: Arc<Database>, notifier: Arc<dyn EmailNotifier>) -> Self {
        Self {
            database,
            notifier,
            stats_lock: Mutex::new(()),
        }
    }

    /// Record a completed session and update every aggregate
    ///
    /// Returns the refreshed global statistics snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the duration is not positive or a database
    /// operation fails. Notification failures are never surfaced.
    pub async fn record_session(
        &self,
        user: &User,
        practice: PracticeType,
        content_id: Option<uuid::Uuid>,
        duration_seconds: i64,
        body_zone: Option<BodyZone>,
    ) -> AppResult<UserStats> {
        if duration_seconds <= 0 {
            return Err(AppError::invalid_input(
                "Session duration must be positive",
            ));
        }

        let session =
            PracticeSession::new(user.id, practice, content_id, duration_seconds, body_zone);

        self.database
            .insert_session(&session)
            .await
            .map_err(|e| AppError::database(format!("Failed to record session: {e}")))?;

        let session_count = self
            .database
            .count_sessions(user.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to count sessions: {e}")))?;
        let is_first_session = session_count == 1;

        let (old_streak, stats) = {
            let _guard = self.stats_lock.lock().await;

            self.update_practice_aggregate(&session).await?;
            self.update_global_aggregate(&session).await?
        };

        AppLogger::log_session_recorded(&user.id.to_string(), practice.as_str(), duration_seconds);
        info!(
            user.id = %user.id,
            stats.streak_days = stats.streak_days,
            stats.total_sessions = stats.total_sessions,
            "Aggregates updated"
        );

        if is_first_session {
            self.schedule_email(EmailMessage::first_session(
                &user.email,
                user.display_name.as_deref(),
            ));
        }

        for milestone in crossed_milestones(old_streak, stats.streak_days) {
            self.schedule_email(EmailMessage::streak_milestone(
                &user.email,
                user.display_name.as_deref(),
                milestone,
            ));
        }

        Ok(stats)
    }

    /// Global statistics snapshot, zero-valued when the user never practiced
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn user_stats(&self, user_id: uuid::Uuid) -> AppResult<UserStats> {
        let stats = self
            .database
            .get_user_stats(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load stats: {e}")))?;
        Ok(stats.unwrap_or_else(|| UserStats::empty(user_id)))
    }

    /// Every per-practice aggregate for the user
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn practice_stats(&self, user_id: uuid::Uuid) -> AppResult<Vec<PracticeStats>> {
        self.database
            .list_practice_stats(user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to load practice stats: {e}")))
    }

    /// Read-modify-write of the per-practice-type aggregate
    async fn update_practice_aggregate(&self, session: &PracticeSession) -> AppResult<()> {
        let mut stats = self
            .database
            .get_practice_stats(session.user_id, session.practice)
            .await
            .map_err(|e| AppError::database(format!("Failed to read practice aggregate: {e}")))?
            .unwrap_or_else(|| PracticeStats::empty(session.user_id, session.practice));

        stats.session_count += 1;
        stats.total_minutes += session.duration_minutes();
        stats.last_session_at = Some(session.completed_at);

        self.database
            .upsert_practice_stats(&stats)
            .await
            .map_err(|e| AppError::database(format!("Failed to write practice aggregate: {e}")))
    }

    /// Read-modify-write of the global aggregate, returning the streak value
    /// observed before the update alongside the refreshed row
    async fn update_global_aggregate(
        &self,
        session: &PracticeSession,
    ) -> AppResult<(i64, UserStats)> {
        let mut stats = self
            .database
            .get_user_stats(session.user_id)
            .await
            .map_err(|e| AppError::database(format!("Failed to read stats: {e}")))?
            .unwrap_or_else(|| UserStats::empty(session.user_id));

        let old_streak = stats.streak_days;

        stats.total_sessions += 1;
        stats.total_minutes += session.duration_minutes();
        stats.streak_days = next_streak(
            stats.last_practice_at,
            stats.streak_days,
            session.completed_at,
        );
        stats.longest_streak = stats.longest_streak.max(stats.streak_days);
        stats.last_practice_at = Some(session.completed_at);
        stats.updated_at = Utc::now();

        self.database
            .upsert_user_stats(&stats)
            .await
            .map_err(|e| AppError::database(format!("Failed to write stats: {e}")))?;

        Ok((old_streak, stats))
    }

    /// Fire-and-forget email delivery on a background task
    fn schedule_email(&self, message: EmailMessage) {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            match notifier.send(&message).await {
                Ok(()) => AppLogger::log_notification(&message.to, &message.subject, true),
                Err(e) => {
                    warn!(error = %e, "Notification email failed; dropping");
                    AppLogger::log_notification(&message.to, &message.subject, false);
                }
            }
        });
    }
}

/// Streak value after a session completed at `now`
///
/// Same UTC day leaves the streak unchanged, the day after extends it, and
/// any longer gap resets to one. A user who never practiced starts at one.
fn next_streak(
    last_practice_at: Option<DateTime<Utc>>,
    streak_days: i64,
    now: DateTime<Utc>,
) -> i64 {
    match last_practice_at {
        None => 1,
        Some(last) => match days_between(last, now) {
            d if d <= 0 => streak_days.max(1),
            1 => streak_days + 1,
            _ => 1,
        },
    }
}

/// Milestones crossed by moving from `old` to `new` streak days, ascending
fn crossed_milestones(old: i64, new: i64) -> Vec<i64> {
    STREAK_MILESTONES
        .iter()
        .copied()
        .filter(|&milestone| old < milestone && new >= milestone)
        .collect()
}
