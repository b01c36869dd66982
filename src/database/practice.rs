// ABOUTME: Practice session and per-practice aggregate database operations
// ABOUTME: Session inserts, history queries, and read-modify-write aggregate upserts

use super::Database;
use crate::models::{BodyZone, PracticeSession, PracticeStats, PracticeType};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create practice session and aggregate tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_practice(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS practice_sessions (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                practice TEXT NOT NULL CHECK (practice IN ('meditation', 'yoga', 'massage', 'breathing')),
                content_id TEXT,
                duration_seconds INTEGER NOT NULL,
                body_zone TEXT,
                completed_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS practice_stats (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                practice TEXT NOT NULL,
                session_count INTEGER NOT NULL DEFAULT 0,
                total_minutes INTEGER NOT NULL DEFAULT 0,
                last_session_at DATETIME,
                PRIMARY KEY (user_id, practice)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_sessions_user_completed ON practice_sessions(user_id, completed_at)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a completed practice session
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn insert_session(&self, session: &PracticeSession) -> Result<Uuid> {
        sqlx::query(
            r"
            INSERT INTO practice_sessions (
                id, user_id, practice, content_id, duration_seconds, body_zone, completed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(session.id.to_string())
        .bind(session.user_id.to_string())
        .bind(session.practice.as_str())
        .bind(session.content_id.map(|id| id.to_string()))
        .bind(session.duration_seconds)
        .bind(session.body_zone.map(|zone| zone.as_str()))
        .bind(session.completed_at)
        .execute(&self.pool)
        .await?;

        Ok(session.id)
    }

    /// Count all completed sessions for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn count_sessions(&self, user_id: Uuid) -> Result<i64> {
        let count =
            sqlx::query_scalar("SELECT COUNT(*) FROM practice_sessions WHERE user_id = $1")
                .bind(user_id.to_string())
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Get recent sessions for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_recent_sessions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<PracticeSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, practice, content_id, duration_seconds, body_zone, completed_at
            FROM practice_sessions
            WHERE user_id = $1
            ORDER BY completed_at DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_session).collect()
    }

    /// Get sessions of one practice type completed after a cutoff, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_sessions_since(
        &self,
        user_id: Uuid,
        practice: PracticeType,
        since: DateTime<Utc>,
    ) -> Result<Vec<PracticeSession>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, practice, content_id, duration_seconds, body_zone, completed_at
            FROM practice_sessions
            WHERE user_id = $1 AND practice = $2 AND completed_at >= $3
            ORDER BY completed_at DESC
            ",
        )
        .bind(user_id.to_string())
        .bind(practice.as_str())
        .bind(since)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_session).collect()
    }

    /// Convert a database row to a `PracticeSession`
    fn row_to_session(row: &sqlx::sqlite::SqliteRow) -> Result<PracticeSession> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let practice: String = row.get("practice");
        let content_id: Option<String> = row.get("content_id");
        let duration_seconds: i64 = row.get("duration_seconds");
        let body_zone: Option<String> = row.get("body_zone");
        let completed_at: DateTime<Utc> = row.get("completed_at");

        Ok(PracticeSession {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            practice: practice.parse()?,
            content_id: content_id.map(|id| Uuid::parse_str(&id)).transpose()?,
            duration_seconds,
            body_zone: body_zone.map(|zone| zone.parse::<BodyZone>()).transpose()?,
            completed_at,
        })
    }

    /// Get the per-practice aggregate for a user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_practice_stats(
        &self,
        user_id: Uuid,
        practice: PracticeType,
    ) -> Result<Option<PracticeStats>> {
        let row = sqlx::query(
            r"
            SELECT user_id, practice, session_count, total_minutes, last_session_at
            FROM practice_stats
            WHERE user_id = $1 AND practice = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(practice.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_practice_stats).transpose()
    }

    /// List every per-practice aggregate for a user
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_practice_stats(&self, user_id: Uuid) -> Result<Vec<PracticeStats>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, practice, session_count, total_minutes, last_session_at
            FROM practice_stats
            WHERE user_id = $1
            ORDER BY practice
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_practice_stats).collect()
    }

    /// Write back a per-practice aggregate (read-modify-write upsert)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn upsert_practice_stats(&self, stats: &PracticeStats) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO practice_stats (user_id, practice, session_count, total_minutes, last_session_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT(user_id, practice) DO UPDATE SET
                session_count = $3,
                total_minutes = $4,
                last_session_at = $5
            ",
        )
        .bind(stats.user_id.to_string())
        .bind(stats.practice.as_str())
        .bind(stats.session_count)
        .bind(stats.total_minutes)
        .bind(stats.last_session_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Convert a database row to a `PracticeStats`
    fn row_to_practice_stats(row: &sqlx::sqlite::SqliteRow) -> Result<PracticeStats> {
        let user_id: String = row.get("user_id");
        let practice: String = row.get("practice");

        Ok(PracticeStats {
            user_id: Uuid::parse_str(&user_id)?,
            practice: practice.parse()?,
            session_count: row.get("session_count"),
            total_minutes: row.get("total_minutes"),
            last_session_at: row.get("last_session_at"),
        })
    }
}
