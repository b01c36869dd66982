// ABOUTME: Global user statistics database operations
// ABOUTME: Denormalized per-user counters for sessions, minutes, and streaks

use super::Database;
use crate::models::UserStats;
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the global aggregate table
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_stats(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_stats (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                total_sessions INTEGER NOT NULL DEFAULT 0,
                total_minutes INTEGER NOT NULL DEFAULT 0,
                streak_days INTEGER NOT NULL DEFAULT 0,
                longest_streak INTEGER NOT NULL DEFAULT 0,
                last_practice_at DATETIME,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the global aggregate row for a user, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_stats(&self, user_id: Uuid) -> Result<Option<UserStats>> {
        let row = sqlx::query(
            r"
            SELECT user_id, total_sessions, total_minutes, streak_days,
                   longest_streak, last_practice_at, updated_at
            FROM user_stats
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_user_stats).transpose()
    }

    /// Write back the global aggregate row (read-modify-write upsert)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn upsert_user_stats(&self, stats: &UserStats) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO user_stats (
                user_id, total_sessions, total_minutes, streak_days,
                longest_streak, last_practice_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT(user_id) DO UPDATE SET
                total_sessions = $2,
                total_minutes = $3,
                streak_days = $4,
                longest_streak = $5,
                last_practice_at = $6,
                updated_at = $7
            ",
        )
        .bind(stats.user_id.to_string())
        .bind(stats.total_sessions)
        .bind(stats.total_minutes)
        .bind(stats.streak_days)
        .bind(stats.longest_streak)
        .bind(stats.last_practice_at)
        .bind(stats.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Convert a database row to a `UserStats`
    fn row_to_user_stats(row: &sqlx::sqlite::SqliteRow) -> Result<UserStats> {
        let user_id: String = row.get("user_id");
        let last_practice_at: Option<DateTime<Utc>> = row.get("last_practice_at");
        let updated_at: DateTime<Utc> = row.get("updated_at");

        Ok(UserStats {
            user_id: Uuid::parse_str(&user_id)?,
            total_sessions: row.get("total_sessions"),
            total_minutes: row.get("total_minutes"),
            streak_days: row.get("streak_days"),
            longest_streak: row.get("longest_streak"),
            last_practice_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::{User, UserStats};
    use chrono::Utc;

    #[tokio::test]
    async fn test_user_stats_round_trip() {
        let db = create_test_db().await.unwrap();
        let user = User::new("stats@example.com".into(), "hash".into(), None);
        db.create_user(&user).await.unwrap();

        assert!(db.get_user_stats(user.id).await.unwrap().is_none());

        let mut stats = UserStats::empty(user.id);
        stats.total_sessions = 3;
        stats.total_minutes = 42;
        stats.streak_days = 2;
        stats.longest_streak = 5;
        stats.last_practice_at = Some(Utc::now());
        db.upsert_user_stats(&stats).await.unwrap();

        let fetched = db.get_user_stats(user.id).await.unwrap().unwrap();
        assert_eq!(fetched.total_sessions, 3);
        assert_eq!(fetched.streak_days, 2);
        assert_eq!(fetched.longest_streak, 5);
        assert!(fetched.last_practice_at.is_some());
    }
}
