// ABOUTME: Daily journal database operations
// ABOUTME: One-entry-per-day upserts with gratitude list normalization

use super::Database;
use crate::models::journal::sanitize_gratitudes;
use crate::models::DailyJournalEntry;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create the journal table
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_journal(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS daily_journal_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                entry_date DATE NOT NULL,
                mood INTEGER,
                body TEXT,
                gratitudes TEXT NOT NULL DEFAULT '[]',
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (user_id, entry_date)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or update the entry for one user/day
    ///
    /// The gratitude list is normalized before writing: blank entries are
    /// dropped and the list is capped at three.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or JSON serialization fails
    pub async fn upsert_journal_entry(&self, entry: &DailyJournalEntry) -> Result<()> {
        let gratitudes = sanitize_gratitudes(entry.gratitudes.clone());

        sqlx::query(
            r"
            INSERT INTO daily_journal_entries (
                id, user_id, entry_date, mood, body, gratitudes, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, CURRENT_TIMESTAMP)
            ON CONFLICT(user_id, entry_date) DO UPDATE SET
                mood = $4,
                body = $5,
                gratitudes = $6,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.to_string())
        .bind(entry.entry_date)
        .bind(entry.mood)
        .bind(&entry.body)
        .bind(serde_json::to_string(&gratitudes)?)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get the entry for one user/day
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_journal_entry(
        &self,
        user_id: Uuid,
        entry_date: NaiveDate,
    ) -> Result<Option<DailyJournalEntry>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, entry_date, mood, body, gratitudes, created_at, updated_at
            FROM daily_journal_entries
            WHERE user_id = $1 AND entry_date = $2
            ",
        )
        .bind(user_id.to_string())
        .bind(entry_date)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_journal_entry).transpose()
    }

    /// List entries in an inclusive date range, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_journal_entries(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyJournalEntry>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, entry_date, mood, body, gratitudes, created_at, updated_at
            FROM daily_journal_entries
            WHERE user_id = $1 AND entry_date >= $2 AND entry_date <= $3
            ORDER BY entry_date
            ",
        )
        .bind(user_id.to_string())
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_journal_entry).collect()
    }

    /// Convert a database row to a `DailyJournalEntry`
    fn row_to_journal_entry(row: &sqlx::sqlite::SqliteRow) -> Result<DailyJournalEntry> {
        let id: String = row.get("id");
        let user_id: String = row.get("user_id");
        let entry_date: NaiveDate = row.get("entry_date");
        let gratitudes: String = row.get("gratitudes");
        let created_at: DateTime<Utc> = row.get("created_at");
        let updated_at: DateTime<Utc> = row.get("updated_at");

        Ok(DailyJournalEntry {
            id: Uuid::parse_str(&id)?,
            user_id: Uuid::parse_str(&user_id)?,
            entry_date,
            mood: row.get("mood"),
            body: row.get("body"),
            gratitudes: serde_json::from_str(&gratitudes)?,
            created_at,
            updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::{DailyJournalEntry, User};
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_upsert_caps_gratitudes_at_three() {
        let db = create_test_db().await.unwrap();
        let user = User::new("j@example.com".into(), "hash".into(), None);
        db.create_user(&user).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let entry = DailyJournalEntry::new(
            user.id,
            date,
            Some(4),
            Some("calm morning".into()),
            vec![
                "tea".into(),
                "sun".into(),
                "quiet".into(),
                "extra entry".into(),
            ],
        );
        db.upsert_journal_entry(&entry).await.unwrap();

        let fetched = db.get_journal_entry(user.id, date).await.unwrap().unwrap();
        assert_eq!(fetched.gratitudes.len(), 3);
        assert_eq!(fetched.gratitudes, vec!["tea", "sun", "quiet"]);
    }

    #[tokio::test]
    async fn test_second_upsert_replaces_same_day() {
        let db = create_test_db().await.unwrap();
        let user = User::new("j2@example.com".into(), "hash".into(), None);
        db.create_user(&user).await.unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let first = DailyJournalEntry::new(user.id, date, Some(2), None, vec![]);
        db.upsert_journal_entry(&first).await.unwrap();

        let second =
            DailyJournalEntry::new(user.id, date, Some(5), Some("better".into()), vec![]);
        db.upsert_journal_entry(&second).await.unwrap();

        let fetched = db.get_journal_entry(user.id, date).await.unwrap().unwrap();
        assert_eq!(fetched.mood, Some(5));
        assert_eq!(fetched.body.as_deref(), Some("better"));

        let listed = db
            .list_journal_entries(user.id, date, date)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
    }
}
