// ABOUTME: Catalog database operations for content items, programs, and subcategories
// ABOUTME: Read-mostly listing queries ordered by sort key, with JSON tag columns

use super::Database;
use crate::models::{ContentItem, PracticeType, Program, Subcategory};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create catalog tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_content(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS content_items (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                subtitle TEXT,
                practice TEXT NOT NULL,
                subcategory_id TEXT,
                duration_seconds INTEGER NOT NULL DEFAULT 0,
                audio_url TEXT,
                tags TEXT NOT NULL DEFAULT '[]',
                required_plan TEXT NOT NULL DEFAULT 'free',
                sort_order INTEGER NOT NULL DEFAULT 0,
                is_published BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS programs (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                description TEXT,
                practice TEXT NOT NULL,
                item_ids TEXT NOT NULL DEFAULT '[]',
                tags TEXT NOT NULL DEFAULT '[]',
                required_plan TEXT NOT NULL DEFAULT 'free',
                sort_order INTEGER NOT NULL DEFAULT 0,
                is_published BOOLEAN NOT NULL DEFAULT 1,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS subcategories (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                practice TEXT NOT NULL,
                sort_order INTEGER NOT NULL DEFAULT 0
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_content_practice ON content_items(practice, sort_order)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace a content item (seeding and admin tooling)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or JSON serialization fails
    pub async fn upsert_content_item(&self, item: &ContentItem) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO content_items (
                id, title, subtitle, practice, subcategory_id, duration_seconds,
                audio_url, tags, required_plan, sort_order, is_published, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(item.id.to_string())
        .bind(&item.title)
        .bind(&item.subtitle)
        .bind(item.practice.as_str())
        .bind(item.subcategory_id.map(|id| id.to_string()))
        .bind(item.duration_seconds)
        .bind(&item.audio_url)
        .bind(serde_json::to_string(&item.tags)?)
        .bind(item.required_plan.as_str())
        .bind(item.sort_order)
        .bind(item.is_published)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List published content items, optionally narrowed to one practice or
    /// subcategory, ordered by sort key
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_content(
        &self,
        practice: Option<PracticeType>,
        subcategory_id: Option<Uuid>,
    ) -> Result<Vec<ContentItem>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, subtitle, practice, subcategory_id, duration_seconds,
                   audio_url, tags, required_plan, sort_order, is_published, created_at
            FROM content_items
            WHERE is_published = 1
              AND ($1 IS NULL OR practice = $1)
              AND ($2 IS NULL OR subcategory_id = $2)
            ORDER BY sort_order, created_at
            ",
        )
        .bind(practice.map(|p| p.as_str()))
        .bind(subcategory_id.map(|id| id.to_string()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_content_item).collect()
    }

    /// Get a single published content item
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_content_item(&self, id: Uuid) -> Result<Option<ContentItem>> {
        let row = sqlx::query(
            r"
            SELECT id, title, subtitle, practice, subcategory_id, duration_seconds,
                   audio_url, tags, required_plan, sort_order, is_published, created_at
            FROM content_items
            WHERE id = $1 AND is_published = 1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_content_item).transpose()
    }

    /// Convert a database row to a `ContentItem`
    fn row_to_content_item(row: &sqlx::sqlite::SqliteRow) -> Result<ContentItem> {
        let id: String = row.get("id");
        let practice: String = row.get("practice");
        let subcategory_id: Option<String> = row.get("subcategory_id");
        let tags: String = row.get("tags");
        let required_plan: String = row.get("required_plan");
        let created_at: DateTime<Utc> = row.get("created_at");

        Ok(ContentItem {
            id: Uuid::parse_str(&id)?,
            title: row.get("title"),
            subtitle: row.get("subtitle"),
            practice: practice.parse()?,
            subcategory_id: subcategory_id
                .map(|id| Uuid::parse_str(&id))
                .transpose()?,
            duration_seconds: row.get("duration_seconds"),
            audio_url: row.get("audio_url"),
            tags: serde_json::from_str(&tags)?,
            required_plan: required_plan.parse()?,
            sort_order: row.get("sort_order"),
            is_published: row.get("is_published"),
            created_at,
        })
    }

    /// Insert or replace a program (seeding and admin tooling)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or JSON serialization fails
    pub async fn upsert_program(&self, program: &Program) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO programs (
                id, title, description, practice, item_ids, tags,
                required_plan, sort_order, is_published, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(program.id.to_string())
        .bind(&program.title)
        .bind(&program.description)
        .bind(program.practice.as_str())
        .bind(serde_json::to_string(
            &program
                .item_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
        )?)
        .bind(serde_json::to_string(&program.tags)?)
        .bind(program.required_plan.as_str())
        .bind(program.sort_order)
        .bind(program.is_published)
        .bind(program.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List published programs, optionally narrowed to one practice
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_programs(&self, practice: Option<PracticeType>) -> Result<Vec<Program>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, practice, item_ids, tags,
                   required_plan, sort_order, is_published, created_at
            FROM programs
            WHERE is_published = 1 AND ($1 IS NULL OR practice = $1)
            ORDER BY sort_order, created_at
            ",
        )
        .bind(practice.map(|p| p.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_program).collect()
    }

    /// Get a single published program
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_program(&self, id: Uuid) -> Result<Option<Program>> {
        let row = sqlx::query(
            r"
            SELECT id, title, description, practice, item_ids, tags,
                   required_plan, sort_order, is_published, created_at
            FROM programs
            WHERE id = $1 AND is_published = 1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_program).transpose()
    }

    /// Convert a database row to a `Program`
    fn row_to_program(row: &sqlx::sqlite::SqliteRow) -> Result<Program> {
        let id: String = row.get("id");
        let practice: String = row.get("practice");
        let item_ids: String = row.get("item_ids");
        let tags: String = row.get("tags");
        let required_plan: String = row.get("required_plan");
        let created_at: DateTime<Utc> = row.get("created_at");

        let item_id_strings: Vec<String> = serde_json::from_str(&item_ids)?;

        Ok(Program {
            id: Uuid::parse_str(&id)?,
            title: row.get("title"),
            description: row.get("description"),
            practice: practice.parse()?,
            item_ids: item_id_strings
                .iter()
                .map(|id| Uuid::parse_str(id))
                .collect::<Result<Vec<_>, _>>()?,
            tags: serde_json::from_str(&tags)?,
            required_plan: required_plan.parse()?,
            sort_order: row.get("sort_order"),
            is_published: row.get("is_published"),
            created_at,
        })
    }

    /// Insert or replace a subcategory (seeding and admin tooling)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn upsert_subcategory(&self, subcategory: &Subcategory) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO subcategories (id, title, practice, sort_order)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(subcategory.id.to_string())
        .bind(&subcategory.title)
        .bind(subcategory.practice.as_str())
        .bind(subcategory.sort_order)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List subcategories, optionally narrowed to one practice
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_subcategories(
        &self,
        practice: Option<PracticeType>,
    ) -> Result<Vec<Subcategory>> {
        let rows = sqlx::query(
            r"
            SELECT id, title, practice, sort_order
            FROM subcategories
            WHERE $1 IS NULL OR practice = $1
            ORDER BY sort_order, title
            ",
        )
        .bind(practice.map(|p| p.as_str()))
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let practice: String = row.get("practice");
                Ok(Subcategory {
                    id: Uuid::parse_str(&id)?,
                    title: row.get("title"),
                    practice: practice.parse()?,
                    sort_order: row.get("sort_order"),
                })
            })
            .collect()
    }
}
