// ABOUTME: Onboarding questionnaire database operations
// ABOUTME: Question and screen configuration plus structured per-user responses

use super::Database;
use crate::models::{AnswerValue, InformationScreen, OnboardingQuestion, OnboardingResponse};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create onboarding tables
    ///
    /// # Errors
    ///
    /// Returns an error if table creation fails
    pub(super) async fn migrate_onboarding(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS onboarding_questions (
                id TEXT PRIMARY KEY,
                sort_order INTEGER NOT NULL DEFAULT 0,
                prompt TEXT NOT NULL,
                required BOOLEAN NOT NULL DEFAULT 0,
                config TEXT NOT NULL,
                profile_field TEXT
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS onboarding_screens (
                id TEXT PRIMARY KEY,
                sort_order INTEGER NOT NULL DEFAULT 0,
                title TEXT NOT NULL,
                body TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS onboarding_responses (
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                question_id TEXT NOT NULL REFERENCES onboarding_questions(id) ON DELETE CASCADE,
                answer TEXT NOT NULL,
                answered_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
                PRIMARY KEY (user_id, question_id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace an onboarding question (seeding and admin tooling)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or JSON serialization fails
    pub async fn upsert_question(&self, question: &OnboardingQuestion) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO onboarding_questions (
                id, sort_order, prompt, required, config, profile_field
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(question.id.to_string())
        .bind(question.sort_order)
        .bind(&question.prompt)
        .bind(question.required)
        .bind(serde_json::to_string(&question.config)?)
        .bind(&question.profile_field)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert or replace an information screen (seeding and admin tooling)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn upsert_screen(&self, screen: &InformationScreen) -> Result<()> {
        sqlx::query(
            r"
            INSERT OR REPLACE INTO onboarding_screens (id, sort_order, title, body)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(screen.id.to_string())
        .bind(screen.sort_order)
        .bind(&screen.title)
        .bind(&screen.body)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List all configured questions
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_questions(&self) -> Result<Vec<OnboardingQuestion>> {
        let rows = sqlx::query(
            r"
            SELECT id, sort_order, prompt, required, config, profile_field
            FROM onboarding_questions
            ORDER BY sort_order
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_question).collect()
    }

    /// Get one question by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_question(&self, id: Uuid) -> Result<Option<OnboardingQuestion>> {
        let row = sqlx::query(
            r"
            SELECT id, sort_order, prompt, required, config, profile_field
            FROM onboarding_questions
            WHERE id = $1
            ",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_question).transpose()
    }

    /// Convert a database row to an `OnboardingQuestion`
    fn row_to_question(row: &sqlx::sqlite::SqliteRow) -> Result<OnboardingQuestion> {
        let id: String = row.get("id");
        let config: String = row.get("config");

        Ok(OnboardingQuestion {
            id: Uuid::parse_str(&id)?,
            sort_order: row.get("sort_order"),
            prompt: row.get("prompt"),
            required: row.get("required"),
            config: serde_json::from_str(&config)?,
            profile_field: row.get("profile_field"),
        })
    }

    /// List all configured information screens
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_screens(&self) -> Result<Vec<InformationScreen>> {
        let rows = sqlx::query(
            r"
            SELECT id, sort_order, title, body
            FROM onboarding_screens
            ORDER BY sort_order
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                Ok(InformationScreen {
                    id: Uuid::parse_str(&id)?,
                    sort_order: row.get("sort_order"),
                    title: row.get("title"),
                    body: row.get("body"),
                })
            })
            .collect()
    }

    /// Insert or update one user's answer to a question
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or JSON serialization fails
    pub async fn upsert_response(&self, response: &OnboardingResponse) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO onboarding_responses (user_id, question_id, answer, answered_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(user_id, question_id) DO UPDATE SET
                answer = $3,
                answered_at = $4
            ",
        )
        .bind(response.user_id.to_string())
        .bind(response.question_id.to_string())
        .bind(serde_json::to_string(&response.answer)?)
        .bind(response.answered_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// List one user's recorded answers
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn list_responses(&self, user_id: Uuid) -> Result<Vec<OnboardingResponse>> {
        let rows = sqlx::query(
            r"
            SELECT user_id, question_id, answer, answered_at
            FROM onboarding_responses
            WHERE user_id = $1
            ORDER BY answered_at
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let user_id: String = row.get("user_id");
                let question_id: String = row.get("question_id");
                let answer: String = row.get("answer");
                let answered_at: DateTime<Utc> = row.get("answered_at");

                let answer: AnswerValue = serde_json::from_str(&answer)?;
                Ok(OnboardingResponse {
                    user_id: Uuid::parse_str(&user_id)?,
                    question_id: Uuid::parse_str(&question_id)?,
                    answer,
                    answered_at,
                })
            })
            .collect()
    }
}
