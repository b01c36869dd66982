// ABOUTME: User management database operations
// ABOUTME: Handles user registration, lookup, profile data, and activity tracking

use super::Database;
use crate::models::{User, UserStatus};
use anyhow::{anyhow, Result};
use sqlx::Row;
use uuid::Uuid;

impl Database {
    /// Create users and profiles tables
    ///
    /// # Errors
    ///
    /// Returns an error if table or index creation fails
    pub(super) async fn migrate_users(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                display_name TEXT,
                password_hash TEXT,
                plan TEXT NOT NULL DEFAULT 'free' CHECK (plan IN ('free', 'premium')),
                auth_provider TEXT NOT NULL DEFAULT 'email' CHECK (auth_provider IN ('email', 'google')),
                google_id TEXT,
                status TEXT NOT NULL DEFAULT 'active' CHECK (status IN ('active', 'suspended')),
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                last_active DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_profiles (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                profile_data TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)")
            .execute(&self.pool)
            .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_google_id ON users(google_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Create or update a user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The email is already in use by another user
    /// - Database operation fails
    pub async fn create_user(&self, user: &User) -> Result<Uuid> {
        let existing = self.get_user_by_email(&user.email).await?;
        if let Some(existing_user) = existing {
            if existing_user.id != user.id {
                return Err(anyhow!("Email already in use by another user"));
            }
            sqlx::query(
                r"
                UPDATE users SET
                    display_name = $2,
                    password_hash = $3,
                    plan = $4,
                    auth_provider = $5,
                    google_id = $6,
                    status = $7,
                    last_active = CURRENT_TIMESTAMP
                WHERE id = $1
                ",
            )
            .bind(user.id.to_string())
            .bind(&user.display_name)
            .bind(&user.password_hash)
            .bind(user.plan.as_str())
            .bind(user.auth_provider.as_str())
            .bind(&user.google_id)
            .bind(user.status.as_str())
            .execute(&self.pool)
            .await?;
        } else {
            sqlx::query(
                r"
                INSERT INTO users (
                    id, email, display_name, password_hash, plan,
                    auth_provider, google_id, status, created_at, last_active
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ",
            )
            .bind(user.id.to_string())
            .bind(&user.email)
            .bind(&user.display_name)
            .bind(&user.password_hash)
            .bind(user.plan.as_str())
            .bind(user.auth_provider.as_str())
            .bind(&user.google_id)
            .bind(user.status.as_str())
            .bind(user.created_at)
            .bind(user.last_active)
            .execute(&self.pool)
            .await?;
        }

        Ok(user.id)
    }

    /// Get a user by ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user(&self, user_id: Uuid) -> Result<Option<User>> {
        self.get_user_impl("id", &user_id.to_string()).await
    }

    /// Get a user by email
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_impl("email", email).await
    }

    /// Get a user by email, returning an error if not found
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database query fails
    /// - The user is not found
    pub async fn get_user_by_email_required(&self, email: &str) -> Result<User> {
        self.get_user_by_email(email)
            .await?
            .ok_or_else(|| anyhow!("User not found with email: {email}"))
    }

    /// Get a user by linked Google subject identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_by_google_id(&self, google_id: &str) -> Result<Option<User>> {
        self.get_user_impl("google_id", google_id).await
    }

    /// Internal implementation for getting a user
    async fn get_user_impl(&self, field: &str, value: &str) -> Result<Option<User>> {
        let query = format!(
            r"
            SELECT id, email, display_name, password_hash, plan,
                   auth_provider, google_id, status, created_at, last_active
            FROM users WHERE {field} = $1
            "
        );

        let row = sqlx::query(&query)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            let user = Self::row_to_user(&row)?;
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Convert a database row to a `User` struct
    fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
        let id: String = row.get("id");
        let email: String = row.get("email");
        let display_name: Option<String> = row.get("display_name");
        let password_hash: Option<String> = row.get("password_hash");
        let plan: String = row.get("plan");
        let auth_provider: String = row.get("auth_provider");
        let google_id: Option<String> = row.get("google_id");
        let status: String = row.get("status");
        let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
        let last_active: chrono::DateTime<chrono::Utc> = row.get("last_active");

        Ok(User {
            id: Uuid::parse_str(&id)?,
            email,
            display_name,
            password_hash,
            plan: plan.parse()?,
            auth_provider: auth_provider.parse()?,
            google_id,
            status: status.parse()?,
            created_at,
            last_active,
        })
    }

    /// Update user's last active timestamp
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_last_active(&self, user_id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_active = CURRENT_TIMESTAMP WHERE id = $1")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Update user's account status
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn update_user_status(&self, user_id: Uuid, status: UserStatus) -> Result<()> {
        sqlx::query("UPDATE users SET status = $2 WHERE id = $1")
            .bind(user_id.to_string())
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Get total user count
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails
    pub async fn get_user_count(&self) -> Result<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Update or insert user profile data
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database query fails
    /// - JSON serialization fails
    pub async fn upsert_user_profile(
        &self,
        user_id: Uuid,
        profile_data: serde_json::Value,
    ) -> Result<()> {
        let profile_json = serde_json::to_string(&profile_data)?;

        sqlx::query(
            r"
            INSERT INTO user_profiles (user_id, profile_data, updated_at)
            VALUES ($1, $2, CURRENT_TIMESTAMP)
            ON CONFLICT(user_id) DO UPDATE SET
                profile_data = $2,
                updated_at = CURRENT_TIMESTAMP
            ",
        )
        .bind(user_id.to_string())
        .bind(profile_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get user profile data
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The database query fails
    /// - JSON deserialization fails
    pub async fn get_user_profile(&self, user_id: Uuid) -> Result<Option<serde_json::Value>> {
        let row = sqlx::query("SELECT profile_data FROM user_profiles WHERE user_id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        if let Some(row) = row {
            let profile_json: String = row.get("profile_data");
            let profile_data: serde_json::Value = serde_json::from_str(&profile_json)?;
            Ok(Some(profile_data))
        } else {
            Ok(None)
        }
    }

    /// Merge key/value pairs into the user's profile document
    ///
    /// Existing keys not named in `updates` are preserved.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query or JSON handling fails
    pub async fn merge_user_profile(
        &self,
        user_id: Uuid,
        updates: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<()> {
        let mut profile = self
            .get_user_profile(user_id)
            .await?
            .and_then(|value| match value {
                serde_json::Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default();

        for (key, value) in updates {
            profile.insert(key.clone(), value.clone());
        }

        self.upsert_user_profile(user_id, serde_json::Value::Object(profile))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::create_test_db;
    use crate::models::User;

    #[tokio::test]
    async fn test_create_and_fetch_user() {
        let db = create_test_db().await.unwrap();
        let user = User::new("test@example.com".into(), "hash".into(), None);
        let id = db.create_user(&user).await.unwrap();

        let fetched = db.get_user(id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "test@example.com");

        let by_email = db.get_user_by_email("test@example.com").await.unwrap();
        assert!(by_email.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = create_test_db().await.unwrap();
        let first = User::new("dup@example.com".into(), "hash".into(), None);
        db.create_user(&first).await.unwrap();

        let second = User::new("dup@example.com".into(), "hash2".into(), None);
        assert!(db.create_user(&second).await.is_err());
    }

    #[tokio::test]
    async fn test_profile_merge_preserves_existing_keys() {
        let db = create_test_db().await.unwrap();
        let user = User::new("p@example.com".into(), "hash".into(), None);
        db.create_user(&user).await.unwrap();

        let mut first = serde_json::Map::new();
        first.insert("goal".into(), serde_json::json!("better_sleep"));
        db.merge_user_profile(user.id, &first).await.unwrap();

        let mut second = serde_json::Map::new();
        second.insert("experience".into(), serde_json::json!("beginner"));
        db.merge_user_profile(user.id, &second).await.unwrap();

        let profile = db.get_user_profile(user.id).await.unwrap().unwrap();
        assert_eq!(profile["goal"], "better_sleep");
        assert_eq!(profile["experience"], "beginner");
    }
}
