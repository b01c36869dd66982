// ABOUTME: Database management for the Ora wellness platform
// ABOUTME: SQLite pool ownership, schema migration, and per-domain operation modules
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! # Database Management
//!
//! This module provides database functionality for the Ora server. Each domain
//! (users, practice, stats, content, journal, onboarding) contributes its own
//! `impl Database` block and `migrate_*` function from a sibling file.

mod content;
mod journal;
mod onboarding;
mod practice;
mod stats;
mod users;

use anyhow::Result;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};

/// Database manager for user, catalog, and statistics storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established or a
    /// migration fails
    pub async fn new(database_url: &str) -> Result<Self> {
        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:")
            && !database_url.contains(":memory:")
        {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        // An in-memory database must stay on a single pooled connection;
        // every additional connection would see its own empty database.
        let pool = if connection_options.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&connection_options)
                .await?
        } else {
            SqlitePool::connect(&connection_options).await?
        };

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index creation fails
    pub async fn migrate(&self) -> Result<()> {
        self.migrate_users().await?;
        self.migrate_practice().await?;
        self.migrate_stats().await?;
        self.migrate_content().await?;
        self.migrate_journal().await?;
        self.migrate_onboarding().await?;

        Ok(())
    }
}
