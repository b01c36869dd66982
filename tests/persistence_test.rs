// ABOUTME: Integration tests for file-backed database persistence
// ABOUTME: Verifies data survives closing and reopening the SQLite file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use ora_server::database::Database;
use ora_server::models::{PracticeSession, PracticeType, User};

#[tokio::test]
async fn test_data_survives_reopen() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ora.db");
    let url = format!("sqlite:{}", db_path.display());

    let user = User::new("persist@example.com".into(), "hash".into(), None);
    {
        let db = Database::new(&url).await.unwrap();
        db.create_user(&user).await.unwrap();
        let session = PracticeSession::new(user.id, PracticeType::Yoga, None, 900, None);
        db.insert_session(&session).await.unwrap();
        db.pool().close().await;
    }

    let reopened = Database::new(&url).await.unwrap();
    let fetched = reopened
        .get_user_by_email("persist@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(reopened.count_sessions(user.id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_migrations_tolerate_existing_schema() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("ora.db");
    let url = format!("sqlite:{}", db_path.display());

    let db = Database::new(&url).await.unwrap();
    // Second migrate run against the same file must be a no-op
    db.migrate().await.unwrap();
}
