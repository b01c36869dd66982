// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common database, resource, and user creation helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness
#![allow(dead_code, clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Shared test utilities for `ora_server`
//!
//! Common setup functions to reduce duplication across integration tests.

use anyhow::Result;
use ora_server::{
    auth::AuthManager,
    config::environment::{
        AuthConfig, DatabaseConfig, DatabaseUrl, EmailConfig, Environment, GoogleAuthConfig,
        LogLevel, ServerConfig,
    },
    database::Database,
    models::User,
    notifications::{EmailNotifier, RecordingEmailNotifier},
    resources::ServerResources,
};
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Arc<Database>> {
    init_test_logging();
    Ok(Arc::new(Database::new("sqlite::memory:").await?))
}

/// Configuration suitable for tests: in-memory database, no external services
pub fn create_test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        log_level: LogLevel::Warn,
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            auto_migrate: true,
        },
        auth: AuthConfig {
            jwt_secret: "test-secret".into(),
            jwt_expiry_hours: 24,
        },
        email: EmailConfig {
            api_url: "http://localhost:0/send".into(),
            api_key: None,
            from_address: "test@ora.app".into(),
        },
        google: GoogleAuthConfig {
            client_id: None,
            tokeninfo_url: "http://localhost:0/tokeninfo".into(),
        },
        cors_origins: vec!["*".into()],
    }
}

/// Full resource container over an in-memory database, with a recording
/// notifier so tests can observe scheduled emails
pub async fn create_test_resources() -> Result<(Arc<ServerResources>, Arc<RecordingEmailNotifier>)>
{
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    let config = create_test_config();
    let auth_manager = AuthManager::new(&config.auth.jwt_secret, config.auth.jwt_expiry_hours);
    let notifier = Arc::new(RecordingEmailNotifier::new());
    let notifier_dyn: Arc<dyn EmailNotifier> = Arc::clone(&notifier) as Arc<dyn EmailNotifier>;

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        notifier_dyn,
        Arc::new(config),
    ));

    Ok((resources, notifier))
}

/// Create and persist a standard test user
pub async fn create_test_user(database: &Database, email: &str) -> Result<User> {
    let user = User::new(
        email.into(),
        bcrypt::hash("sunrise42", 4)?,
        Some("Test User".into()),
    );
    database.create_user(&user).await?;
    Ok(user)
}
