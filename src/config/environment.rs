// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! Environment-based configuration management for production deployment

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Default HTTP port when `ORA_HTTP_PORT` is unset
const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default JWT expiry when `ORA_JWT_EXPIRY_HOURS` is unset
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24;
/// Default transactional-email endpoint
const DEFAULT_EMAIL_API_URL: &str = "https://api.mailchannels.net/tx/v1/send";
/// Google token verification endpoint
const DEFAULT_GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Environment type for security and logging defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// SQLite database with file path
    SQLite { path: PathBuf },
    /// In-memory SQLite (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/ora.db"),
        }
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Top-level server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
    /// Outbound email configuration
    pub email: EmailConfig,
    /// Google sign-in configuration
    pub google: GoogleAuthConfig,
    /// CORS allowed origins
    pub cors_origins: Vec<String>,
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL (SQLite path or `:memory:`)
    pub url: DatabaseUrl,
    /// Run schema migrations on startup
    pub auto_migrate: bool,
}

/// Authentication settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing secret for session tokens
    pub jwt_secret: String,
    /// JWT expiry time in hours
    pub jwt_expiry_hours: i64,
}

/// Outbound transactional email settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Transactional mail API endpoint
    pub api_url: String,
    /// API key; email sending is disabled when unset
    pub api_key: Option<String>,
    /// Sender address
    pub from_address: String,
}

impl EmailConfig {
    /// Whether outbound email is configured
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Google ID-token verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleAuthConfig {
    /// Expected OAuth client audience; Google sign-in is disabled when unset
    pub client_id: Option<String>,
    /// Token verification endpoint
    pub tokeninfo_url: String,
}

impl GoogleAuthConfig {
    /// Whether Google sign-in is configured
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.client_id.is_some()
    }
}

/// Read an environment variable with a default fallback
fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a set variable fails to parse (port, expiry hours)
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or("ORA_ENVIRONMENT", "development"));

        let jwt_secret = match env::var("ORA_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ => {
                if environment.is_production() {
                    anyhow::bail!("ORA_JWT_SECRET must be set in production");
                }
                warn!("ORA_JWT_SECRET not set; using development-only default");
                "ora-development-secret".to_owned()
            }
        };

        let config = Self {
            http_port: env_var_or("ORA_HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid ORA_HTTP_PORT value")?,
            log_level: LogLevel::from_str_or_default(&env_var_or("ORA_LOG_LEVEL", "info")),
            environment,
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("ORA_DATABASE_URL", "./data/ora.db")),
                auto_migrate: env_var_or("ORA_AUTO_MIGRATE", "true")
                    .parse()
                    .context("Invalid ORA_AUTO_MIGRATE value")?,
            },
            auth: AuthConfig {
                jwt_secret,
                jwt_expiry_hours: env_var_or(
                    "ORA_JWT_EXPIRY_HOURS",
                    &DEFAULT_JWT_EXPIRY_HOURS.to_string(),
                )
                .parse()
                .context("Invalid ORA_JWT_EXPIRY_HOURS value")?,
            },
            email: EmailConfig {
                api_url: env_var_or("ORA_EMAIL_API_URL", DEFAULT_EMAIL_API_URL),
                api_key: env::var("ORA_EMAIL_API_KEY").ok().filter(|k| !k.is_empty()),
                from_address: env_var_or("ORA_EMAIL_FROM", "hello@ora.app"),
            },
            google: GoogleAuthConfig {
                client_id: env::var("ORA_GOOGLE_CLIENT_ID")
                    .ok()
                    .filter(|id| !id.is_empty()),
                tokeninfo_url: env_var_or("ORA_GOOGLE_TOKENINFO_URL", DEFAULT_GOOGLE_TOKENINFO_URL),
            },
            cors_origins: env_var_or("ORA_CORS_ORIGINS", "*")
                .split(',')
                .map(|origin| origin.trim().to_owned())
                .filter(|origin| !origin.is_empty())
                .collect(),
        };

        Ok(config)
    }

    /// One-line-per-setting startup summary for the log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Ora Server Configuration:\n\
             - HTTP Port: {}\n\
             - Log Level: {}\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Email Notifications: {}\n\
             - Google Sign-In: {}",
            self.http_port,
            self.log_level,
            self.environment,
            self.database.url,
            if self.email.enabled() {
                "enabled"
            } else {
                "disabled"
            },
            if self.google.enabled() {
                "enabled"
            } else {
                "disabled"
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert!(DatabaseUrl::parse_url("sqlite::memory:").is_memory());
        assert!(DatabaseUrl::parse_url(":memory:").is_memory());

        let file = DatabaseUrl::parse_url("sqlite:./data/ora.db");
        assert_eq!(file.to_connection_string(), "sqlite:./data/ora.db");

        let bare = DatabaseUrl::parse_url("./data/ora.db");
        assert_eq!(bare.to_connection_string(), "sqlite:./data/ora.db");
    }

    #[test]
    fn test_log_level_fallback() {
        assert_eq!(LogLevel::from_str_or_default("warn"), LogLevel::Warn);
        assert_eq!(LogLevel::from_str_or_default("nonsense"), LogLevel::Info);
    }

    #[test]
    fn test_environment_parsing() {
        assert!(Environment::from_str_or_default("prod").is_production());
        assert!(!Environment::from_str_or_default("dev").is_production());
    }
}
