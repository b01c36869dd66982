// ABOUTME: Main library entry point for the Ora wellness API platform
// ABOUTME: Practice tracking, journaling, onboarding, and catalog services over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

#![deny(unsafe_code)]

//! # Ora Wellness Server
//!
//! Backend service for the Ora mobile apps: guided practice catalog,
//! session recording with streak statistics, daily journaling, onboarding
//! questionnaires, and massage recommendations.
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Models**: Domain data structures shared across layers
//! - **Database**: SQLite persistence with per-domain operation modules
//! - **Services**: Business rules (statistics pipeline, onboarding validation)
//! - **Routes**: Thin axum handlers over the service layer
//! - **Notifications**: Best-effort outbound email
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ora_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Ora server configured for port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// `JWT` session token issuance and validation
pub mod auth;

/// Environment-based configuration
pub mod config;

/// SQLite persistence layer
pub mod database;

/// Unified error handling
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Request authentication middleware
pub mod middleware;

/// Domain models
pub mod models;

/// Best-effort email notifications
pub mod notifications;

/// Massage recommendation engine
pub mod recommendations;

/// Shared resource container for dependency injection
pub mod resources;

/// `HTTP` route handlers organized by domain
pub mod routes;

/// Router assembly and server lifecycle
pub mod server;

/// Business-rule services
pub mod services;

/// Shared utilities
pub mod utils;
