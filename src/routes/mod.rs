// ABOUTME: Route module organization for Ora server HTTP endpoints
// ABOUTME: Per-domain route definitions with thin handlers delegating to services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

//! Route modules for the Ora server
//!
//! Each domain module contains its request/response DTOs and thin axum
//! handlers that delegate to the service layer. `crate::server` wires the
//! modules into one router.

/// Authentication and account routes
pub mod auth;
/// Catalog browsing routes
pub mod content;
/// Health check and system status routes
pub mod health;
/// Daily journal routes
pub mod journal;
/// Onboarding flow and answer routes
pub mod onboarding;
/// Practice session recording routes
pub mod practice;
/// Massage recommendation routes
pub mod recommendations;
/// Aggregate statistics routes
pub mod stats;

pub use auth::AuthService;
pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserInfo};
