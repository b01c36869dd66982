// ABOUTME: HTTP middleware module organization
// ABOUTME: Request authentication and user context extraction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

/// Bearer-token authentication middleware
pub mod auth;

pub use auth::{require_auth, AuthMiddleware, CurrentUser};
