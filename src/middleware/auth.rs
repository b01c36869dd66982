// ABOUTME: Bearer-token authentication middleware for API routes
// ABOUTME: Validates session JWTs and attaches the current user to the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::auth::{AuthManager, JwtValidationError};
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::User;
use crate::resources::ServerResources;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

/// Authenticated user attached to the request as an extension
#[derive(Clone)]
pub struct CurrentUser(pub User);

/// Middleware for bearer-token request authentication
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
}

impl AuthMiddleware {
    /// Create new auth middleware
    #[must_use]
    pub const fn new(auth_manager: Arc<AuthManager>, database: Arc<Database>) -> Self {
        Self {
            auth_manager,
            database,
        }
    }

    /// Authenticate a request from its headers and load the current user
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The Authorization header is missing or not a Bearer token
    /// - JWT validation fails (expired, bad signature, malformed)
    /// - The user no longer exists or cannot log in
    pub async fn authenticate_request(&self, headers: &HeaderMap) -> AppResult<User> {
        let auth_header = headers
            .get("authorization")
            .and_then(|header| header.to_str().ok())
            .ok_or_else(AppError::auth_required)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::auth_invalid("Authorization header must use Bearer scheme"))?;

        let claims = self.auth_manager.validate_token(token).map_err(|e| {
            tracing::warn!("Token validation failed: {}", e);
            match e {
                JwtValidationError::TokenExpired { .. } => AppError::auth_expired(),
                JwtValidationError::TokenInvalid { .. } => {
                    AppError::auth_invalid("Invalid session token")
                }
                JwtValidationError::TokenMalformed { .. } => AppError::new(
                    crate::errors::ErrorCode::AuthMalformed,
                    "Malformed session token",
                ),
            }
        })?;

        let user_id = uuid::Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::auth_invalid("Token subject is not a user id"))?;

        let user = self
            .database
            .get_user(user_id)
            .await
            .map_err(|e| AppError::database(format!("User lookup failed: {e}")))?
            .ok_or_else(|| AppError::auth_invalid("User no longer exists"))?;

        if !user.status.can_login() {
            return Err(AppError::new(
                crate::errors::ErrorCode::PermissionDenied,
                user.status.to_message(),
            ));
        }

        Ok(user)
    }
}

/// Axum middleware: authenticate and attach [`CurrentUser`]
///
/// # Errors
///
/// Responds with the mapped auth error when authentication fails
pub async fn require_auth(
    State(resources): State<Arc<ServerResources>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let user = resources
        .auth_middleware
        .authenticate_request(request.headers())
        .await?;

    request.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(request).await)
}
