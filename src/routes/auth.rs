// ABOUTME: User authentication route handlers for registration and login flows
// ABOUTME: REST endpoints for account management plus Google ID-token exchange
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! Authentication routes for user management
//!
//! Handlers are thin wrappers that delegate business logic to [`AuthService`].

use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::CurrentUser;
use crate::models::User;
use crate::resources::ServerResources;
use crate::utils::{auth_error, is_valid_email, is_valid_password, user_state_error, validation_error};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User registration request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// User registration response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub user_id: String,
    pub message: String,
}

/// User login request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Google sign-in request carrying the ID token from the device
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

/// User info for login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub plan: String,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            plan: user.plan.to_string(),
        }
    }
}

/// User login response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub jwt_token: String,
    pub expires_at: String,
    pub user: UserInfo,
}

/// Claims returned by Google's tokeninfo endpoint (subset)
#[derive(Debug, Deserialize)]
struct GoogleTokenInfo {
    aud: String,
    sub: String,
    email: String,
    #[serde(default)]
    email_verified: String,
    #[serde(default)]
    name: Option<String>,
}

/// Authentication service for business logic
#[derive(Clone)]
pub struct AuthService {
    resources: Arc<ServerResources>,
}

impl AuthService {
    #[must_use]
    pub const fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Handle user registration
    ///
    /// # Errors
    /// Returns error if validation fails or the email is already registered
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        tracing::info!("User registration attempt for email: {}", request.email);

        if !is_valid_email(&request.email) {
            return Err(validation_error("Invalid email format"));
        }

        if !is_valid_password(&request.password) {
            return Err(validation_error(
                "Password must be at least 8 characters with letters and digits",
            ));
        }

        if let Ok(Some(_)) = self
            .resources
            .database
            .get_user_by_email(&request.email)
            .await
        {
            return Err(user_state_error("An account with this email already exists"));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        let user = User::new(request.email.clone(), password_hash, request.display_name);

        let user_id = self
            .resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(format!("Failed to create user: {e}")))?;

        AppLogger::log_auth_event(&user_id.to_string(), "register", true, None);

        Ok(RegisterResponse {
            user_id: user_id.to_string(),
            message: "Account created. Welcome to Ora.".into(),
        })
    }

    /// Handle user login
    ///
    /// # Errors
    /// Returns error if authentication fails or token generation fails
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        tracing::info!("User login attempt for email: {}", request.email);

        let user = self
            .resources
            .database
            .get_user_by_email_required(&request.email)
            .await
            .map_err(|_| AppError::auth_invalid("Invalid email or password"))?;

        let Some(password_hash) = user.password_hash.clone() else {
            return Err(auth_error(
                "This account uses Google sign-in; use the Google button instead",
            ));
        };

        // Verify password off the async executor
        let password = request.password.clone();
        let is_valid =
            tokio::task::spawn_blocking(move || bcrypt::verify(&password, &password_hash))
                .await
                .map_err(|e| AppError::internal(format!("Password verification task failed: {e}")))?
                .map_err(|e| AppError::internal(format!("Password verification error: {e}")))?;

        if !is_valid {
            AppLogger::log_auth_event(
                &user.id.to_string(),
                "login",
                false,
                Some("wrong password"),
            );
            return Err(AppError::auth_invalid("Invalid email or password"));
        }

        self.issue_session(user).await
    }

    /// Handle Google sign-in via ID-token verification
    ///
    /// # Errors
    /// Returns error if Google sign-in is not configured, the token fails
    /// verification, or account linking fails
    pub async fn google_login(&self, request: GoogleLoginRequest) -> AppResult<LoginResponse> {
        let Some(client_id) = self.resources.config.google.client_id.clone() else {
            return Err(AppError::config("Google sign-in is not configured"));
        };

        let info = self.verify_google_token(&request.id_token).await?;

        if info.aud != client_id {
            return Err(auth_error("Google token was issued for another application"));
        }
        if info.email_verified != "true" {
            return Err(auth_error("Google account email is not verified"));
        }

        // Look up by Google subject first, then link by email
        let user = match self
            .resources
            .database
            .get_user_by_google_id(&info.sub)
            .await
            .map_err(|e| AppError::database(format!("User lookup failed: {e}")))?
        {
            Some(user) => user,
            None => self.link_or_create_google_user(&info).await?,
        };

        self.issue_session(user).await
    }

    /// Verify an ID token against Google's tokeninfo endpoint
    async fn verify_google_token(&self, id_token: &str) -> AppResult<GoogleTokenInfo> {
        let response = self
            .resources
            .http_client
            .get(&self.resources.config.google.tokeninfo_url)
            .query(&[("id_token", id_token)])
            .send()
            .await
            .map_err(|e| AppError::external_service("google", e.to_string()))?;

        if !response.status().is_success() {
            return Err(auth_error("Google rejected the ID token"));
        }

        response
            .json::<GoogleTokenInfo>()
            .await
            .map_err(|e| AppError::external_service("google", e.to_string()))
    }

    /// Attach the Google identity to an existing account or create a new one
    async fn link_or_create_google_user(&self, info: &GoogleTokenInfo) -> AppResult<User> {
        let user = match self
            .resources
            .database
            .get_user_by_email(&info.email)
            .await
            .map_err(|e| AppError::database(format!("User lookup failed: {e}")))?
        {
            Some(mut existing) => {
                existing.google_id = Some(info.sub.clone());
                existing
            }
            None => User::new_google(info.email.clone(), info.sub.clone(), info.name.clone()),
        };

        self.resources
            .database
            .create_user(&user)
            .await
            .map_err(|e| AppError::database(format!("Failed to link Google account: {e}")))?;

        Ok(user)
    }

    /// Common login tail: status check, last-active touch, token issuance
    async fn issue_session(&self, user: User) -> AppResult<LoginResponse> {
        if !user.status.can_login() {
            tracing::warn!(
                "Login blocked for user: {} - status: {}",
                user.email,
                user.status
            );
            return Err(user_state_error(user.status.to_message()));
        }

        self.resources
            .database
            .update_last_active(user.id)
            .await
            .map_err(|e| AppError::database(format!("Failed to update last active: {e}")))?;

        let jwt_token = self
            .resources
            .auth_manager
            .generate_token(&user)
            .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);

        Ok(LoginResponse {
            jwt_token,
            expires_at: self.resources.auth_manager.expiry_from_now().to_rfc3339(),
            user: UserInfo::from(&user),
        })
    }
}

/// `POST /api/auth/register`
pub async fn handle_register(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<impl IntoResponse> {
    let response = AuthService::new(resources).register(request).await?;
    Ok(Json(response))
}

/// `POST /api/auth/login`
pub async fn handle_login(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let response = AuthService::new(resources).login(request).await?;
    Ok(Json(response))
}

/// `POST /api/auth/google`
pub async fn handle_google_login(
    State(resources): State<Arc<ServerResources>>,
    Json(request): Json<GoogleLoginRequest>,
) -> AppResult<impl IntoResponse> {
    let response = AuthService::new(resources).google_login(request).await?;
    Ok(Json(response))
}

/// `GET /api/auth/me`
pub async fn handle_me(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(UserInfo::from(&user)))
}
