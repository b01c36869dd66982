// ABOUTME: JWT-based user authentication and authorization system
// ABOUTME: Handles token generation, validation, and session expiry
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! # Authentication and Session Management
//!
//! HS256 JWT issuance and validation for mobile client sessions.

use crate::models::User;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Token audience claimed by every session token
pub const TOKEN_AUDIENCE: &str = "ora-mobile";

/// `JWT` validation error with detailed information
#[derive(Debug, Clone)]
pub enum JwtValidationError {
    /// Token has expired
    TokenExpired {
        /// When the token expired
        expired_at: DateTime<Utc>,
        /// Current time for reference
        current_time: DateTime<Utc>,
    },
    /// Token signature is invalid
    TokenInvalid {
        /// Reason for invalidity
        reason: String,
    },
    /// Token is malformed (not proper `JWT` format)
    TokenMalformed {
        /// Details about malformation
        details: String,
    },
}

impl std::fmt::Display for JwtValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TokenExpired {
                expired_at,
                current_time,
            } => {
                let duration_expired = current_time.signed_duration_since(*expired_at);
                if duration_expired.num_minutes() < 60 {
                    write!(
                        f,
                        "JWT token expired {} minutes ago at {}",
                        duration_expired.num_minutes(),
                        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )
                } else if duration_expired.num_hours() < 48 {
                    write!(
                        f,
                        "JWT token expired {} hours ago at {}",
                        duration_expired.num_hours(),
                        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )
                } else {
                    write!(
                        f,
                        "JWT token expired {} days ago at {}",
                        duration_expired.num_days(),
                        expired_at.format("%Y-%m-%d %H:%M:%S UTC")
                    )
                }
            }
            Self::TokenInvalid { reason } => {
                write!(f, "JWT token signature is invalid: {reason}")
            }
            Self::TokenMalformed { details } => {
                write!(f, "JWT token is malformed: {details}")
            }
        }
    }
}

impl std::error::Error for JwtValidationError {}

/// `JWT` claims for user authentication
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User `ID`
    pub sub: String,
    /// User email
    pub email: String,
    /// Issued at timestamp
    pub iat: i64,
    /// Expiration timestamp
    pub exp: i64,
    /// Audience (who the token is intended for)
    pub aud: String,
}

/// Authentication manager for `JWT` session tokens
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
    /// Monotonic counter to ensure unique timestamps for tokens
    token_counter: AtomicU64,
}

impl AuthManager {
    /// Create a new authentication manager from an HS256 secret
    #[must_use]
    pub fn new(secret: &str, token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_expiry_hours,
            token_counter: AtomicU64::new(0),
        }
    }

    /// Token lifetime in hours
    #[must_use]
    pub const fn token_expiry_hours(&self) -> i64 {
        self.token_expiry_hours
    }

    /// When a token issued now will expire
    #[must_use]
    pub fn expiry_from_now(&self) -> DateTime<Utc> {
        Utc::now() + Duration::hours(self.token_expiry_hours)
    }

    /// Generate a `JWT` token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails due to invalid claims
    pub fn generate_token(&self, user: &User) -> Result<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);

        // Atomic counter keeps issued-at values unique across rapid calls
        let counter = self.token_counter.fetch_add(1, Ordering::Relaxed);
        let unique_iat =
            now.timestamp() * 1000 + i64::from(u32::try_from(counter % 1000).unwrap_or(0));

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            iat: unique_iat,
            exp: expiry.timestamp(),
            aud: TOKEN_AUDIENCE.to_owned(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;

        Ok(token)
    }

    /// Validate a session token and return its claims
    ///
    /// # Errors
    ///
    /// Returns [`JwtValidationError`] describing expiry, bad signature, or
    /// malformed structure
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtValidationError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    let expired_at = self
                        .decode_expired_claims(token)
                        .map_or_else(Utc::now, |claims| {
                            DateTime::from_timestamp(claims.exp, 0).unwrap_or_else(Utc::now)
                        });
                    Err(JwtValidationError::TokenExpired {
                        expired_at,
                        current_time: Utc::now(),
                    })
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::InvalidAudience => {
                    Err(JwtValidationError::TokenInvalid {
                        reason: e.to_string(),
                    })
                }
                _ => Err(JwtValidationError::TokenMalformed {
                    details: e.to_string(),
                }),
            },
        }
    }

    /// Extract the user ID from a validated token
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the subject is not a UUID
    pub fn user_id_from_token(&self, token: &str) -> Result<Uuid> {
        let claims = self.validate_token(token)?;
        Ok(Uuid::parse_str(&claims.sub)?)
    }

    /// Re-decode an expired token just to read its claims
    fn decode_expired_claims(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[TOKEN_AUDIENCE]);
        validation.validate_exp = false;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        User::new(
            "test@example.com".into(),
            "hashed_password_123".into(),
            Some("Test User".into()),
        )
    }

    fn create_auth_manager() -> AuthManager {
        AuthManager::new("test-secret", 24)
    }

    #[test]
    fn test_generate_and_validate_token() {
        let auth_manager = create_auth_manager();
        let user = create_test_user();

        let token = auth_manager.generate_token(&user).unwrap();
        assert!(!token.is_empty());

        let claims = auth_manager.validate_token(&token).unwrap();
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.aud, TOKEN_AUDIENCE);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let auth_manager = create_auth_manager();
        let result = auth_manager.validate_token("invalid.jwt.token");
        assert!(matches!(
            result,
            Err(JwtValidationError::TokenMalformed { .. })
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let user = create_test_user();
        let issuer = AuthManager::new("secret-one", 24);
        let verifier = AuthManager::new("secret-two", 24);

        let token = issuer.generate_token(&user).unwrap();
        let result = verifier.validate_token(&token);
        assert!(matches!(
            result,
            Err(JwtValidationError::TokenInvalid { .. })
        ));
    }

    #[test]
    fn test_user_id_round_trip() {
        let auth_manager = create_auth_manager();
        let user = create_test_user();
        let token = auth_manager.generate_token(&user).unwrap();

        assert_eq!(auth_manager.user_id_from_token(&token).unwrap(), user.id);
    }
}
