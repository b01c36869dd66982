// ABOUTME: User account models for the Ora wellness platform
// ABOUTME: User, PlanTier, UserStatus, and AuthProvider definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Subscription plan tier controlling access to premium catalog content
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum PlanTier {
    /// Free tier with access to the open catalog
    #[default]
    Free,
    /// Paid tier with full catalog access
    Premium,
}

impl PlanTier {
    /// Whether this tier unlocks premium-gated catalog entries
    #[must_use]
    pub const fn is_premium(&self) -> bool {
        matches!(self, Self::Premium)
    }

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }
}

impl Display for PlanTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            _ => Err(AppError::invalid_input(format!("Invalid plan tier: {s}"))),
        }
    }
}

/// User account status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum UserStatus {
    /// Account active and allowed to sign in
    #[default]
    Active,
    /// Account suspended by support
    Suspended,
}

impl UserStatus {
    /// Check if user can login
    #[must_use]
    pub const fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Get user-friendly status message
    #[must_use]
    pub const fn to_message(&self) -> &'static str {
        match self {
            Self::Active => "Account is active",
            Self::Suspended => "Your account has been suspended",
        }
    }

    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

impl Display for UserStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            _ => Err(AppError::invalid_input(format!("Invalid user status: {s}"))),
        }
    }
}

/// How the account authenticates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthProvider {
    /// Email + password credentials
    Email,
    /// Google sign-in (ID token exchange)
    Google,
}

impl AuthProvider {
    /// Convert to string for database storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Google => "google",
        }
    }
}

impl FromStr for AuthProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "google" => Ok(Self::Google),
            _ => Err(AppError::invalid_input(format!(
                "Invalid auth provider: {s}"
            ))),
        }
    }
}

/// Represents a user account
///
/// Google-linked accounts carry no password hash; everyone else authenticates
/// with bcrypt-hashed credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: Uuid,
    /// User email address (used for identification)
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// Hashed password, absent for Google-linked accounts
    pub password_hash: Option<String>,
    /// Subscription plan tier
    pub plan: PlanTier,
    /// Authentication provider for this account
    pub auth_provider: AuthProvider,
    /// Google subject identifier when linked
    pub google_id: Option<String>,
    /// Account status
    pub status: UserStatus,
    /// When the user account was created
    pub created_at: DateTime<Utc>,
    /// Last time user accessed the system
    pub last_active: DateTime<Utc>,
}

impl User {
    /// Create a new email/password user
    #[must_use]
    pub fn new(email: String, password_hash: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash: Some(password_hash),
            plan: PlanTier::Free,
            auth_provider: AuthProvider::Email,
            google_id: None,
            status: UserStatus::Active,
            created_at: now,
            last_active: now,
        }
    }

    /// Create a new Google-linked user
    #[must_use]
    pub fn new_google(email: String, google_id: String, display_name: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            display_name,
            password_hash: None,
            plan: PlanTier::Free,
            auth_provider: AuthProvider::Google,
            google_id: Some(google_id),
            status: UserStatus::Active,
            created_at: now,
            last_active: now,
        }
    }

    /// Update last active timestamp
    pub fn update_last_active(&mut self) {
        self.last_active = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_tier_round_trip() {
        for tier in [PlanTier::Free, PlanTier::Premium] {
            assert_eq!(tier.as_str().parse::<PlanTier>().unwrap(), tier);
        }
        assert!("gold".parse::<PlanTier>().is_err());
    }

    #[test]
    fn test_suspended_cannot_login() {
        assert!(UserStatus::Active.can_login());
        assert!(!UserStatus::Suspended.can_login());
    }

    #[test]
    fn test_google_user_has_no_password() {
        let user = User::new_google("a@b.com".into(), "sub-1".into(), None);
        assert!(user.password_hash.is_none());
        assert_eq!(user.auth_provider, AuthProvider::Google);
    }
}
