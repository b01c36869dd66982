// ABOUTME: Input validation helpers for account credentials
// ABOUTME: Email format and password strength checks shared by auth routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

/// Minimum accepted password length
const MIN_PASSWORD_LENGTH: usize = 8;

/// Check basic email shape: one `@` with a dotted, non-empty domain
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Check password strength: minimum length plus at least one letter and digit
#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
        && password.chars().any(char::is_alphabetic)
        && password.chars().any(char::is_numeric)
}
