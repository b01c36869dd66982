// ABOUTME: Standardized error handling utilities for consistent error management
// ABOUTME: Helper constructors for common validation, auth, and operation errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use crate::errors::{AppError, ErrorCode};

/// Create a validation error with context
#[must_use]
pub fn validation_error(message: &str) -> AppError {
    AppError::new(
        ErrorCode::InvalidInput,
        format!("Validation failed: {message}"),
    )
}

/// Create an authentication error with context
#[must_use]
pub fn auth_error(message: &str) -> AppError {
    AppError::new(
        ErrorCode::AuthInvalid,
        format!("Authentication failed: {message}"),
    )
}

/// Create a user state error with context
#[must_use]
pub fn user_state_error(message: &str) -> AppError {
    AppError::new(
        ErrorCode::PermissionDenied,
        format!("User state error: {message}"),
    )
}

/// Create a generic operation error with context
#[must_use]
pub fn operation_error(operation: &str, message: &str) -> AppError {
    AppError::new(
        ErrorCode::InternalError,
        format!("{operation} failed: {message}"),
    )
}
