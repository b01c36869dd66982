// ABOUTME: Shared utility module organization
// ABOUTME: Duration formatting, input validation, date arithmetic, error helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

/// Calendar-day arithmetic for streak tracking
pub mod dates;
/// Human-readable duration formatting
pub mod duration;
/// Standardized error construction helpers
pub mod errors;
/// Email and password validation
pub mod validation;

pub use dates::days_between;
pub use duration::{format_duration, format_minutes};
pub use errors::{auth_error, operation_error, user_state_error, validation_error};
pub use validation::{is_valid_email, is_valid_password};
