// ABOUTME: Service layer module organization
// ABOUTME: Business logic between the HTTP routes and the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

//! Service layer. Route handlers stay thin and delegate here.

/// Onboarding flow merge and answer validation
pub mod onboarding;
/// Practice session recording and aggregate statistics pipeline
pub mod practice;

pub use onboarding::OnboardingService;
pub use practice::{PracticeService, STREAK_MILESTONES};
