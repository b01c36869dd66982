// ABOUTME: Domain model module organization for the Ora wellness platform
// ABOUTME: Re-exports user, practice, content, journal, and onboarding types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

//! Domain models shared across the database, service, and route layers.

/// Catalog entries: content items, programs, subcategories
pub mod content;
/// Daily journaling and gratitude entries
pub mod journal;
/// Onboarding questionnaire configuration and responses
pub mod onboarding;
/// Practice sessions and aggregate statistics
pub mod practice;
/// User accounts, plan tiers, and account status
pub mod user;

pub use content::{ContentItem, Program, Subcategory};
pub use journal::{DailyJournalEntry, MAX_GRATITUDES};
pub use onboarding::{
    AnswerValue, InformationScreen, OnboardingQuestion, OnboardingResponse, OnboardingStep,
    QuestionConfig, QuestionType,
};
pub use practice::{BodyZone, PracticeSession, PracticeStats, PracticeType, UserStats};
pub use user::{AuthProvider, PlanTier, User, UserStatus};
