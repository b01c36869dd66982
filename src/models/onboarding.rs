// ABOUTME: Onboarding questionnaire models: questions, information screens, answers
// ABOUTME: Structured per-type question configuration replaces free-text answer blobs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Question kind, derived from the typed configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Rating,
    ProfileGroup,
}

/// One sub-field of a profile-group question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProfileField {
    /// Profile column this field writes to
    pub name: String,
    /// Label shown to the user
    pub label: String,
    /// Whether the field must be filled in
    pub required: bool,
}

/// Typed per-kind question configuration
///
/// Stored as tagged JSON in the questions table; every validation rule reads
/// from here instead of scanning serialized answer text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionConfig {
    /// Pick one (or several) of a fixed option list
    MultipleChoice {
        options: Vec<String>,
        multi_select: bool,
    },
    /// Free-form text
    Text,
    /// Numeric rating on an inclusive scale
    Rating { min: i64, max: i64 },
    /// Group of named profile sub-fields
    ProfileGroup { fields: Vec<ProfileField> },
}

impl QuestionConfig {
    /// The question kind this configuration describes
    #[must_use]
    pub const fn kind(&self) -> QuestionType {
        match self {
            Self::MultipleChoice { .. } => QuestionType::MultipleChoice,
            Self::Text => QuestionType::Text,
            Self::Rating { .. } => QuestionType::Rating,
            Self::ProfileGroup { .. } => QuestionType::ProfileGroup,
        }
    }
}

/// An onboarding question, ordered into the flow by `sort_order`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingQuestion {
    /// Unique question identifier
    pub id: Uuid,
    /// Position in the merged onboarding flow
    pub sort_order: i64,
    /// Prompt shown to the user
    pub prompt: String,
    /// Whether an answer is mandatory
    pub required: bool,
    /// Typed per-kind configuration
    pub config: QuestionConfig,
    /// Profile column a scalar answer writes to, if any
    pub profile_field: Option<String>,
}

/// A non-interactive onboarding slide merged into the question sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InformationScreen {
    /// Unique screen identifier
    pub id: Uuid,
    /// Position in the merged onboarding flow
    pub sort_order: i64,
    /// Headline
    pub title: String,
    /// Body copy
    pub body: String,
}

/// One step of the merged onboarding flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OnboardingStep {
    /// Static information screen
    Screen(InformationScreen),
    /// Interactive question
    Question(OnboardingQuestion),
}

impl OnboardingStep {
    /// Shared ordering key
    #[must_use]
    pub const fn sort_order(&self) -> i64 {
        match self {
            Self::Screen(screen) => screen.sort_order,
            Self::Question(question) => question.sort_order,
        }
    }

    /// Step identifier
    #[must_use]
    pub const fn id(&self) -> Uuid {
        match self {
            Self::Screen(screen) => screen.id,
            Self::Question(question) => question.id,
        }
    }

    /// Tie-break rank when two steps share a sort order: screens come first
    #[must_use]
    pub const fn tie_break_rank(&self) -> u8 {
        match self {
            Self::Screen(_) => 0,
            Self::Question(_) => 1,
        }
    }
}

/// A structured answer to one onboarding question
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnswerValue {
    /// Selected options of a multiple-choice question
    Choice { selected: Vec<String> },
    /// Free-form text answer
    Text { text: String },
    /// Rating on the question's scale
    Rating { value: i64 },
    /// Values for each sub-field of a profile group
    Profile { fields: BTreeMap<String, String> },
}

/// A persisted answer for one user/question pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingResponse {
    /// Answering user
    pub user_id: Uuid,
    /// Question being answered
    pub question_id: Uuid,
    /// Structured answer payload
    pub answer: AnswerValue,
    /// When the answer was recorded
    pub answered_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_kind() {
        let config = QuestionConfig::Rating { min: 1, max: 5 };
        assert_eq!(config.kind(), QuestionType::Rating);
        assert_eq!(QuestionConfig::Text.kind(), QuestionType::Text);
    }

    #[test]
    fn test_answer_value_tagged_serialization() {
        let answer = AnswerValue::Choice {
            selected: vec!["better_sleep".into()],
        };
        let json = serde_json::to_string(&answer).unwrap();
        assert!(json.contains("\"type\":\"choice\""));

        let parsed: AnswerValue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, answer);
    }
}
