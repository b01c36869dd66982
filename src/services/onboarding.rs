// ABOUTME: Onboarding flow assembly and structured answer validation
// ABOUTME: Merges questions and information screens by sort order, validates per type
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! # Onboarding Service
//!
//! Questions and static information screens are stored separately but
//! presented to clients as one sequence ordered by a shared sort key. Answers
//! arrive as typed payloads and are validated against each question's typed
//! configuration before anything is persisted.

use crate::database::Database;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{
    AnswerValue, OnboardingQuestion, OnboardingResponse, OnboardingStep, QuestionConfig,
};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Service owning the onboarding flow and answer intake
pub struct OnboardingService {
    database: Arc<Database>,
}

impl OnboardingService {
    /// Create a new onboarding service
    #[must_use]
    pub const fn new(database: Arc<Database>) -> Self {
        Self { database }
    }

    /// The merged onboarding sequence: screens and questions ordered by the
    /// shared sort key, screens winning ties, then by id for determinism
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails
    pub async fn flow(&self) -> AppResult<Vec<OnboardingStep>> {
        let questions = self
            .database
            .list_questions()
            .await
            .map_err(|e| AppError::database(format!("Failed to load questions: {e}")))?;
        let screens = self
            .database
            .list_screens()
            .await
            .map_err(|e| AppError::database(format!("Failed to load screens: {e}")))?;

        let mut steps: Vec<OnboardingStep> = screens
            .into_iter()
            .map(OnboardingStep::Screen)
            .chain(questions.into_iter().map(OnboardingStep::Question))
            .collect();

        steps.sort_by_key(|step| (step.sort_order(), step.tie_break_rank(), step.id()));

        Ok(steps)
    }

    /// Validate and persist a batch of answers, then fold any mapped values
    /// into the user's profile document
    ///
    /// Returns the number of answers stored. The batch is validated up front;
    /// nothing is written unless every answer passes.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the failing question, or a database
    /// error if persistence fails
    pub async fn submit_answers(
        &self,
        user_id: Uuid,
        answers: Vec<(Uuid, AnswerValue)>,
    ) -> AppResult<usize> {
        let mut validated = Vec::with_capacity(answers.len());

        for (question_id, answer) in answers {
            let question = self
                .database
                .get_question(question_id)
                .await
                .map_err(|e| AppError::database(format!("Failed to load question: {e}")))?
                .ok_or_else(|| {
                    AppError::not_found("Onboarding question")
                        .with_resource_id(question_id.to_string())
                })?;

            validate_answer(&question, &answer)?;
            validated.push((question, answer));
        }

        let mut profile_updates = serde_json::Map::new();

        for (question, answer) in &validated {
            self.database
                .upsert_response(&OnboardingResponse {
                    user_id,
                    question_id: question.id,
                    answer: answer.clone(),
                    answered_at: Utc::now(),
                })
                .await
                .map_err(|e| AppError::database(format!("Failed to store answer: {e}")))?;

            collect_profile_updates(question, answer, &mut profile_updates);
        }

        if !profile_updates.is_empty() {
            self.database
                .merge_user_profile(user_id, &profile_updates)
                .await
                .map_err(|e| AppError::database(format!("Failed to update profile: {e}")))?;
        }

        info!(
            user.id = %user_id,
            answers = validated.len(),
            profile_fields = profile_updates.len(),
            "Onboarding answers recorded"
        );

        Ok(validated.len())
    }
}

/// Validate one answer against its question's typed configuration
fn validate_answer(question: &OnboardingQuestion, answer: &AnswerValue) -> AppResult<()> {
    let fail = |code: ErrorCode, message: String| {
        Err(AppError::new(code, message).with_resource_id(question.id.to_string()))
    };

    match (&question.config, answer) {
        (
            QuestionConfig::MultipleChoice {
                options,
                multi_select,
            },
            AnswerValue::Choice { selected },
        ) => {
            if selected.is_empty() {
                if question.required {
                    return fail(
                        ErrorCode::MissingRequiredField,
                        format!("Question '{}' requires a selection", question.prompt),
                    );
                }
                return Ok(());
            }
            if !multi_select && selected.len() > 1 {
                return fail(
                    ErrorCode::InvalidInput,
                    format!("Question '{}' allows only one selection", question.prompt),
                );
            }
            for choice in selected {
                if !options.contains(choice) {
                    return fail(
                        ErrorCode::InvalidInput,
                        format!("'{choice}' is not an option of '{}'", question.prompt),
                    );
                }
            }
            Ok(())
        }
        (QuestionConfig::Text, AnswerValue::Text { text }) => {
            if question.required && text.trim().is_empty() {
                return fail(
                    ErrorCode::MissingRequiredField,
                    format!("Question '{}' requires an answer", question.prompt),
                );
            }
            Ok(())
        }
        (QuestionConfig::Rating { min, max }, AnswerValue::Rating { value }) => {
            if value < min || value > max {
                return fail(
                    ErrorCode::ValueOutOfRange,
                    format!(
                        "Rating for '{}' must be between {min} and {max}",
                        question.prompt
                    ),
                );
            }
            Ok(())
        }
        (QuestionConfig::ProfileGroup { fields }, AnswerValue::Profile { fields: given }) => {
            for field in fields {
                let value = given.get(&field.name).map(|v| v.trim());
                if field.required && value.map_or(true, str::is_empty) {
                    return fail(
                        ErrorCode::MissingRequiredField,
                        format!("Field '{}' is required", field.label),
                    );
                }
            }
            for name in given.keys() {
                if !fields.iter().any(|field| &field.name == name) {
                    return fail(
                        ErrorCode::InvalidInput,
                        format!("Unknown profile field '{name}'"),
                    );
                }
            }
            Ok(())
        }
        _ => fail(
            ErrorCode::InvalidFormat,
            format!(
                "Answer type does not match question '{}' ({:?})",
                question.prompt,
                question.config.kind()
            ),
        ),
    }
}

/// Fold a validated answer into pending profile updates
fn collect_profile_updates(
    question: &OnboardingQuestion,
    answer: &AnswerValue,
    updates: &mut serde_json::Map<String, serde_json::Value>,
) {
    match answer {
        AnswerValue::Profile { fields } => {
            for (name, value) in fields {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    updates.insert(name.clone(), serde_json::json!(trimmed));
                }
            }
        }
        AnswerValue::Choice { selected } => {
            if let Some(field) = &question.profile_field {
                let value = if selected.len() == 1 {
                    serde_json::json!(selected[0])
                } else {
                    serde_json::json!(selected)
                };
                updates.insert(field.clone(), value);
            }
        }
        AnswerValue::Text { text } => {
            if let Some(field) = &question.profile_field {
                if !text.trim().is_empty() {
                    updates.insert(field.clone(), serde_json::json!(text.trim()));
                }
            }
        }
        AnswerValue::Rating { value } => {
            if let Some(field) = &question.profile_field {
                updates.insert(field.clone(), serde_json::json!(value));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::onboarding::ProfileField;
    use std::collections::BTreeMap;

    fn choice_question(required: bool, multi_select: bool) -> OnboardingQuestion {
        OnboardingQuestion {
            id: Uuid::new_v4(),
            sort_order: 1,
            prompt: "What brings you to Ora?".into(),
            required,
            config: QuestionConfig::MultipleChoice {
                options: vec!["sleep".into(), "stress".into(), "focus".into()],
                multi_select,
            },
            profile_field: Some("goal".into()),
        }
    }

    fn text_question(required: bool) -> OnboardingQuestion {
        OnboardingQuestion {
            id: Uuid::new_v4(),
            sort_order: 2,
            prompt: "Anything else?".into(),
            required,
            config: QuestionConfig::Text,
            profile_field: None,
        }
    }

    #[test]
    fn test_required_choice_rejects_empty_selection() {
        let question = choice_question(true, false);
        let result = validate_answer(&question, &AnswerValue::Choice { selected: vec![] });
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code,
            ErrorCode::MissingRequiredField
        );
    }

    #[test]
    fn test_optional_choice_accepts_empty_selection() {
        let question = choice_question(false, false);
        assert!(validate_answer(&question, &AnswerValue::Choice { selected: vec![] }).is_ok());
    }

    #[test]
    fn test_unknown_option_rejected() {
        let question = choice_question(true, false);
        let answer = AnswerValue::Choice {
            selected: vec!["world_peace".into()],
        };
        assert!(validate_answer(&question, &answer).is_err());
    }

    #[test]
    fn test_single_select_rejects_multiple() {
        let question = choice_question(true, false);
        let answer = AnswerValue::Choice {
            selected: vec!["sleep".into(), "stress".into()],
        };
        assert!(validate_answer(&question, &answer).is_err());
    }

    #[test]
    fn test_required_text_rejects_blank() {
        let question = text_question(true);
        let answer = AnswerValue::Text {
            text: "   ".into(),
        };
        let result = validate_answer(&question, &answer);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().code,
            ErrorCode::MissingRequiredField
        );
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let question = OnboardingQuestion {
            id: Uuid::new_v4(),
            sort_order: 3,
            prompt: "How stressed are you?".into(),
            required: true,
            config: QuestionConfig::Rating { min: 1, max: 5 },
            profile_field: None,
        };
        assert!(validate_answer(&question, &AnswerValue::Rating { value: 6 }).is_err());
        assert!(validate_answer(&question, &AnswerValue::Rating { value: 5 }).is_ok());
    }

    #[test]
    fn test_profile_group_requires_named_fields() {
        let question = OnboardingQuestion {
            id: Uuid::new_v4(),
            sort_order: 4,
            prompt: "About you".into(),
            required: true,
            config: QuestionConfig::ProfileGroup {
                fields: vec![
                    ProfileField {
                        name: "first_name".into(),
                        label: "First name".into(),
                        required: true,
                    },
                    ProfileField {
                        name: "pronouns".into(),
                        label: "Pronouns".into(),
                        required: false,
                    },
                ],
            },
            profile_field: None,
        };

        let mut missing = BTreeMap::new();
        missing.insert("pronouns".to_owned(), "they/them".to_owned());
        assert!(validate_answer(
            &question,
            &AnswerValue::Profile { fields: missing }
        )
        .is_err());

        let mut complete = BTreeMap::new();
        complete.insert("first_name".to_owned(), "Sam".to_owned());
        assert!(validate_answer(
            &question,
            &AnswerValue::Profile { fields: complete }
        )
        .is_ok());

        let mut unknown = BTreeMap::new();
        unknown.insert("first_name".to_owned(), "Sam".to_owned());
        unknown.insert("shoe_size".to_owned(), "42".to_owned());
        assert!(validate_answer(
            &question,
            &AnswerValue::Profile { fields: unknown }
        )
        .is_err());
    }

    #[test]
    fn test_mismatched_answer_type_rejected() {
        let question = choice_question(true, false);
        let answer = AnswerValue::Text {
            text: "sleep".into(),
        };
        let result = validate_answer(&question, &answer);
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_profile_updates_from_single_choice() {
        let question = choice_question(true, false);
        let answer = AnswerValue::Choice {
            selected: vec!["sleep".into()],
        };
        let mut updates = serde_json::Map::new();
        collect_profile_updates(&question, &answer, &mut updates);
        assert_eq!(updates["goal"], "sleep");
    }
}
