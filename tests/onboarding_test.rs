// ABOUTME: Integration tests for the onboarding flow and answer intake
// ABOUTME: Merge ordering, per-type validation, and profile fold-in
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use ora_server::errors::ErrorCode;
use ora_server::models::{
    onboarding::ProfileField, AnswerValue, InformationScreen, OnboardingQuestion, OnboardingStep,
    QuestionConfig,
};
use std::collections::BTreeMap;
use uuid::Uuid;

fn screen(sort_order: i64, title: &str) -> InformationScreen {
    InformationScreen {
        id: Uuid::new_v4(),
        sort_order,
        title: title.into(),
        body: "body".into(),
    }
}

fn choice_question(sort_order: i64, prompt: &str) -> OnboardingQuestion {
    OnboardingQuestion {
        id: Uuid::new_v4(),
        sort_order,
        prompt: prompt.into(),
        required: true,
        config: QuestionConfig::MultipleChoice {
            options: vec!["better_sleep".into(), "less_stress".into()],
            multi_select: false,
        },
        profile_field: Some("goal".into()),
    }
}

#[tokio::test]
async fn test_flow_merges_screens_and_questions_by_sort_order() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let db = &resources.database;

    db.upsert_question(&choice_question(2, "Why are you here?"))
        .await
        .unwrap();
    db.upsert_screen(&screen(1, "Welcome")).await.unwrap();
    db.upsert_screen(&screen(3, "Habits stick")).await.unwrap();
    db.upsert_question(&choice_question(4, "Another question"))
        .await
        .unwrap();

    let flow = resources.onboarding_service.flow().await.unwrap();
    assert_eq!(flow.len(), 4);

    let orders: Vec<i64> = flow.iter().map(OnboardingStep::sort_order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4]);

    assert!(matches!(flow[0], OnboardingStep::Screen(_)));
    assert!(matches!(flow[1], OnboardingStep::Question(_)));
    assert!(matches!(flow[2], OnboardingStep::Screen(_)));
    assert!(matches!(flow[3], OnboardingStep::Question(_)));
}

#[tokio::test]
async fn test_shared_sort_order_puts_screen_before_question() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let db = &resources.database;

    db.upsert_question(&choice_question(1, "Tied question"))
        .await
        .unwrap();
    db.upsert_screen(&screen(1, "Tied screen")).await.unwrap();

    let flow = resources.onboarding_service.flow().await.unwrap();
    assert_eq!(flow.len(), 2);
    assert!(matches!(flow[0], OnboardingStep::Screen(_)));
    assert!(matches!(flow[1], OnboardingStep::Question(_)));
}

#[tokio::test]
async fn test_valid_answers_stored_and_profile_updated() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "ob@example.com")
        .await
        .unwrap();

    let goal = choice_question(1, "Why are you here?");
    resources.database.upsert_question(&goal).await.unwrap();

    let about_you = OnboardingQuestion {
        id: Uuid::new_v4(),
        sort_order: 2,
        prompt: "About you".into(),
        required: true,
        config: QuestionConfig::ProfileGroup {
            fields: vec![ProfileField {
                name: "first_name".into(),
                label: "First name".into(),
                required: true,
            }],
        },
        profile_field: None,
    };
    resources.database.upsert_question(&about_you).await.unwrap();

    let mut profile_fields = BTreeMap::new();
    profile_fields.insert("first_name".to_owned(), "Sam".to_owned());

    let stored = resources
        .onboarding_service
        .submit_answers(
            user.id,
            vec![
                (
                    goal.id,
                    AnswerValue::Choice {
                        selected: vec!["better_sleep".into()],
                    },
                ),
                (
                    about_you.id,
                    AnswerValue::Profile {
                        fields: profile_fields,
                    },
                ),
            ],
        )
        .await
        .unwrap();
    assert_eq!(stored, 2);

    let responses = resources.database.list_responses(user.id).await.unwrap();
    assert_eq!(responses.len(), 2);

    let profile = resources
        .database
        .get_user_profile(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile["goal"], "better_sleep");
    assert_eq!(profile["first_name"], "Sam");
}

#[tokio::test]
async fn test_blank_required_answer_rejects_whole_batch() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "blank@example.com")
        .await
        .unwrap();

    let goal = choice_question(1, "Why are you here?");
    resources.database.upsert_question(&goal).await.unwrap();

    let text = OnboardingQuestion {
        id: Uuid::new_v4(),
        sort_order: 2,
        prompt: "Anything else?".into(),
        required: true,
        config: QuestionConfig::Text,
        profile_field: None,
    };
    resources.database.upsert_question(&text).await.unwrap();

    let result = resources
        .onboarding_service
        .submit_answers(
            user.id,
            vec![
                (
                    goal.id,
                    AnswerValue::Choice {
                        selected: vec!["better_sleep".into()],
                    },
                ),
                (
                    text.id,
                    AnswerValue::Text {
                        text: "   ".into(),
                    },
                ),
            ],
        )
        .await;

    assert!(result.is_err());
    assert_eq!(
        result.unwrap_err().code,
        ErrorCode::MissingRequiredField
    );

    // Validation happens before persistence: nothing was stored
    let responses = resources.database.list_responses(user.id).await.unwrap();
    assert!(responses.is_empty());
}

#[tokio::test]
async fn test_answer_for_unknown_question_rejected() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "unknown@example.com")
        .await
        .unwrap();

    let result = resources
        .onboarding_service
        .submit_answers(
            user.id,
            vec![(
                Uuid::new_v4(),
                AnswerValue::Text {
                    text: "hello".into(),
                },
            )],
        )
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_resubmitting_answer_overwrites() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "redo@example.com")
        .await
        .unwrap();

    let goal = choice_question(1, "Why are you here?");
    resources.database.upsert_question(&goal).await.unwrap();

    for choice in ["better_sleep", "less_stress"] {
        resources
            .onboarding_service
            .submit_answers(
                user.id,
                vec![(
                    goal.id,
                    AnswerValue::Choice {
                        selected: vec![choice.into()],
                    },
                )],
            )
            .await
            .unwrap();
    }

    let responses = resources.database.list_responses(user.id).await.unwrap();
    assert_eq!(responses.len(), 1);
    assert_eq!(
        responses[0].answer,
        AnswerValue::Choice {
            selected: vec!["less_stress".into()]
        }
    );

    let profile = resources
        .database
        .get_user_profile(user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile["goal"], "less_stress");
}
