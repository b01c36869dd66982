// ABOUTME: Integration tests for the practice statistics pipeline
// ABOUTME: Streak progression, milestone emails, and aggregate maintenance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::{Duration as ChronoDuration, Utc};
use ora_server::models::{PracticeType, UserStats};
use std::time::Duration;

/// Give spawned notification tasks a moment to run
async fn settle() {
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn test_first_session_updates_aggregates_and_sends_welcome() {
    let (resources, notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "first@example.com")
        .await
        .unwrap();

    let stats = resources
        .practice_service
        .record_session(&user, PracticeType::Meditation, None, 600, None)
        .await
        .unwrap();

    assert_eq!(stats.total_sessions, 1);
    assert_eq!(stats.total_minutes, 10);
    assert_eq!(stats.streak_days, 1);
    assert_eq!(stats.longest_streak, 1);
    assert!(stats.last_practice_at.is_some());

    let practice_stats = resources
        .practice_service
        .practice_stats(user.id)
        .await
        .unwrap();
    assert_eq!(practice_stats.len(), 1);
    assert_eq!(practice_stats[0].practice, PracticeType::Meditation);
    assert_eq!(practice_stats[0].session_count, 1);
    assert_eq!(practice_stats[0].total_minutes, 10);

    settle().await;
    let sent = notifier.sent_messages().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "first@example.com");
    assert!(sent[0].subject.contains("journey"));
}

#[tokio::test]
async fn test_second_session_same_day_keeps_streak_and_sends_nothing() {
    let (resources, notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "sameday@example.com")
        .await
        .unwrap();

    resources
        .practice_service
        .record_session(&user, PracticeType::Yoga, None, 300, None)
        .await
        .unwrap();
    let stats = resources
        .practice_service
        .record_session(&user, PracticeType::Yoga, None, 300, None)
        .await
        .unwrap();

    assert_eq!(stats.total_sessions, 2);
    assert_eq!(stats.streak_days, 1);

    settle().await;
    // Only the welcome email from the first session
    assert_eq!(notifier.sent_messages().await.len(), 1);
}

#[tokio::test]
async fn test_streak_milestone_email_fires_exactly_once_per_crossing() {
    let (resources, notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "streak@example.com")
        .await
        .unwrap();

    // A user six days into a streak whose last session was yesterday
    let mut seeded = UserStats::empty(user.id);
    seeded.total_sessions = 6;
    seeded.total_minutes = 60;
    seeded.streak_days = 6;
    seeded.longest_streak = 6;
    seeded.last_practice_at = Some(Utc::now() - ChronoDuration::days(1));
    resources.database.upsert_user_stats(&seeded).await.unwrap();

    let stats = resources
        .practice_service
        .record_session(&user, PracticeType::Breathing, None, 300, None)
        .await
        .unwrap();
    assert_eq!(stats.streak_days, 7);
    assert_eq!(stats.longest_streak, 7);

    settle().await;
    let sent = notifier.sent_messages().await;
    let milestone_mails: Vec<_> = sent
        .iter()
        .filter(|mail| mail.subject.contains("7 days"))
        .collect();
    assert_eq!(milestone_mails.len(), 1);

    // Recording again the same day leaves the streak at 7 and must not re-fire
    let stats = resources
        .practice_service
        .record_session(&user, PracticeType::Breathing, None, 300, None)
        .await
        .unwrap();
    assert_eq!(stats.streak_days, 7);

    settle().await;
    let sent = notifier.sent_messages().await;
    let milestone_mails: Vec<_> = sent
        .iter()
        .filter(|mail| mail.subject.contains("7 days"))
        .collect();
    assert_eq!(milestone_mails.len(), 1);
}

#[tokio::test]
async fn test_gap_resets_streak_without_milestone() {
    let (resources, notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "gap@example.com")
        .await
        .unwrap();

    let mut seeded = UserStats::empty(user.id);
    seeded.total_sessions = 20;
    seeded.total_minutes = 200;
    seeded.streak_days = 13;
    seeded.longest_streak = 13;
    seeded.last_practice_at = Some(Utc::now() - ChronoDuration::days(5));
    resources.database.upsert_user_stats(&seeded).await.unwrap();

    let stats = resources
        .practice_service
        .record_session(&user, PracticeType::Meditation, None, 600, None)
        .await
        .unwrap();

    assert_eq!(stats.streak_days, 1);
    assert_eq!(stats.longest_streak, 13);

    settle().await;
    // No milestone crossed on a reset (13 -> 1); no mail at all
    assert!(notifier.sent_messages().await.is_empty());
}

#[tokio::test]
async fn test_per_practice_aggregates_tracked_independently() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "types@example.com")
        .await
        .unwrap();

    resources
        .practice_service
        .record_session(&user, PracticeType::Meditation, None, 600, None)
        .await
        .unwrap();
    resources
        .practice_service
        .record_session(&user, PracticeType::Yoga, None, 1200, None)
        .await
        .unwrap();
    resources
        .practice_service
        .record_session(&user, PracticeType::Yoga, None, 600, None)
        .await
        .unwrap();

    let practice_stats = resources
        .practice_service
        .practice_stats(user.id)
        .await
        .unwrap();
    assert_eq!(practice_stats.len(), 2);

    let yoga = practice_stats
        .iter()
        .find(|stats| stats.practice == PracticeType::Yoga)
        .unwrap();
    assert_eq!(yoga.session_count, 2);
    assert_eq!(yoga.total_minutes, 30);

    let global = resources.practice_service.user_stats(user.id).await.unwrap();
    assert_eq!(global.total_sessions, 3);
    assert_eq!(global.total_minutes, 40);
}

#[tokio::test]
async fn test_non_positive_duration_rejected() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "zero@example.com")
        .await
        .unwrap();

    let result = resources
        .practice_service
        .record_session(&user, PracticeType::Meditation, None, 0, None)
        .await;
    assert!(result.is_err());

    assert_eq!(resources.database.count_sessions(user.id).await.unwrap(), 0);
}

#[tokio::test]
async fn test_stats_for_new_user_are_zero_valued() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "fresh@example.com")
        .await
        .unwrap();

    let stats = resources.practice_service.user_stats(user.id).await.unwrap();
    assert_eq!(stats.total_sessions, 0);
    assert_eq!(stats.streak_days, 0);
    assert!(stats.last_practice_at.is_none());
}
