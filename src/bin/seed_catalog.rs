// ABOUTME: Development seeding binary for catalog and onboarding configuration
// ABOUTME: Populates subcategories, content items, programs, screens, and questions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

//! Seeds a development database with a small catalog and onboarding flow.

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use ora_server::config::environment::ServerConfig;
use ora_server::database::Database;
use ora_server::models::{
    onboarding::ProfileField, ContentItem, InformationScreen, OnboardingQuestion, PlanTier,
    PracticeType, Program, QuestionConfig, Subcategory,
};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "seed-catalog")]
#[command(about = "Seed demo catalog and onboarding data into the Ora database")]
pub struct Args {
    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

fn item(
    title: &str,
    practice: PracticeType,
    subcategory_id: Option<Uuid>,
    minutes: i64,
    tags: &[&str],
    plan: PlanTier,
    sort_order: i64,
) -> ContentItem {
    ContentItem {
        id: Uuid::new_v4(),
        title: title.into(),
        subtitle: None,
        practice,
        subcategory_id,
        duration_seconds: minutes * 60,
        audio_url: Some(format!(
            "https://cdn.ora.app/audio/{}.mp3",
            title.to_lowercase().replace(' ', "-")
        )),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        required_plan: plan,
        sort_order,
        is_published: true,
        created_at: Utc::now(),
    }
}

async fn seed_catalog(db: &Database) -> Result<()> {
    let sleep = Subcategory {
        id: Uuid::new_v4(),
        title: "Sleep".into(),
        practice: PracticeType::Meditation,
        sort_order: 1,
    };
    let focus = Subcategory {
        id: Uuid::new_v4(),
        title: "Focus".into(),
        practice: PracticeType::Meditation,
        sort_order: 2,
    };
    let morning_yoga = Subcategory {
        id: Uuid::new_v4(),
        title: "Morning Flows".into(),
        practice: PracticeType::Yoga,
        sort_order: 1,
    };

    for subcategory in [&sleep, &focus, &morning_yoga] {
        db.upsert_subcategory(subcategory).await?;
    }

    let items = vec![
        item(
            "Deep Sleep Journey",
            PracticeType::Meditation,
            Some(sleep.id),
            20,
            &["sleep", "evening"],
            PlanTier::Free,
            1,
        ),
        item(
            "Racing Mind Rescue",
            PracticeType::Meditation,
            Some(sleep.id),
            12,
            &["sleep", "anxiety"],
            PlanTier::Premium,
            2,
        ),
        item(
            "Morning Clarity",
            PracticeType::Meditation,
            Some(focus.id),
            10,
            &["focus", "morning"],
            PlanTier::Free,
            1,
        ),
        item(
            "Sun Salutation Basics",
            PracticeType::Yoga,
            Some(morning_yoga.id),
            15,
            &["morning", "beginner"],
            PlanTier::Free,
            1,
        ),
        item(
            "Neck and Shoulder Release",
            PracticeType::Massage,
            None,
            8,
            &["desk", "tension"],
            PlanTier::Free,
            1,
        ),
        item(
            "Box Breathing",
            PracticeType::Breathing,
            None,
            5,
            &["stress", "quick"],
            PlanTier::Free,
            1,
        ),
    ];

    let mut sleep_item_ids = Vec::new();
    for content in &items {
        db.upsert_content_item(content).await?;
        if content.subcategory_id == Some(sleep.id) {
            sleep_item_ids.push(content.id);
        }
    }

    db.upsert_program(&Program {
        id: Uuid::new_v4(),
        title: "7 Nights of Better Sleep".into(),
        description: Some("A week-long wind-down routine".into()),
        practice: PracticeType::Meditation,
        item_ids: sleep_item_ids,
        tags: vec!["sleep".into()],
        required_plan: PlanTier::Premium,
        sort_order: 1,
        is_published: true,
        created_at: Utc::now(),
    })
    .await?;

    info!("Seeded {} content items", items.len());
    Ok(())
}

async fn seed_onboarding(db: &Database) -> Result<()> {
    db.upsert_screen(&InformationScreen {
        id: Uuid::new_v4(),
        sort_order: 1,
        title: "Welcome to Ora".into(),
        body: "A few questions help us shape your daily practice.".into(),
    })
    .await?;

    db.upsert_question(&OnboardingQuestion {
        id: Uuid::new_v4(),
        sort_order: 2,
        prompt: "What brings you to Ora?".into(),
        required: true,
        config: QuestionConfig::MultipleChoice {
            options: vec![
                "better_sleep".into(),
                "less_stress".into(),
                "more_focus".into(),
                "body_relief".into(),
            ],
            multi_select: true,
        },
        profile_field: Some("goals".into()),
    })
    .await?;

    db.upsert_question(&OnboardingQuestion {
        id: Uuid::new_v4(),
        sort_order: 3,
        prompt: "How stressed do you feel on a typical day?".into(),
        required: true,
        config: QuestionConfig::Rating { min: 1, max: 5 },
        profile_field: Some("baseline_stress".into()),
    })
    .await?;

    db.upsert_screen(&InformationScreen {
        id: Uuid::new_v4(),
        sort_order: 4,
        title: "Small steps, every day".into(),
        body: "Ten minutes a day builds a streak that sticks.".into(),
    })
    .await?;

    db.upsert_question(&OnboardingQuestion {
        id: Uuid::new_v4(),
        sort_order: 5,
        prompt: "Tell us about yourself".into(),
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
    })
    .await?;

    info!("Seeded onboarding flow");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    ora_server::logging::init_from_env()?;

    let config = ServerConfig::from_env()?;
    let database_url = args
        .database_url
        .unwrap_or_else(|| config.database.url.to_connection_string());

    let db = Database::new(&database_url).await?;
    info!("Seeding database at {}", database_url);

    seed_catalog(&db).await?;
    seed_onboarding(&db).await?;

    info!("Seeding complete");
    Ok(())
}
