// ABOUTME: Massage recommendation engine over recent session history
// ABOUTME: Ranks canned routine suggestions with fixed confidence scores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

//! Massage recommendation engine.
//!
//! Produces a ranked list of canned recommendation kinds, each with a fixed
//! confidence score, from simple recency and frequency heuristics over the
//! user's recent massage history. There is no learning and no optimization;
//! the value is in surfacing the right canned routine at the right moment.

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{BodyZone, PracticeType};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Timelike, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Confidence assigned to the time-of-day routine suggestion
const TIME_OF_DAY_CONFIDENCE: f64 = 0.9;
/// Confidence assigned to the neglected-zones suggestion
const NEGLECTED_ZONES_CONFIDENCE: f64 = 0.8;
/// Confidence assigned to the favorite-zone suggestion
const FAVORITES_CONFIDENCE: f64 = 0.7;
/// Confidence assigned to the repeat-last suggestion
const REPEAT_LAST_CONFIDENCE: f64 = 0.6;

/// Tunable windows for the history heuristics
#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// A zone unused for this many days counts as neglected
    pub neglected_window_days: i64,
    /// Favorite-zone frequency is computed over this many days
    pub favorite_window_days: i64,
    /// Minimum sessions on one zone before it counts as a favorite
    pub favorite_min_sessions: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            neglected_window_days: 14,
            favorite_window_days: 30,
            favorite_min_sessions: 3,
        }
    }
}

/// Kind of canned suggestion
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    /// Routine matched to the current hour bucket
    TimeOfDayRoutine,
    /// Zones the user has not practiced recently
    NeglectedZones,
    /// The user's most frequent zone
    Favorites,
    /// The zone of the most recent session
    RepeatLast,
}

/// One ranked suggestion
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MassageRecommendation {
    /// Suggestion kind
    pub kind: RecommendationKind,
    /// Short display title
    pub title: String,
    /// Suggested body zones, most relevant first
    pub zones: Vec<BodyZone>,
    /// Fixed confidence score in `[0, 1]`
    pub confidence: f64,
}

/// Trait for generating massage recommendations
#[async_trait]
pub trait RecommendationEngineTrait {
    /// Generate ranked recommendations for a user at a point in time
    async fn recommend(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<MassageRecommendation>>;
}

/// Heuristic recommendation engine over stored session history
pub struct MassageRecommendationEngine {
    database: Arc<Database>,
    config: RecommendationConfig,
}

impl MassageRecommendationEngine {
    /// Create an engine with default heuristics windows
    #[must_use]
    pub fn new(database: Arc<Database>) -> Self {
        Self {
            database,
            config: RecommendationConfig::default(),
        }
    }

    /// Create an engine with custom configuration
    #[must_use]
    pub const fn with_config(database: Arc<Database>, config: RecommendationConfig) -> Self {
        Self { database, config }
    }

    /// Zones unused inside the neglected window
    fn neglected_zones(recent_zones: &[BodyZone]) -> Vec<BodyZone> {
        BodyZone::ALL
            .iter()
            .copied()
            .filter(|zone| !recent_zones.contains(zone))
            .collect()
    }

    /// Most frequent zone with enough sessions to call it a favorite
    fn favorite_zone(&self, zones: &[BodyZone]) -> Option<BodyZone> {
        let mut counts: HashMap<BodyZone, usize> = HashMap::new();
        for zone in zones {
            *counts.entry(*zone).or_insert(0) += 1;
        }

        counts
            .into_iter()
            .filter(|(_, count)| *count >= self.config.favorite_min_sessions)
            .max_by_key(|(_, count)| *count)
            .map(|(zone, _)| zone)
    }
}

/// Routine zones for the current hour bucket
fn time_of_day_routine(now: DateTime<Utc>) -> (&'static str, Vec<BodyZone>) {
    match now.hour() {
        5..=11 => (
            "Morning wake-up",
            vec![BodyZone::Face, BodyZone::Neck, BodyZone::Shoulders],
        ),
        12..=17 => (
            "Midday desk reset",
            vec![BodyZone::Neck, BodyZone::Hands, BodyZone::LowerBack],
        ),
        _ => (
            "Evening wind-down",
            vec![BodyZone::Back, BodyZone::Legs, BodyZone::Feet],
        ),
    }
}

#[async_trait]
impl RecommendationEngineTrait for MassageRecommendationEngine {
    async fn recommend(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<MassageRecommendation>> {
        let window_start = now - Duration::days(self.config.favorite_window_days);
        let history = self
            .database
            .get_sessions_since(user_id, PracticeType::Massage, window_start)
            .await
            .map_err(|e| AppError::database(format!("Failed to load massage history: {e}")))?;

        let mut recommendations = Vec::with_capacity(4);

        let (title, zones) = time_of_day_routine(now);
        recommendations.push(MassageRecommendation {
            kind: RecommendationKind::TimeOfDayRoutine,
            title: title.to_owned(),
            zones,
            confidence: TIME_OF_DAY_CONFIDENCE,
        });

        if !history.is_empty() {
            let neglected_cutoff = now - Duration::days(self.config.neglected_window_days);
            let recent_zones: Vec<BodyZone> = history
                .iter()
                .filter(|session| session.completed_at >= neglected_cutoff)
                .filter_map(|session| session.body_zone)
                .collect();

            let neglected = Self::neglected_zones(&recent_zones);
            if !neglected.is_empty() {
                recommendations.push(MassageRecommendation {
                    kind: RecommendationKind::NeglectedZones,
                    title: "Zones you haven't visited lately".to_owned(),
                    zones: neglected,
                    confidence: NEGLECTED_ZONES_CONFIDENCE,
                });
            }

            let all_zones: Vec<BodyZone> =
                history.iter().filter_map(|session| session.body_zone).collect();
            if let Some(favorite) = self.favorite_zone(&all_zones) {
                recommendations.push(MassageRecommendation {
                    kind: RecommendationKind::Favorites,
                    title: "Back to your favorite".to_owned(),
                    zones: vec![favorite],
                    confidence: FAVORITES_CONFIDENCE,
                });
            }

            if let Some(last_zone) = history.first().and_then(|session| session.body_zone) {
                recommendations.push(MassageRecommendation {
                    kind: RecommendationKind::RepeatLast,
                    title: "Repeat your last routine".to_owned(),
                    zones: vec![last_zone],
                    confidence: REPEAT_LAST_CONFIDENCE,
                });
            }
        }

        recommendations.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(Ordering::Equal)
        });

        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PracticeSession, User};
    use chrono::TimeZone;

    async fn seed_user(db: &Database) -> User {
        let user = User::new("rec@example.com".into(), "hash".into(), None);
        db.create_user(&user).await.unwrap();
        user
    }

    async fn seed_session(
        db: &Database,
        user: &User,
        zone: BodyZone,
        completed_at: DateTime<Utc>,
    ) {
        let mut session =
            PracticeSession::new(user.id, PracticeType::Massage, None, 300, Some(zone));
        session.completed_at = completed_at;
        db.insert_session(&session).await.unwrap();
    }

    #[test]
    fn test_time_of_day_buckets() {
        let morning = Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap();
        assert_eq!(time_of_day_routine(morning).0, "Morning wake-up");

        let midday = Utc.with_ymd_and_hms(2025, 4, 1, 13, 0, 0).unwrap();
        assert_eq!(time_of_day_routine(midday).0, "Midday desk reset");

        let night = Utc.with_ymd_and_hms(2025, 4, 1, 22, 0, 0).unwrap();
        assert_eq!(time_of_day_routine(night).0, "Evening wind-down");
    }

    #[tokio::test]
    async fn test_new_user_gets_only_time_of_day() {
        let db = Arc::new(Database::new("sqlite::memory:").await.unwrap());
        let user = seed_user(&db).await;
        let engine = MassageRecommendationEngine::new(Arc::clone(&db));

        let now = Utc.with_ymd_and_hms(2025, 4, 1, 9, 0, 0).unwrap();
        let recommendations = engine.recommend(user.id, now).await.unwrap();

        assert_eq!(recommendations.len(), 1);
        assert_eq!(
            recommendations[0].kind,
            RecommendationKind::TimeOfDayRoutine
        );
    }

    #[tokio::test]
    async fn test_history_produces_ranked_suggestions() {
        let db = Arc::new(Database::new("sqlite::memory:").await.unwrap());
        let user = seed_user(&db).await;
        let engine = MassageRecommendationEngine::new(Arc::clone(&db));

        let now = Utc.with_ymd_and_hms(2025, 4, 20, 9, 0, 0).unwrap();
        // Three neck sessions make a favorite; the latest session is shoulders
        for day in [2_i64, 4, 6] {
            seed_session(&db, &user, BodyZone::Neck, now - Duration::days(day)).await;
        }
        seed_session(&db, &user, BodyZone::Shoulders, now - Duration::days(1)).await;

        let recommendations = engine.recommend(user.id, now).await.unwrap();
        let kinds: Vec<RecommendationKind> =
            recommendations.iter().map(|r| r.kind).collect();

        assert_eq!(
            kinds,
            vec![
                RecommendationKind::TimeOfDayRoutine,
                RecommendationKind::NeglectedZones,
                RecommendationKind::Favorites,
                RecommendationKind::RepeatLast,
            ]
        );

        // Confidence ordering is descending
        for pair in recommendations.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }

        let favorite = recommendations
            .iter()
            .find(|r| r.kind == RecommendationKind::Favorites)
            .unwrap();
        assert_eq!(favorite.zones, vec![BodyZone::Neck]);

        let repeat = recommendations
            .iter()
            .find(|r| r.kind == RecommendationKind::RepeatLast)
            .unwrap();
        assert_eq!(repeat.zones, vec![BodyZone::Shoulders]);

        let neglected = recommendations
            .iter()
            .find(|r| r.kind == RecommendationKind::NeglectedZones)
            .unwrap();
        assert!(!neglected.zones.contains(&BodyZone::Neck));
        assert!(neglected.zones.contains(&BodyZone::Feet));
    }
}
