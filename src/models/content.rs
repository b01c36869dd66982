// ABOUTME: Catalog entry models for guided practice content
// ABOUTME: ContentItem, Program, and Subcategory definitions with plan gating
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PlanTier, PracticeType};

/// A single playable catalog entry (guided meditation, yoga flow, massage routine)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Unique item identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Short subtitle shown under the title
    pub subtitle: Option<String>,
    /// Practice kind this item belongs to
    pub practice: PracticeType,
    /// Owning subcategory, if any
    pub subcategory_id: Option<Uuid>,
    /// Playback length in seconds
    pub duration_seconds: i64,
    /// Audio asset location
    pub audio_url: Option<String>,
    /// Free-form filter tags
    pub tags: Vec<String>,
    /// Minimum plan tier required to play
    pub required_plan: PlanTier,
    /// Catalog ordering key
    pub sort_order: i64,
    /// Whether the item is visible to clients
    pub is_published: bool,
    /// When the item was created
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Whether a user on `plan` can play this item
    #[must_use]
    pub const fn unlocked_for(&self, plan: PlanTier) -> bool {
        !self.required_plan.is_premium() || plan.is_premium()
    }

    /// Whether this item carries any of the requested tags
    #[must_use]
    pub fn matches_tags(&self, wanted: &[String]) -> bool {
        wanted.is_empty() || wanted.iter().any(|tag| self.tags.contains(tag))
    }
}

/// An ordered multi-day program bundling catalog items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    /// Unique program identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Long-form description
    pub description: Option<String>,
    /// Practice kind the program belongs to
    pub practice: PracticeType,
    /// Member items in playback order
    pub item_ids: Vec<Uuid>,
    /// Free-form filter tags
    pub tags: Vec<String>,
    /// Minimum plan tier required to start
    pub required_plan: PlanTier,
    /// Catalog ordering key
    pub sort_order: i64,
    /// Whether the program is visible to clients
    pub is_published: bool,
    /// When the program was created
    pub created_at: DateTime<Utc>,
}

impl Program {
    /// Whether a user on `plan` can start this program
    #[must_use]
    pub const fn unlocked_for(&self, plan: PlanTier) -> bool {
        !self.required_plan.is_premium() || plan.is_premium()
    }

    /// Whether this program carries any of the requested tags
    #[must_use]
    pub fn matches_tags(&self, wanted: &[String]) -> bool {
        wanted.is_empty() || wanted.iter().any(|tag| self.tags.contains(tag))
    }
}

/// A catalog grouping inside one practice type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subcategory {
    /// Unique subcategory identifier
    pub id: Uuid,
    /// Display title
    pub title: String,
    /// Practice kind the subcategory belongs to
    pub practice: PracticeType,
    /// Catalog ordering key
    pub sort_order: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(required_plan: PlanTier, tags: &[&str]) -> ContentItem {
        ContentItem {
            id: Uuid::new_v4(),
            title: "Evening wind-down".into(),
            subtitle: None,
            practice: PracticeType::Meditation,
            subcategory_id: None,
            duration_seconds: 600,
            audio_url: None,
            tags: tags.iter().map(|t| (*t).to_owned()).collect(),
            required_plan,
            sort_order: 0,
            is_published: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_premium_item_locked_for_free_plan() {
        let premium = item(PlanTier::Premium, &[]);
        assert!(!premium.unlocked_for(PlanTier::Free));
        assert!(premium.unlocked_for(PlanTier::Premium));

        let free = item(PlanTier::Free, &[]);
        assert!(free.unlocked_for(PlanTier::Free));
    }

    #[test]
    fn test_tag_match_is_any_of() {
        let tagged = item(PlanTier::Free, &["sleep", "evening"]);
        assert!(tagged.matches_tags(&["sleep".into(), "focus".into()]));
        assert!(!tagged.matches_tags(&["focus".into()]));
        assert!(tagged.matches_tags(&[]));
    }
}
