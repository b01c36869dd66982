// ABOUTME: Calendar-day helpers for streak arithmetic
// ABOUTME: UTC day bucketing keeps streak math deterministic across devices
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

use chrono::{DateTime, Utc};

/// Whole calendar days between two timestamps, bucketed by UTC date
///
/// Returns 0 for the same day, 1 when `later` falls on the day after
/// `earlier`, and negative values when `later` precedes `earlier`.
#[must_use]
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    later
        .date_naive()
        .signed_duration_since(earlier.date_naive())
        .num_days()
}
