// ABOUTME: Notification subsystem module organization
// ABOUTME: Best-effort outbound email for welcome and streak milestone events
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

/// Email notifier trait and implementations
pub mod email;

pub use email::{
    notifier_from_config, DisabledEmailNotifier, EmailMessage, EmailNotifier, HttpEmailNotifier,
    RecordingEmailNotifier,
};
