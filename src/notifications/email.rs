// ABOUTME: Outbound email delivery for account and streak notifications
// ABOUTME: Transactional-mail HTTP client plus disabled and test recorders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! Best-effort email delivery.
//!
//! Every send is fire-and-forget from the caller's perspective: the practice
//! service spawns delivery onto a background task and failures are logged and
//! swallowed, never surfaced to the triggering request.

use crate::config::environment::EmailConfig;
use crate::errors::AppError;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A rendered outbound email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// Plain-text body
    pub body: String,
}

impl EmailMessage {
    /// Welcome email sent after a user's very first completed session
    #[must_use]
    pub fn first_session(to: &str, display_name: Option<&str>) -> Self {
        let name = display_name.unwrap_or("there");
        Self {
            to: to.to_owned(),
            subject: "Your practice journey has begun".to_owned(),
            body: format!(
                "Hi {name},\n\n\
                 You just completed your first practice session. Showing up is \
                 the hardest part, and you did it.\n\n\
                 Come back tomorrow to start a streak.\n\n\
                 The Ora team"
            ),
        }
    }

    /// Milestone email sent when a streak crosses one of the fixed thresholds
    #[must_use]
    pub fn streak_milestone(to: &str, display_name: Option<&str>, streak_days: i64) -> Self {
        let name = display_name.unwrap_or("there");
        Self {
            to: to.to_owned(),
            subject: format!("{streak_days} days in a row"),
            body: format!(
                "Hi {name},\n\n\
                 You've practiced {streak_days} days in a row. That kind of \
                 consistency is what lasting change is made of.\n\n\
                 Keep it going.\n\n\
                 The Ora team"
            ),
        }
    }
}

/// Delivery backend for outbound email
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Deliver one message
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}

/// Notifier that posts to a transactional-email HTTP API
pub struct HttpEmailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
}

impl HttpEmailNotifier {
    /// Create a notifier from email configuration
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config("Email API key not configured"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_url: config.api_url.clone(),
            api_key,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailNotifier for HttpEmailNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let payload = json!({
            "personalizations": [{ "to": [{ "email": message.to }] }],
            "from": { "email": self.from_address },
            "subject": message.subject,
            "content": [{ "type": "text/plain", "value": message.body }]
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AppError::external_service(
                "email",
                format!("delivery failed with status {status}: {detail}"),
            )
            .into());
        }

        tracing::debug!(to = %message.to, subject = %message.subject, "Email delivered");
        Ok(())
    }
}

/// Notifier used when no email API key is configured; logs and succeeds
pub struct DisabledEmailNotifier;

#[async_trait]
impl EmailNotifier for DisabledEmailNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        tracing::debug!(
            to = %message.to,
            subject = %message.subject,
            "Email sending disabled; dropping message"
        );
        Ok(())
    }
}

/// Notifier that records messages instead of delivering them (test support)
#[derive(Default)]
pub struct RecordingEmailNotifier {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailNotifier {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message recorded so far
    pub async fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl EmailNotifier for RecordingEmailNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}

/// Pick the notifier implementation for the current configuration
#[must_use]
pub fn notifier_from_config(config: &EmailConfig) -> Arc<dyn EmailNotifier> {
    match HttpEmailNotifier::new(config) {
        Ok(notifier) => Arc::new(notifier),
        Err(_) => {
            tracing::info!("No email API key configured; email notifications disabled");
            Arc::new(DisabledEmailNotifier)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier_captures_messages() {
        let notifier = RecordingEmailNotifier::new();
        let message = EmailMessage::first_session("a@b.com", Some("Ana"));
        notifier.send(&message).await.unwrap();

        let sent = notifier.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert!(sent[0].body.contains("Ana"));
    }

    #[test]
    fn test_milestone_message_names_the_day_count() {
        let message = EmailMessage::streak_milestone("a@b.com", None, 30);
        assert_eq!(message.subject, "30 days in a row");
        assert!(message.body.contains("30 days in a row"));
    }
}
