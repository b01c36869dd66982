// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Arc-shared database, auth, services, and notifier handles
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Expensive shared
//! objects (database pool, auth manager, services) are created once and
//! Arc-shared into every route handler instead of being rebuilt per request.

use crate::auth::AuthManager;
use crate::config::environment::ServerConfig;
use crate::database::Database;
use crate::middleware::AuthMiddleware;
use crate::notifications::EmailNotifier;
use crate::recommendations::MassageRecommendationEngine;
use crate::services::{OnboardingService, PracticeService};
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    pub database: Arc<Database>,
    pub auth_manager: Arc<AuthManager>,
    pub auth_middleware: Arc<AuthMiddleware>,
    pub practice_service: Arc<PracticeService>,
    pub onboarding_service: Arc<OnboardingService>,
    pub recommendation_engine: Arc<MassageRecommendationEngine>,
    pub notifier: Arc<dyn EmailNotifier>,
    pub http_client: reqwest::Client,
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        notifier: Arc<dyn EmailNotifier>,
        config: Arc<ServerConfig>,
    ) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);

        let auth_middleware = Arc::new(AuthMiddleware::new(
            Arc::clone(&auth_manager),
            Arc::clone(&database),
        ));
        let practice_service = Arc::new(PracticeService::new(
            Arc::clone(&database),
            Arc::clone(&notifier),
        ));
        let onboarding_service = Arc::new(OnboardingService::new(Arc::clone(&database)));
        let recommendation_engine =
            Arc::new(MassageRecommendationEngine::new(Arc::clone(&database)));

        Self {
            database,
            auth_manager,
            auth_middleware,
            practice_service,
            onboarding_service,
            recommendation_engine,
            notifier,
            http_client: reqwest::Client::new(),
            config,
        }
    }
}
