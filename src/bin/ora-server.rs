// ABOUTME: Production server binary for the Ora wellness API
// ABOUTME: Loads environment configuration, runs migrations, and serves HTTP
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Ora Wellness

//! # Ora Server Binary
//!
//! Starts the Ora wellness API with environment configuration, database
//! migrations, and structured logging.

use anyhow::Result;
use clap::Parser;
use ora_server::{
    auth::AuthManager, config::environment::ServerConfig, database::Database, logging,
    notifications::notifier_from_config, resources::ServerResources, server,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "ora-server")]
#[command(about = "Ora Wellness API - practice tracking, journaling, and statistics")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database.url =
            ora_server::config::environment::DatabaseUrl::parse_url(&database_url);
    }

    logging::init_from_env()?;

    info!("Starting Ora Wellness API");
    info!("{}", config.summary());

    let database = Database::new(&config.database.url.to_connection_string()).await?;
    info!("Database initialized and migrated");

    let auth_manager = AuthManager::new(&config.auth.jwt_secret, config.auth.jwt_expiry_hours);
    let notifier = notifier_from_config(&config.email);

    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        notifier,
        Arc::new(config),
    ));

    server::run(resources).await
}
