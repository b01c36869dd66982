// ABOUTME: Configuration module organization for the Ora server
// ABOUTME: Environment-based runtime configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

/// Environment variable driven server configuration
pub mod environment;
