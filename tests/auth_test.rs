// ABOUTME: Integration tests for registration, login, and session tokens
// ABOUTME: Validates credential checks, account states, and JWT round trips
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ora Wellness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use ora_server::errors::ErrorCode;
use ora_server::models::UserStatus;
use ora_server::routes::{AuthService, LoginRequest, RegisterRequest};

fn register_request(email: &str) -> RegisterRequest {
    RegisterRequest {
        email: email.into(),
        password: "sunrise42".into(),
        display_name: Some("Test User".into()),
    }
}

#[tokio::test]
async fn test_register_then_login_round_trip() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let service = AuthService::new(resources.clone());

    let registered = service
        .register(register_request("new@example.com"))
        .await
        .unwrap();
    assert!(!registered.user_id.is_empty());

    let login = service
        .login(LoginRequest {
            email: "new@example.com".into(),
            password: "sunrise42".into(),
        })
        .await
        .unwrap();

    assert!(!login.jwt_token.is_empty());
    assert_eq!(login.user.email, "new@example.com");
    assert_eq!(login.user.plan, "free");

    // The issued token authenticates back to the same user
    let user_id = resources
        .auth_manager
        .user_id_from_token(&login.jwt_token)
        .unwrap();
    assert_eq!(user_id.to_string(), login.user.user_id);
}

#[tokio::test]
async fn test_register_rejects_bad_inputs() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let service = AuthService::new(resources);

    let bad_email = RegisterRequest {
        email: "not-an-email".into(),
        ..register_request("x@example.com")
    };
    assert!(service.register(bad_email).await.is_err());

    let weak_password = RegisterRequest {
        password: "short".into(),
        ..register_request("weak@example.com")
    };
    assert!(service.register(weak_password).await.is_err());
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let service = AuthService::new(resources);

    service
        .register(register_request("dup@example.com"))
        .await
        .unwrap();
    let second = service.register(register_request("dup@example.com")).await;
    assert!(second.is_err());
}

#[tokio::test]
async fn test_login_rejects_wrong_password() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let service = AuthService::new(resources);

    service
        .register(register_request("pw@example.com"))
        .await
        .unwrap();

    let result = service
        .login(LoginRequest {
            email: "pw@example.com".into(),
            password: "wrong-password-1".into(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().code, ErrorCode::AuthInvalid);
}

#[tokio::test]
async fn test_login_rejects_unknown_email() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let service = AuthService::new(resources);

    let result = service
        .login(LoginRequest {
            email: "ghost@example.com".into(),
            password: "whatever1".into(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().code, ErrorCode::AuthInvalid);
}

#[tokio::test]
async fn test_suspended_user_cannot_login() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let service = AuthService::new(resources.clone());

    let registered = service
        .register(register_request("banned@example.com"))
        .await
        .unwrap();
    let user_id = registered.user_id.parse().unwrap();
    resources
        .database
        .update_user_status(user_id, UserStatus::Suspended)
        .await
        .unwrap();

    let result = service
        .login(LoginRequest {
            email: "banned@example.com".into(),
            password: "sunrise42".into(),
        })
        .await;

    assert!(result.is_err());
    assert_eq!(result.unwrap_err().code, ErrorCode::PermissionDenied);
}

#[tokio::test]
async fn test_auth_middleware_accepts_valid_bearer_token() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();
    let user = common::create_test_user(&resources.database, "mw@example.com")
        .await
        .unwrap();
    let token = resources.auth_manager.generate_token(&user).unwrap();

    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        "authorization",
        format!("Bearer {token}").parse().unwrap(),
    );

    let authed = resources
        .auth_middleware
        .authenticate_request(&headers)
        .await
        .unwrap();
    assert_eq!(authed.id, user.id);
}

#[tokio::test]
async fn test_auth_middleware_rejects_missing_and_garbage_tokens() {
    let (resources, _notifier) = common::create_test_resources().await.unwrap();

    let empty = axum::http::HeaderMap::new();
    let missing = resources.auth_middleware.authenticate_request(&empty).await;
    assert!(missing.is_err());
    assert_eq!(missing.unwrap_err().code, ErrorCode::AuthRequired);

    let mut headers = axum::http::HeaderMap::new();
    headers.insert("authorization", "Bearer not.a.token".parse().unwrap());
    let garbage = resources
        .auth_middleware
        .authenticate_request(&headers)
        .await;
    assert!(garbage.is_err());
}
