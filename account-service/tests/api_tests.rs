mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_signup_success_returns_token_for_new_user() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/signup")
        .json(&json!({
            "email": "a@b.com",
            "password": "password123",
            "nickname": "X"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["user"]["email"], "a@b.com");
    assert_eq!(body["data"]["user"]["nickname"], "X");
    assert_eq!(body["data"]["user"]["id"], 1);
    assert!(body["data"]["user"]["created_at"].is_string());
    assert!(body["data"]["user"].get("password_hash").is_none());

    let token = body["data"]["token"].as_str().unwrap();
    let claims = app.token_validator.validate(token).unwrap();
    assert_eq!(claims.email(), "a@b.com");
    assert_eq!(claims.user_id, 1);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", "password123", "X").await;

    let response = app
        .post("/api/signup")
        .json(&json!({
            "email": "a@b.com",
            "password": "password456",
            "nickname": "Y"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "입력값에 오류가 있습니다.");
    assert_eq!(
        body["data"]["field_errors"]["email"],
        "이미 사용 중인 이메일입니다."
    );
    assert!(body["data"]["field_errors"].get("nickname").is_none());
    assert_eq!(app.store.count().await, 1);
}

#[tokio::test]
async fn test_signup_reports_every_invalid_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/signup")
        .json(&json!({
            "email": "not-an-email",
            "password": "short"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    let field_errors = &body["data"]["field_errors"];
    assert_eq!(field_errors["email"], "올바른 이메일 형식이 아닙니다.");
    assert_eq!(field_errors["password"], "비밀번호는 8자 이상이어야 합니다.");
    assert_eq!(field_errors["nickname"], "닉네임은 필수입니다.");
    assert_eq!(app.store.count().await, 0);
}

#[tokio::test]
async fn test_concurrent_signups_with_same_email() {
    let app = TestApp::spawn().await;

    let mut requests = tokio::task::JoinSet::new();
    for i in 0..8 {
        requests.spawn(
            app.post("/api/signup")
                .json(&json!({
                    "email": "race@example.com",
                    "password": "password123",
                    "nickname": format!("racer{}", i)
                }))
                .send(),
        );
    }

    let mut created = 0;
    let mut rejected = 0;
    while let Some(response) = requests.join_next().await {
        let response = response.unwrap().expect("Failed to execute request");
        match response.status() {
            StatusCode::CREATED => created += 1,
            StatusCode::BAD_REQUEST => {
                let body: serde_json::Value = response.json().await.unwrap();
                assert_eq!(
                    body["data"]["field_errors"]["email"],
                    "이미 사용 중인 이메일입니다."
                );
                rejected += 1;
            }
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(rejected, 7);
    assert_eq!(app.store.count().await, 1);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", "password123", "X").await;

    let response = app
        .post("/api/login")
        .json(&json!({
            "email": "a@b.com",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["user"]["email"], "a@b.com");

    let token = body["data"]["token"].as_str().unwrap();
    let claims = app.token_validator.validate(token).unwrap();
    assert_eq!(claims.user_id, 1);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", "password123", "X").await;

    let response = app
        .post("/api/login")
        .json(&json!({
            "email": "a@b.com",
            "password": "wrong-password"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "이메일 또는 비밀번호가 올바르지 않습니다."
    );
    assert!(body["data"].get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/login")
        .json(&json!({
            "email": "nobody@example.com",
            "password": "password123"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["data"]["message"],
        "이메일 또는 비밀번호가 올바르지 않습니다."
    );
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/login")
        .json(&json!({ "email": "", "password": "password123" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "이메일을 입력해주세요.");

    let response = app
        .post("/api/login")
        .json(&json!({ "email": "a@b.com" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["data"]["message"], "비밀번호를 입력해주세요.");
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "인증이 필요합니다.");
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let app = TestApp::spawn().await;
    let token = app.signup("a@b.com", "password123", "X").await;

    let response = app
        .get_authenticated("/api/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["email"], "a@b.com");
}

#[tokio::test]
async fn test_expired_token_on_public_route_is_anonymous() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", "password123", "X").await;

    let expired = app
        .token_issuer
        .issue_at("a@b.com", 1, Utc::now() - Duration::hours(25))
        .unwrap();

    let response = app
        .get_authenticated("/api/hello", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["authenticated"], false);
}

#[tokio::test]
async fn test_expired_token_on_protected_route_is_rejected() {
    let app = TestApp::spawn().await;
    app.signup("a@b.com", "password123", "X").await;

    let expired = app
        .token_issuer
        .issue_at("a@b.com", 1, Utc::now() - Duration::hours(25))
        .unwrap();

    let response = app
        .get_authenticated("/api/me", &expired)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_hello_greets_authenticated_user() {
    let app = TestApp::spawn().await;
    let token = app.signup("a@b.com", "password123", "X").await;

    let response = app
        .get_authenticated("/api/hello", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["authenticated"], true);
    assert_eq!(body["data"]["message"], "Hello, a@b.com");
}

#[tokio::test]
async fn test_token_for_deleted_account_loses_access() {
    let app = TestApp::spawn().await;
    let token = app.signup("a@b.com", "password123", "X").await;
    app.store.remove("a@b.com").await;

    let response = app
        .get_authenticated("/api/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/api/logout")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["message"], "로그아웃이 완료되었습니다.");
}
