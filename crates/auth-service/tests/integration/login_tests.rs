//! Integration tests for POST /auth.

use auth_service::config::Config;
use auth_test_utils::{
    test_vars, TestAuthServer, TokenAssertions, TEST_ISSUER, TEST_PASSWORD,
    TEST_TOKEN_TTL_SECONDS, TEST_USERNAME,
};
use reqwest::StatusCode;

// ============================================================================
// Successful login
// ============================================================================

#[tokio::test]
async fn test_login_issues_token_for_valid_credentials() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;

    let envelope = server.login(TEST_USERNAME, TEST_PASSWORD).await?;

    assert_eq!(envelope.code, 200);
    assert_eq!(envelope.msg, "success");
    let token = envelope.data.map(|d| d.token).unwrap_or_default();
    token
        .assert_valid_jwt()
        .assert_for_subject(TEST_USERNAME)
        .assert_issued_by(TEST_ISSUER)
        .assert_expires_in(TEST_TOKEN_TTL_SECONDS as u64);

    Ok(())
}

#[tokio::test]
async fn test_login_honors_configured_ttl_and_issuer() -> Result<(), anyhow::Error> {
    let mut vars = test_vars();
    vars.insert("AUTH_TOKEN_TTL_SECONDS".to_string(), "900".to_string());
    vars.insert("AUTH_ISSUER".to_string(), "other-issuer".to_string());
    let server = TestAuthServer::spawn(Config::from_vars(&vars)?).await?;

    let token = server.login_token().await?;

    token.assert_issued_by("other-issuer").assert_expires_in(900);

    Ok(())
}

// ============================================================================
// Rejected login
// ============================================================================

#[tokio::test]
async fn test_login_wrong_password_returns_auth_failed() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;

    let envelope = server.login(TEST_USERNAME, "wrong").await?;

    assert_eq!(envelope.code, 400);
    assert_eq!(envelope.msg, "auth failed");
    assert!(envelope.data.is_none());

    Ok(())
}

#[tokio::test]
async fn test_login_unknown_user_is_indistinguishable() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;

    let wrong_password = server.login(TEST_USERNAME, "wrong").await?;
    let unknown_user = server.login("nobody", TEST_PASSWORD).await?;

    assert_eq!(wrong_password, unknown_user);

    Ok(())
}

#[tokio::test]
async fn test_login_malformed_body_returns_invalid_params() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;

    let response = server
        .client()
        .post(format!("{}/auth", server.url()))
        .header("content-type", "application/json")
        .body("{\"username\":")
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = response.json().await?;
    assert_eq!(json, serde_json::json!({"code": 422, "msg": "invalid params"}));

    Ok(())
}

#[tokio::test]
async fn test_login_empty_credentials_return_invalid_params() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;

    let envelope = server.login("", "").await?;

    assert_eq!(envelope.code, 422);
    assert_eq!(envelope.msg, "invalid params");

    Ok(())
}
