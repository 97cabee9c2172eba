//! Integration tests for the authentication gate on GET /home.

use auth_test_utils::{
    test_vars, TestAuthServer, TestTokenBuilder, OTHER_SIGNING_SECRET, TEST_USERNAME,
};
use auth_service::config::Config;
use jsonwebtoken::Algorithm;
use reqwest::{header, StatusCode};

async fn get_home(
    server: &TestAuthServer,
    authorization: Option<&str>,
) -> Result<reqwest::Response, anyhow::Error> {
    let mut request = server.client().get(format!("{}/home", server.url()));
    if let Some(value) = authorization {
        request = request.header(header::AUTHORIZATION, value);
    }
    Ok(request.send().await?)
}

/// Assert a 401 with the given error kind and a Bearer challenge.
async fn assert_rejected(response: reqwest::Response, kind: &str) -> Result<(), anyhow::Error> {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .map(|v| v.to_str().unwrap_or_default().to_string());
    assert_eq!(challenge.as_deref(), Some("Bearer realm=\"auth-service\""));

    let json: serde_json::Value = response.json().await?;
    assert_eq!(json["error"], kind);
    Ok(())
}

// ============================================================================
// Admitted requests
// ============================================================================

#[tokio::test]
async fn test_login_token_grants_access() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;
    let token = server.login_token().await?;

    let response = get_home(&server, Some(&format!("Bearer {}", token))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = response.json().await?;
    assert_eq!(
        json,
        serde_json::json!({"code": 200, "msg": "success", "data": TEST_USERNAME})
    );

    Ok(())
}

#[tokio::test]
async fn test_token_reusable_until_expiry() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;
    let token = server.login_token().await?;

    for _ in 0..3 {
        let response = get_home(&server, Some(&format!("Bearer {}", token))).await?;
        assert_eq!(response.status(), StatusCode::OK);
    }

    Ok(())
}

#[tokio::test]
async fn test_externally_minted_token_with_shared_secret_is_accepted() -> Result<(), anyhow::Error>
{
    let server = TestAuthServer::spawn_default().await?;
    let token = TestTokenBuilder::new().for_user("alice").build();

    let response = get_home(&server, Some(&format!("Bearer {}", token))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = response.json().await?;
    assert_eq!(json["data"], "alice");

    Ok(())
}

// ============================================================================
// Header rejections
// ============================================================================

#[tokio::test]
async fn test_missing_header_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;

    assert_rejected(get_home(&server, None).await?, "MissingCredentials").await
}

#[tokio::test]
async fn test_malformed_headers_are_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;
    let token = server.login_token().await?;

    for value in [
        format!("Basic {}", token),
        format!("bearer {}", token),
        token.clone(),
        format!("Bearer {} extra", token),
        "Bearer".to_string(),
    ] {
        assert_rejected(get_home(&server, Some(&value)).await?, "MalformedHeader").await?;
    }

    Ok(())
}

// ============================================================================
// Token rejections
// ============================================================================

#[tokio::test]
async fn test_expired_token_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;
    let token = TestTokenBuilder::new().expires_in(-10).build();

    assert_rejected(
        get_home(&server, Some(&format!("Bearer {}", token))).await?,
        "TokenExpired",
    )
    .await
}

#[tokio::test]
async fn test_token_from_other_secret_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;
    let token = TestTokenBuilder::new().sign(OTHER_SIGNING_SECRET);

    assert_rejected(
        get_home(&server, Some(&format!("Bearer {}", token))).await?,
        "InvalidSignature",
    )
    .await
}

#[tokio::test]
async fn test_restart_with_new_secret_invalidates_tokens() -> Result<(), anyhow::Error> {
    let first = TestAuthServer::spawn_default().await?;
    let token = first.login_token().await?;

    let mut vars = test_vars();
    vars.insert(
        "AUTH_SIGNING_SECRET".to_string(),
        OTHER_SIGNING_SECRET.to_string(),
    );
    let second = TestAuthServer::spawn(Config::from_vars(&vars)?).await?;

    assert_rejected(
        get_home(&second, Some(&format!("Bearer {}", token))).await?,
        "InvalidSignature",
    )
    .await
}

#[tokio::test]
async fn test_other_algorithm_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;
    let token = TestTokenBuilder::new()
        .with_algorithm(Algorithm::HS512)
        .build();

    assert_rejected(
        get_home(&server, Some(&format!("Bearer {}", token))).await?,
        "MalformedToken",
    )
    .await
}

#[tokio::test]
async fn test_garbage_token_is_rejected() -> Result<(), anyhow::Error> {
    let server = TestAuthServer::spawn_default().await?;

    assert_rejected(
        get_home(&server, Some("Bearer not.a.jwt")).await?,
        "MalformedToken",
    )
    .await
}
