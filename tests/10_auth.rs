mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server.get_json("/health").await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");

    let (status, body) = server.get_json("/").await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("endpoints").is_some(), "missing endpoint map: {}", body);
    Ok(())
}

#[tokio::test]
async fn register_returns_user_and_token() -> Result<()> {
    let server = common::spawn_server().await?;

    let (token, user) = server.register("Budi", "budi@desa.id", "official").await?;
    assert!(!token.is_empty());
    assert_eq!(user["name"], "Budi");
    assert_eq!(user["email"], "budi@desa.id");
    assert_eq!(user["role"], "official");
    assert!(user["user_id"].as_i64().is_some());
    assert!(user.get("password_hash").is_none(), "hash leaked: {}", user);
    Ok(())
}

#[tokio::test]
async fn register_defaults_role_to_villager() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "name": "Ani", "email": "ani@desa.id", "password": "pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["user"]["role"], "villager");
    Ok(())
}

#[tokio::test]
async fn register_rejects_blank_fields() -> Result<()> {
    let server = common::spawn_server().await?;

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "name": "  ", "email": "x@desa.id", "password": "pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], "name: is required");
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_server_error_with_message() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("Budi", "budi@desa.id", "villager").await?;

    let res = server
        .client
        .post(server.url("/api/auth/register"))
        .json(&json!({ "name": "Budi 2", "email": "budi@desa.id", "password": "pw" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = res.json::<Value>().await?;
    assert!(
        body["error"].as_str().unwrap_or_default().contains("duplicate key"),
        "unexpected error body: {}",
        body
    );
    Ok(())
}

#[tokio::test]
async fn login_succeeds_with_registered_password() -> Result<()> {
    let server = common::spawn_server().await?;
    let (_, user) = server.register("Budi", "budi@desa.id", "official").await?;

    let res = server
        .client
        .post(server.url("/api/auth/login"))
        .json(&json!({ "email": "budi@desa.id", "password": common::TEST_PASSWORD }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["user"]["user_id"], user["user_id"]);
    assert!(body["token"].as_str().is_some());
    Ok(())
}

#[tokio::test]
async fn login_rejects_wrong_password_and_unknown_email() -> Result<()> {
    let server = common::spawn_server().await?;
    server.register("Budi", "budi@desa.id", "official").await?;

    for payload in [
        json!({ "email": "budi@desa.id", "password": "salah" }),
        json!({ "email": "budi@desa.id", "password": "" }),
        json!({ "email": "nobody@desa.id", "password": common::TEST_PASSWORD }),
    ] {
        let res = server
            .client
            .post(server.url("/api/auth/login"))
            .json(&payload)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "payload {}", payload);
        let body = res.json::<Value>().await?;
        assert_eq!(body["error"], "Invalid credentials");
    }
    Ok(())
}

#[tokio::test]
async fn me_resolves_token_owner() -> Result<()> {
    let server = common::spawn_server().await?;
    let (token, user) = server.register("Budi", "budi@desa.id", "admin").await?;

    let res = server
        .client
        .get(server.url("/api/auth/me"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["user_id"], user["user_id"]);
    assert_eq!(body["role"], "admin");

    let res = server.client.get(server.url("/api/auth/me")).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn tampered_or_foreign_tokens_are_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let (token, _) = server.register("Budi", "budi@desa.id", "official").await?;

    let foreign = village_infra_api::auth::generate_jwt(
        &village_infra_api::auth::Claims::new(1, "admin", 1),
        "some-other-secret",
    )?;

    for bad in [format!("{}x", token), foreign, "not-a-jwt".to_string()] {
        let (status, body) = server
            .post_json("/api/projects", &bad, json!({ "title": "Jalan" }))
            .await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
    Ok(())
}
