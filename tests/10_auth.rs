mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
#[ignore = "requires PostgreSQL loaded with sql/schema.sql"]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/health")).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL loaded with sql/schema.sql"]
async fn sign_up_sign_in_and_list_actors() -> Result<()> {
    let server = common::ensure_server().await?;
    let token = common::token_for(server, "user").await?;

    let res = reqwest::Client::new()
        .get(server.url("/actor"))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.json::<Value>().await?.is_array());
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL loaded with sql/schema.sql"]
async fn duplicate_login_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let body = json!({ "login": common::unique_login("dup"), "password": "pw" });

    let first = client.post(server.url("/sign-up")).json(&body).send().await?;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = client.post(server.url("/sign-up")).json(&body).send().await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
#[ignore = "requires PostgreSQL loaded with sql/schema.sql"]
async fn missing_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let res = reqwest::get(server.url("/film")).await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "empty auth header");
    Ok(())
}
