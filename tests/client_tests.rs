//
//  bitbucket-scaffolder
//  tests/client_tests.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Request executor behaviour: headers, bodies and error mapping.

use bitbucket_scaffolder::api::cloud::CreateRepositoryOptions;
use bitbucket_scaffolder::api::common::RequestOptions;
use bitbucket_scaffolder::api::{ApiError, BitbucketCloudClient};
use bitbucket_scaffolder::auth::AuthCredential;
use mockito::{Matcher, Server};
use reqwest::{Method, StatusCode};
use serde_json::json;

fn create_options(is_private: bool, description: Option<&str>) -> CreateRepositoryOptions {
    CreateRepositoryOptions {
        workspace: "w".to_string(),
        project: "p".to_string(),
        repo: "r".to_string(),
        description: description.map(str::to_string),
        is_private,
    }
}

#[tokio::test]
async fn test_get_sends_basic_auth_without_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", "Basic dTpw")
        .match_header("content-type", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = BitbucketCloudClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::app_password("u", "p"));
    let url = client.create_url("/user", &RequestOptions::default()).unwrap();
    let response = client.execute::<()>(Method::GET, url, None).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthenticated_client_sends_no_authorization() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/user")
        .match_header("authorization", Matcher::Missing)
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = BitbucketCloudClient::new(&server.url()).unwrap();
    let url = client.create_url("/user", &RequestOptions::default()).unwrap();
    client.execute::<()>(Method::GET, url, None).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_repository_posts_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/repositories/w/r")
        .match_header("authorization", "Bearer user-token")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "scm": "git",
            "is_private": true,
            "project": { "key": "p" },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "slug": "r",
                "links": {
                    "html": { "href": "https://bitbucket.org/w/r" },
                    "clone": [
                        { "name": "ssh", "href": "git@bitbucket.org:w/r.git" },
                        { "name": "https", "href": "https://bitbucket.org/w/r.git" },
                    ],
                },
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = BitbucketCloudClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::bearer("user-token"));
    let repo = client.create_repository(&create_options(true, None)).await.unwrap();

    assert_eq!(repo.https_clone_url(), Some("https://bitbucket.org/w/r.git"));
    assert_eq!(
        repo.contents_url("master").as_deref(),
        Some("https://bitbucket.org/w/r/src/master")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_public_repository_with_description() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/repositories/w/r")
        .match_body(Matcher::Json(json!({
            "scm": "git",
            "description": "A service",
            "is_private": false,
            "project": { "key": "p" },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = BitbucketCloudClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::app_password("u", "p"));
    client
        .create_repository(&create_options(false, Some("A service")))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_enable_pipeline_puts_config() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/repositories/w/r/pipelines_config")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(json!({
            "enabled": true,
            "repository": { "slug": "r" },
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "enabled": true, "repository": { "type": "repository" } }).to_string())
        .create_async()
        .await;

    let client = BitbucketCloudClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::app_password("u", "p"));
    let config = client.enable_repository_pipeline("w", "r").await.unwrap();

    assert!(config.enabled);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_request_failed() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/repositories/w/r/pipelines_config")
        .with_status(404)
        .with_body(r#"{"type": "error", "error": {"message": "Repository not found"}}"#)
        .create_async()
        .await;

    let client = BitbucketCloudClient::new(&server.url())
        .unwrap()
        .with_auth(AuthCredential::app_password("u", "p"));
    let err = client.enable_repository_pipeline("w", "r").await.unwrap_err();

    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(
        err.to_string(),
        format!(
            "Unexpected response for PUT {}/repositories/w/r/pipelines_config. Expected 200 but got 404 - Not Found",
            server.url()
        )
    );
}

#[tokio::test]
async fn test_undecodable_body_is_network_error() {
    let mut server = Server::new_async().await;
    server
        .mock("PUT", "/repositories/w/r/pipelines_config")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let client = BitbucketCloudClient::new(&server.url()).unwrap();
    let err = client.enable_repository_pipeline("w", "r").await.unwrap_err();

    assert!(matches!(err, ApiError::Network(_)));
}
