mod common;

use axum::http::StatusCode;
use serde_json::Value;

#[tokio::test]
async fn test_bearer_token_creates_as_member() {
    let (server, auth) = common::make_token_server();
    let token = auth.issue_token(7, "web").await.unwrap();

    let response = server
        .post("/api/cocktails")
        .authorization_bearer(&token)
        .json(&common::cocktail_body("모히토"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["memberNo"], 7);
}

#[tokio::test]
async fn test_member_header_ignored_in_token_mode() {
    let (server, _auth) = common::make_token_server();

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .json(&common::cocktail_body("모히토"))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_unknown_token_is_anonymous() {
    let (server, _auth) = common::make_token_server();

    server
        .delete("/api/cocktails/1")
        .authorization_bearer("not-a-real-token")
        .await
        .assert_status_unauthorized();

    // Reads still work for anonymous callers.
    server.get("/api/cocktails").await.assert_status_ok();
}

#[tokio::test]
async fn test_token_owner_can_delete() {
    let (server, auth) = common::make_token_server();
    let owner = auth.issue_token(7, "owner").await.unwrap();
    let other = auth.issue_token(8, "other").await.unwrap();

    let created: Value = server
        .post("/api/cocktails")
        .authorization_bearer(&owner)
        .json(&common::cocktail_body("모히토"))
        .await
        .json();
    let id = created["data"]["cocktailNo"].as_i64().unwrap();

    server
        .delete(&format!("/api/cocktails/{id}"))
        .authorization_bearer(&other)
        .await
        .assert_status_forbidden();

    server
        .delete(&format!("/api/cocktails/{id}"))
        .authorization_bearer(&owner)
        .await
        .assert_status_ok();
}
