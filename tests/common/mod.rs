#![allow(dead_code)]

use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;

use cocktail_lab::api::middleware::identity::{HeaderIdentity, TokenIdentity};
use cocktail_lab::application::services::{AuthService, RepositoryCocktailService};
use cocktail_lab::infrastructure::persistence::{
    InMemoryCocktailRepository, InMemoryMemberTokenRepository,
};
use cocktail_lab::routes::app_router;
use cocktail_lab::state::AppState;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

/// State over empty in-memory storage, identifying callers by `X-Member-No`.
pub fn create_test_state() -> AppState {
    let repo = Arc::new(InMemoryCocktailRepository::new());
    AppState::new(
        Arc::new(RepositoryCocktailService::new(repo)),
        Arc::new(HeaderIdentity),
    )
}

/// Full application router over in-memory storage.
pub fn make_server() -> TestServer {
    TestServer::new(app_router(create_test_state())).unwrap()
}

/// Full application router in Bearer token mode.
///
/// Returns the auth service so tests can issue tokens against the same store.
pub fn make_token_server() -> (TestServer, Arc<AuthService<InMemoryMemberTokenRepository>>) {
    let cocktails = Arc::new(InMemoryCocktailRepository::new());
    let tokens = Arc::new(InMemoryMemberTokenRepository::new());
    let auth = Arc::new(AuthService::new(tokens, TEST_SIGNING_SECRET.to_string()));

    let state = AppState::new(
        Arc::new(RepositoryCocktailService::new(cocktails)),
        Arc::new(TokenIdentity::new(auth.clone())),
    );

    (TestServer::new(app_router(state)).unwrap(), auth)
}

pub fn cocktail_body(name: &str) -> Value {
    json!({
        "name": name,
        "description": "상큼한 럼 칵테일",
        "ingredients": ["화이트 럼 2oz", "라임 주스 1oz", "민트"],
        "instructions": "민트를 으깬 뒤 나머지 재료와 섞는다"
    })
}

/// Creates a cocktail as `member_no` and returns its number.
pub async fn create_cocktail(server: &TestServer, member_no: i64, name: &str) -> i64 {
    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", member_no.to_string())
        .json(&cocktail_body(name))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    let body: Value = response.json();
    body["data"]["cocktailNo"].as_i64().unwrap()
}
