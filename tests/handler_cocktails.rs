mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};

// ─── CREATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_create_cocktail_success() {
    let server = common::make_server();

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .json(&common::cocktail_body("모히토"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "칵테일이 생성되었습니다.");
    assert_eq!(body["data"]["name"], "모히토");
    assert_eq!(body["data"]["memberNo"], 7);
    assert_eq!(body["data"]["likeCount"], 0);
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["data"]["isOwner"], true);
    assert_eq!(body["data"]["ingredients"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_create_cocktail_defaults_blank_description() {
    let server = common::make_server();

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .json(&json!({
            "name": "  김렛  ",
            "description": "   ",
            "ingredients": ["진 2oz", "라임 코디얼 1oz"]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], "김렛");
    assert_eq!(body["data"]["description"], "커스텀 칵테일");
    assert_eq!(body["data"]["instructions"], Value::Null);
}

#[tokio::test]
async fn test_create_cocktail_padded_name_within_limit() {
    let server = common::make_server();
    let name = "a".repeat(95);

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .json(&json!({
            "name": format!("{}{}", " ".repeat(10), name),
            "ingredients": ["진 2oz"]
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["name"], name);
}

#[tokio::test]
async fn test_create_cocktail_name_too_long() {
    let server = common::make_server();

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .json(&json!({
            "name": "a".repeat(101),
            "ingredients": ["진 2oz"]
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["data"]["name"][0]["code"], "length");
}

#[tokio::test]
async fn test_create_cocktail_anonymous() {
    let server = common::make_server();

    let response = server
        .post("/api/cocktails")
        .json(&common::cocktail_body("모히토"))
        .await;

    response.assert_status_unauthorized();
    response.assert_json(&json!({
        "success": false,
        "message": "로그인이 필요합니다.",
        "data": null
    }));

    // Nothing was stored.
    let list: Value = server.get("/api/cocktails").await.json();
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_create_cocktail_invalid_member_header_is_anonymous() {
    let server = common::make_server();

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "not-a-number")
        .json(&common::cocktail_body("모히토"))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_create_cocktail_validation_errors() {
    let server = common::make_server();

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .json(&json!({
            "name": "",
            "ingredients": [],
            "image": "ftp://example.com/a.png"
        }))
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "입력값이 올바르지 않습니다.");
    assert!(body["data"]["name"].is_array());
    assert!(body["data"]["ingredients"].is_array());
    assert!(body["data"]["image"].is_array());
}

#[tokio::test]
async fn test_create_cocktail_malformed_json() {
    let server = common::make_server();

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .bytes("{ not json".into())
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);
}

#[tokio::test]
async fn test_create_cocktail_accepts_image_data_url() {
    let server = common::make_server();

    let mut payload = common::cocktail_body("블루 하와이");
    payload["image"] = json!("data:image/png;base64,iVBORw0KGgo=");

    let response = server
        .post("/api/cocktails")
        .add_header("X-Member-No", "7")
        .json(&payload)
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["image"], "data:image/png;base64,iVBORw0KGgo=");
}

// ─── READ ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_cocktails_newest_first() {
    let server = common::make_server();
    common::create_cocktail(&server, 1, "김렛").await;
    common::create_cocktail(&server, 2, "마티니").await;

    let response = server.get("/api/cocktails").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], Value::Null);

    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["마티니", "김렛"]);
}

#[tokio::test]
async fn test_list_cocktails_anonymous_has_no_relationship() {
    let server = common::make_server();
    common::create_cocktail(&server, 1, "김렛").await;

    let body: Value = server.get("/api/cocktails").await.json();

    assert_eq!(body["data"][0]["liked"], Value::Null);
    assert_eq!(body["data"][0]["isOwner"], Value::Null);
}

#[tokio::test]
async fn test_get_cocktail_round_trip() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    let response = server
        .get(&format!("/api/cocktails/{id}"))
        .add_header("X-Member-No", "8")
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["cocktailNo"], id);
    assert_eq!(body["data"]["name"], "모히토");
    assert_eq!(body["data"]["description"], "상큼한 럼 칵테일");
    assert_eq!(body["data"]["isOwner"], false);
}

#[tokio::test]
async fn test_get_cocktail_not_found() {
    let server = common::make_server();

    let response = server.get("/api/cocktails/999").await;

    response.assert_status_not_found();
    response.assert_json(&json!({
        "success": false,
        "message": "칵테일을 찾을 수 없습니다.",
        "data": null
    }));
}

#[tokio::test]
async fn test_member_cocktails() {
    let server = common::make_server();
    common::create_cocktail(&server, 1, "김렛").await;
    common::create_cocktail(&server, 2, "마티니").await;
    common::create_cocktail(&server, 1, "네그로니").await;

    let response = server.get("/api/cocktails/members/1").await;

    response.assert_status_ok();
    let body: Value = response.json();
    let cocktails = body["data"].as_array().unwrap();
    assert_eq!(cocktails.len(), 2);
    assert!(cocktails.iter().all(|c| c["memberNo"] == 1));
}

#[tokio::test]
async fn test_member_cocktails_empty() {
    let server = common::make_server();

    let body: Value = server.get("/api/cocktails/members/42").await.json();

    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

// ─── UPDATE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_update_cocktail_by_owner() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    let response = server
        .put(&format!("/api/cocktails/{id}"))
        .add_header("X-Member-No", "7")
        .json(&json!({
            "name": "버진 모히토",
            "ingredients": ["라임 주스 1oz", "민트", "탄산수"]
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["message"], "칵테일이 수정되었습니다.");
    assert_eq!(body["data"]["name"], "버진 모히토");
    assert_eq!(body["data"]["description"], "커스텀 칵테일");

    let fetched: Value = server.get(&format!("/api/cocktails/{id}")).await.json();
    assert_eq!(fetched["data"]["name"], "버진 모히토");
}

#[tokio::test]
async fn test_update_cocktail_other_member_forbidden() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    let response = server
        .put(&format!("/api/cocktails/{id}"))
        .add_header("X-Member-No", "8")
        .json(&common::cocktail_body("탈취"))
        .await;

    response.assert_status_forbidden();
    let body: Value = response.json();
    assert_eq!(body["message"], "본인의 칵테일만 수정할 수 있습니다.");
}

#[tokio::test]
async fn test_update_cocktail_anonymous() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    let response = server
        .put(&format!("/api/cocktails/{id}"))
        .json(&common::cocktail_body("익명"))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_update_cocktail_not_found() {
    let server = common::make_server();

    let response = server
        .put("/api/cocktails/999")
        .add_header("X-Member-No", "7")
        .json(&common::cocktail_body("없음"))
        .await;

    response.assert_status_not_found();
}

// ─── DELETE ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_delete_cocktail_anonymous() {
    let server = common::make_server();

    let response = server.delete("/api/cocktails/42").await;

    response.assert_status_unauthorized();
    response.assert_json(&json!({
        "success": false,
        "message": "로그인이 필요합니다.",
        "data": null
    }));
}

#[tokio::test]
async fn test_delete_cocktail_then_get_not_found() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    let response = server
        .delete(&format!("/api/cocktails/{id}"))
        .add_header("X-Member-No", "7")
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({
        "success": true,
        "message": "칵테일이 삭제되었습니다.",
        "data": null
    }));

    server
        .get(&format!("/api/cocktails/{id}"))
        .await
        .assert_status_not_found();

    // Second delete: already gone.
    server
        .delete(&format!("/api/cocktails/{id}"))
        .add_header("X-Member-No", "7")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_delete_cocktail_other_member_forbidden() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    let response = server
        .delete(&format!("/api/cocktails/{id}"))
        .add_header("X-Member-No", "8")
        .await;

    response.assert_status_forbidden();
    let body: Value = response.json();
    assert_eq!(body["message"], "본인의 칵테일만 삭제할 수 있습니다.");

    server
        .get(&format!("/api/cocktails/{id}"))
        .await
        .assert_status_ok();
}

// ─── LIKES ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_like_flips_and_counts() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;
    let path = format!("/api/cocktails/{id}/likes");

    let first = server.post(&path).add_header("X-Member-No", "8").await;
    first.assert_status_ok();
    first.assert_json(&json!({
        "success": true,
        "message": "좋아요가 반영되었습니다.",
        "data": { "cocktailNo": id, "liked": true, "likeCount": 1 }
    }));

    server
        .post(&path)
        .add_header("X-Member-No", "9")
        .await
        .assert_status_ok();

    let viewed: Value = server
        .get(&format!("/api/cocktails/{id}"))
        .add_header("X-Member-No", "8")
        .await
        .json();
    assert_eq!(viewed["data"]["likeCount"], 2);
    assert_eq!(viewed["data"]["liked"], true);

    let undone: Value = server
        .post(&path)
        .add_header("X-Member-No", "8")
        .await
        .json();
    assert_eq!(undone["data"]["liked"], false);
    assert_eq!(undone["data"]["likeCount"], 1);
}

#[tokio::test]
async fn test_toggle_like_own_cocktail_allowed() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    let body: Value = server
        .post(&format!("/api/cocktails/{id}/likes"))
        .add_header("X-Member-No", "7")
        .await
        .json();

    assert_eq!(body["data"]["liked"], true);
}

#[tokio::test]
async fn test_toggle_like_anonymous() {
    let server = common::make_server();
    let id = common::create_cocktail(&server, 7, "모히토").await;

    server
        .post(&format!("/api/cocktails/{id}/likes"))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn test_toggle_like_missing_cocktail() {
    let server = common::make_server();

    server
        .post("/api/cocktails/999/likes")
        .add_header("X-Member-No", "7")
        .await
        .assert_status_not_found();
}
