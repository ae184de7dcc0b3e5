mod common;

use std::time::Duration;

use axum::http::StatusCode;
use serde_json::{json, Value};
use tokio::time::sleep;

use crate::common::{board_payload, digits, TestApp};

fn board_ids(body: &Value) -> Vec<String> {
    body["boards"]
        .as_array()
        .expect("boards array")
        .iter()
        .filter_map(|b| b["id"].as_str().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_create_board_defaults() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/boards", board_payload()).await;
    assert_eq!(status, StatusCode::OK);

    let board = &body["board"];
    assert_eq!(board["name"], "Sunday Pool");
    assert_eq!(board["status"], "open");
    assert_eq!(board["isFinalized"], false);
    assert!(board["rowNumbers"].is_null());
    assert_eq!(board["squares"].as_array().map(Vec::len), Some(0));
    assert_eq!(board["paymentConfig"]["allowCash"], true);
}

#[tokio::test]
async fn test_create_board_rejects_payouts_not_summing_to_100() {
    let app = TestApp::new().await;

    let mut payload = board_payload();
    payload["payoutQ4"] = json!(20);
    let (status, body) = app.post("/boards", payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, list) = app.get("/boards").await;
    assert_eq!(list["boards"].as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_create_board_rejects_blank_name_and_bad_body() {
    let app = TestApp::new().await;

    let mut payload = board_payload();
    payload["name"] = json!("   ");
    let (status, _) = app.post("/boards", payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app.post("/boards", json!({ "name": "No teams" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_board_is_404() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/boards/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Board not found");
}

#[tokio::test]
async fn test_finalize_assigns_permutations_exactly_once() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;

    let (status, body) = app.post(&format!("/boards/{}/finalize", board_id), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"]["status"], "closed");
    assert_eq!(body["board"]["isFinalized"], true);

    let rows = digits(&body["board"]["rowNumbers"]);
    let cols = digits(&body["board"]["colNumbers"]);
    let mut sorted_rows = rows.clone();
    let mut sorted_cols = cols.clone();
    sorted_rows.sort();
    sorted_cols.sort();
    let expected: Vec<u8> = (0..10).collect();
    assert_eq!(sorted_rows, expected);
    assert_eq!(sorted_cols, expected);

    let (status, body) = app.post(&format!("/boards/{}/finalize", board_id), json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Board already finalized");

    let (_, body) = app.get(&format!("/boards/{}", board_id)).await;
    assert_eq!(digits(&body["board"]["rowNumbers"]), rows);
    assert_eq!(digits(&body["board"]["colNumbers"]), cols);
}

#[tokio::test]
async fn test_list_filters_by_status_newest_first() {
    let app = TestApp::new().await;
    let first = app.create_board(json!({ "name": "First" })).await;
    sleep(Duration::from_millis(5)).await;
    let second = app.create_board(json!({ "name": "Second" })).await;
    sleep(Duration::from_millis(5)).await;
    let third = app.create_board(json!({ "name": "Third" })).await;

    app.post(&format!("/boards/{}/finalize", second), json!({})).await;
    app.post(&format!("/boards/{}/archive", third), json!({})).await;

    let (status, body) = app.get("/boards?status=open,closed").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(board_ids(&body), vec![second.clone(), first.clone()]);

    let (_, body) = app.get("/boards").await;
    assert_eq!(board_ids(&body), vec![third, second, first]);

    let (status, _) = app.get("/boards?status=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_board_revalidates_payouts() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;
    let uri = format!("/boards/{}", board_id);

    let (status, _) = app.patch(&uri, json!({ "payoutQ1": 40 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .patch(
            &uri,
            json!({ "name": "Renamed", "payoutQ1": 10, "payoutQ4": 40, "venmoUsername": "@pool" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"]["name"], "Renamed");
    assert_eq!(body["board"]["payoutQ1"], 10.0);
    assert_eq!(body["board"]["payoutQ4"], 40.0);
    assert_eq!(body["board"]["paymentConfig"]["venmoUsername"], "@pool");
}

#[tokio::test]
async fn test_delete_board_removes_children() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;
    let (status, claimed) = app.claim(&board_id, 1, 1, "Bob").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.delete(&format!("/boards/{}", board_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, _) = app.get(&format!("/boards/{}", board_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let square_id = claimed["square"]["id"].as_str().expect("square id");
    let (status, _) = app.delete(&format!("/squares/{}", square_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_routes_are_mounted_under_api_prefix() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;

    let (status, body) = app.get(&format!("/api/boards/{}", board_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"]["id"], board_id.as_str());

    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_finalized_board_cannot_be_reopened() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;
    let uri = format!("/boards/{}", board_id);
    app.post(&format!("{}/finalize", uri), json!({})).await;

    let (status, body) = app.patch(&uri, json!({ "status": "open" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Finalized board cannot be reopened");

    let (_, body) = app.get(&uri).await;
    assert_eq!(body["board"]["status"], "closed");

    let (status, _) = app.claim(&board_id, 2, 2, "Late").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Other transitions stay available
    let (status, body) = app.patch(&uri, json!({ "status": "live" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"]["status"], "live");
}

#[tokio::test]
async fn test_update_board_game_link() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({ "gameId": "401" })).await;
    let uri = format!("/boards/{}", board_id);

    let (status, body) = app.patch(&uri, json!({ "name": "Renamed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["board"]["gameId"], "401");

    let (status, body) = app.patch(&uri, json!({ "gameId": null })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["board"]["gameId"].is_null());

    let (_, body) = app.patch(&uri, json!({ "gameId": "402" })).await;
    assert_eq!(body["board"]["gameId"], "402");
}
