mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::common::TestApp;

#[tokio::test]
async fn test_claim_square() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;

    let (status, body) = app.claim(&board_id, 3, 7, "Alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["square"]["row"], 3);
    assert_eq!(body["square"]["col"], 7);
    assert_eq!(body["square"]["playerName"], "Alice");
    assert_eq!(body["square"]["paymentMethod"], "venmo");
    assert_eq!(body["square"]["isPaid"], false);
}

#[tokio::test]
async fn test_claim_taken_square_conflicts() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;

    let (status, _) = app.claim(&board_id, 0, 0, "Alice").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.claim(&board_id, 0, 0, "Bob").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (_, board) = app.get(&format!("/boards/{}", board_id)).await;
    let squares = board["board"]["squares"].as_array().expect("squares array");
    assert_eq!(squares.len(), 1);
    assert_eq!(squares[0]["playerName"], "Alice");
}

#[tokio::test]
async fn test_concurrent_claims_have_exactly_one_winner() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;

    let attempts = (0..8).map(|i| {
        let app = &app;
        let board_id = board_id.clone();
        async move { app.claim(&board_id, 5, 5, &format!("Player {}", i)).await.0 }
    });
    let statuses = futures_util::future::join_all(attempts).await;

    let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
    let conflicts = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!(ok, 1);
    assert_eq!(conflicts, statuses.len() - 1);
}

#[tokio::test]
async fn test_claim_validation() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;

    let (status, body) = app.post("/squares", json!({ "boardId": board_id, "row": 1 })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required fields");

    let (status, body) = app.claim(&board_id, 10, 0, "Alice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid square coordinates");

    let (status, _) = app.claim(&board_id, 0, -1, "Alice").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .post(
            "/squares",
            json!({
                "boardId": board_id,
                "row": 1,
                "col": 1,
                "playerName": "Alice",
                "paymentMethod": "bitcoin",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.claim("no-such-board", 1, 1, "Alice").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_finalized_board_rejects_claims() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;
    app.post(&format!("/boards/{}/finalize", board_id), json!({})).await;

    let (status, body) = app.claim(&board_id, 2, 2, "Late").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Board is not accepting new squares");
}

#[tokio::test]
async fn test_update_and_delete_square() {
    let app = TestApp::new().await;
    let board_id = app.create_board(json!({})).await;
    let (_, body) = app.claim(&board_id, 4, 4, "Carol").await;
    let square_id = body["square"]["id"].as_str().expect("square id").to_string();
    let uri = format!("/squares/{}", square_id);

    let (status, body) = app.patch(&uri, json!({ "isPaid": true, "paymentMethod": "Cash" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["square"]["isPaid"], true);
    assert_eq!(body["square"]["paymentMethod"], "cash");

    let (status, _) = app.request(Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.patch(&uri, json!({ "isPaid": false })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.claim(&board_id, 4, 4, "Dave").await;
    assert_eq!(status, StatusCode::OK);
}
