use axum::body::Body;
use axum::http::{Request, StatusCode};
use library_loans::api::handlers::AppState;
use library_loans::api::router::create_router;
use library_loans::api::types::*;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

mod common;

// ============================================================================
// APIテスト用のヘルパー関数
// ============================================================================

/// インメモリのアダプターで実際のAPIルーターを組み立てる
fn setup_app() -> axum::Router {
    let app_state = Arc::new(AppState {
        service_deps: common::create_test_deps(),
    });
    create_router(app_state)
}

async fn send(app: &axum::Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

async fn seed(app: &axum::Router) {
    let (status, _) = send(
        app,
        "POST",
        "/items",
        Some(json!({"id": "D-1", "title": "Alien", "type": "dvd", "director": "Ridley Scott"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/items",
        Some(json!({"id": "B-1", "title": "Codex", "type": "book", "author": "Unknown", "is_rare": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(app, "POST", "/members", Some(json!({"id": "M-1", "name": "Sari"}))).await;
    assert_eq!(status, StatusCode::CREATED);
}

fn error_code(body: &[u8]) -> String {
    let error: ErrorResponse = serde_json::from_slice(body).unwrap();
    error.error
}

// ============================================================================
// APIテスト: 正常系フロー
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = setup_app();
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_full_loan_flow() {
    let app = setup_app();
    seed(&app).await;

    // Step 1: 貸出（POST /loans）
    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({"item_id": "D-1", "member_id": "M-1", "requested_days": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let borrowed: BorrowResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(borrowed.item_type, "dvd");
    assert!(!borrowed.credit_used);

    // Step 2: 資料が貸出中になっている（GET /items/:id）
    let (status, body) = send(&app, "GET", "/items/D-1", None).await;
    assert_eq!(status, StatusCode::OK);
    let item: ItemResponse = serde_json::from_slice(&body).unwrap();
    assert!(!item.available);
    assert_eq!(item.max_loan_days, 3);

    // Step 3: 破損ありで2日遅れて返却（POST /returns）
    let (status, body) = send(
        &app,
        "POST",
        "/returns",
        Some(json!({"item_id": "D-1", "member_id": "M-1", "actual_days": 5, "damaged": true})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let returned: ReturnResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(returned.days_late, 2);
    assert_eq!(returned.fee, 54_000);
    assert!(!returned.tier_upgraded);

    // Step 4: 会員情報（GET /members/:id）
    let (status, body) = send(&app, "GET", "/members/M-1", None).await;
    assert_eq!(status, StatusCode::OK);
    let member: MemberResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(member.tier, 0);
    assert_eq!(member.successful_returns, 1);
    assert_eq!(member.total_loan_attempts, 1);

    // Step 5: 統計（GET /statistics）
    let (status, body) = send(&app, "GET", "/statistics", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats: StatisticsResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(stats.counts_by_type.get("dvd"), Some(&1));
    assert_eq!(stats.total_fees, 54_000);

    // Step 6: イベント（GET /events）
    let (status, body) = send(&app, "GET", "/events", None).await;
    assert_eq!(status, StatusCode::OK);
    let events: EventsResponse = serde_json::from_slice(&body).unwrap();
    assert_eq!(events.events.len(), 2);

    // Step 7: 統計リセット（POST /statistics/reset）
    let (status, body) = send(&app, "POST", "/statistics/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats: StatisticsResponse = serde_json::from_slice(&body).unwrap();
    assert!(stats.counts_by_type.is_empty());
    assert_eq!(stats.total_fees, 0);
    assert_eq!(stats.total_credits_used, 0);
}

#[tokio::test]
async fn test_list_catalogue_and_members() {
    let app = setup_app();
    seed(&app).await;

    let (status, body) = send(&app, "GET", "/items", None).await;
    assert_eq!(status, StatusCode::OK);
    let items: Vec<ItemResponse> = serde_json::from_slice(&body).unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["B-1", "D-1"]);

    let (status, body) = send(&app, "GET", "/members", None).await;
    assert_eq!(status, StatusCode::OK);
    let members: Vec<MemberResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0].name, "Sari");
}

// ============================================================================
// APIテスト: 異常系
// ============================================================================

#[tokio::test]
async fn test_borrow_errors_are_distinct() {
    let app = setup_app();
    seed(&app).await;

    let cases = [
        (json!({"item_id": "B-1", "member_id": "M-1", "requested_days": 10}), StatusCode::UNPROCESSABLE_ENTITY, "DURATION_EXCEEDED"),
        (json!({"item_id": "B-1", "member_id": "M-1", "requested_days": 0}), StatusCode::UNPROCESSABLE_ENTITY, "INVALID_DURATION"),
        (json!({"item_id": "X-9", "member_id": "M-1", "requested_days": 1}), StatusCode::NOT_FOUND, "ITEM_NOT_FOUND"),
        (json!({"item_id": "B-1", "member_id": "X-9", "requested_days": 1}), StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),
    ];

    for (body, expected_status, expected_code) in cases {
        let (status, body) = send(&app, "POST", "/loans", Some(body)).await;
        assert_eq!(status, expected_status);
        assert_eq!(error_code(&body), expected_code);
    }

    let (status, _) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({"item_id": "B-1", "member_id": "M-1", "requested_days": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({"item_id": "B-1", "member_id": "M-1", "requested_days": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "ITEM_UNAVAILABLE");
}

#[tokio::test]
async fn test_return_errors_are_distinct() {
    let app = setup_app();
    seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/returns",
        Some(json!({"item_id": "B-1", "member_id": "M-1", "actual_days": 2})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "ALREADY_AVAILABLE");

    send(
        &app,
        "POST",
        "/loans",
        Some(json!({"item_id": "B-1", "member_id": "M-1", "requested_days": 3})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/returns",
        Some(json!({"item_id": "B-1", "member_id": "M-1", "actual_days": 2, "damaged": true})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "WRONG_VARIANT");
}

#[tokio::test]
async fn test_duplicate_registration_rejected() {
    let app = setup_app();
    seed(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/items",
        Some(json!({"id": "D-1", "title": "Aliens", "type": "dvd", "director": "James Cameron"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "DUPLICATE_ITEM");

    let (status, body) = send(&app, "POST", "/members", Some(json!({"id": "M-1", "name": "Budi"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), "DUPLICATE_MEMBER");

    let (status, body) = send(&app, "POST", "/members", Some(json!({"id": "  ", "name": "Budi"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}

#[tokio::test]
async fn test_malformed_body_returns_json_error() {
    let app = setup_app();
    seed(&app).await;

    // 構文エラー
    let request = Request::builder()
        .method("POST")
        .uri("/loans")
        .header("content-type", "application/json")
        .body(Body::from("{\"item_id\": \"D-1\","))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(error_code(&body), "INVALID_REQUEST");

    // 型の合わないフィールド
    let (status, body) = send(
        &app,
        "POST",
        "/loans",
        Some(json!({"item_id": "D-1", "member_id": "M-1", "requested_days": "three"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "INVALID_REQUEST");

    // 未知の種別タグ
    let (status, body) = send(
        &app,
        "POST",
        "/items",
        Some(json!({"id": "V-1", "title": "Vinyl", "type": "record"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "INVALID_REQUEST");
}

#[tokio::test]
async fn test_list_items_by_type() {
    let app = setup_app();
    seed(&app).await;

    let (status, body) = send(&app, "GET", "/items?type=dvd", None).await;
    assert_eq!(status, StatusCode::OK);
    let items: Vec<ItemResponse> = serde_json::from_slice(&body).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, "D-1");

    let (status, body) = send(&app, "GET", "/items?type=vinyl", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error_code(&body), "INVALID_INPUT");
}
