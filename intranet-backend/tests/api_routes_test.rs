// tests/api_routes_test.rs
//
// ルーター組み立ての統合テスト。
// tower::ServiceExt::oneshot でHTTP層ごとリクエストを通す。

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{app_state, bearer_token, create_manager, create_worker, setup_db, TestUser};
use intranet_backend::api::create_router;
use intranet_backend::db::DbPool;
use serde_json::json;
use tower::ServiceExt;

fn test_app(db: &DbPool) -> Router {
    create_router(app_state(db))
}

fn authed_get(path: &str, user: &TestUser) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token(user)))
        .body(Body::empty())
        .unwrap()
}

fn authed_post_json(path: &str, user: &TestUser, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::AUTHORIZATION, format!("Bearer {}", bearer_token(user)))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_request_routes_use_hyphenated_segments() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let app = test_app(&db);

    for path in [
        "/api/permission-requests/",
        "/api/vacation-requests/",
        "/api/shift-change-requests/",
    ] {
        let response = app.clone().oneshot(authed_get(path, &manager)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", path);
    }

    // アンダースコア表記のパスは存在しない
    for path in [
        "/api/permission_requests/",
        "/api/vacation_requests/",
        "/api/shift_change_requests/",
    ] {
        let response = app.clone().oneshot(authed_get(path, &manager)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "GET {}", path);
    }
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let db = setup_db().await;
    let app = test_app(&db);

    let request = Request::builder()
        .method("GET")
        .uri("/api/permission-requests/")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_vacation_request_create_and_list_over_http() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let app = test_app(&db);

    let created = app
        .clone()
        .oneshot(authed_post_json(
            "/api/vacation-requests/",
            &worker,
            json!({
                "start_date": "2026-09-01",
                "end_date": "2026-09-05",
                "period": "full_day"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed = app
        .clone()
        .oneshot(authed_get("/api/vacation-requests/", &worker))
        .await
        .unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_promotion_routes_accept_patch() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let app = test_app(&db);

    let created = app
        .clone()
        .oneshot(authed_post_json(
            "/api/promotions/",
            &manager,
            json!({
                "name": "Summer sale",
                "code": "SUMMER26",
                "start_date": "2026-08-01",
                "end_date": "2026-08-31"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);

    let bytes = axum::body::to_bytes(created.into_body(), usize::MAX)
        .await
        .unwrap();
    let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let id = envelope["data"]["id"].as_str().unwrap().to_string();

    let patched = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(format!("/api/promotions/{}/", id))
                .header(
                    header::AUTHORIZATION,
                    format!("Bearer {}", bearer_token(&manager)),
                )
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "name": "Late summer sale" }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(patched.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(patched.into_body(), usize::MAX)
        .await
        .unwrap();
    let envelope: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(envelope["data"]["name"], "Late summer sale");
    assert_eq!(envelope["data"]["code"], "SUMMER26");
}
