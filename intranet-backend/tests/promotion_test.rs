// tests/promotion_test.rs

mod common;

use chrono::{Duration, Utc};
use common::{create_manager, create_worker, setup_db};
use intranet_backend::api::dto::promotion_dto::{CreatePromotionRequest, UpdatePromotionRequest};
use intranet_backend::error::AppError;
use intranet_backend::service::promotion_service::PromotionService;

fn promotion_payload(code: &str, start_offset_days: i64, end_offset_days: i64) -> CreatePromotionRequest {
    let today = Utc::now().date_naive();
    CreatePromotionRequest {
        name: format!("Campaign {}", code),
        code: code.to_string(),
        start_date: today + Duration::days(start_offset_days),
        end_date: today + Duration::days(end_offset_days),
    }
}

#[tokio::test]
async fn test_worker_cannot_create_promotion() {
    let db = setup_db().await;
    let worker = create_worker(&db, "alice", "G1", None).await;
    let service = PromotionService::new(db.clone());

    let err = service
        .create_promotion(&worker.claims, promotion_payload("SUMMER26", 0, 30))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_create_rejects_end_before_start() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = PromotionService::new(db.clone());

    let err = service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 10, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_duplicate_code_is_rejected() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = PromotionService::new(db.clone());

    service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 0, 30))
        .await
        .unwrap();

    let err = service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 5, 40))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_list_returns_all_promotions_newest_first() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = PromotionService::new(db.clone());

    let running = service
        .create_promotion(&manager.claims, promotion_payload("RUNNING", -10, 10))
        .await
        .unwrap();
    let upcoming = service
        .create_promotion(&manager.claims, promotion_payload("UPCOMING", 5, 20))
        .await
        .unwrap();
    let finished = service
        .create_promotion(&manager.claims, promotion_payload("FINISHED", -30, -5))
        .await
        .unwrap();

    // コレクションは終了済みも含めて全件、開始日の降順
    let all = service.list_promotions().await.unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, upcoming.id);
    assert_eq!(all[1].id, running.id);
    assert_eq!(all[2].id, finished.id);

    let past = service.list_past().await.unwrap();
    assert!(past.iter().any(|p| p.id == finished.id));
    assert!(past.iter().all(|p| p.id != running.id));
    assert!(past.iter().all(|p| p.id != upcoming.id));
}

#[tokio::test]
async fn test_worker_cannot_update_promotion() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PromotionService::new(db.clone());

    let promotion = service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 0, 30))
        .await
        .unwrap();

    let err = service
        .update_promotion(
            &worker.claims,
            promotion.id,
            UpdatePromotionRequest {
                name: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = PromotionService::new(db.clone());

    let promotion = service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 0, 30))
        .await
        .unwrap();

    let updated = service
        .update_promotion(
            &manager.claims,
            promotion.id,
            UpdatePromotionRequest {
                name: Some("Extended summer sale".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, "Extended summer sale");
    assert_eq!(updated.code, promotion.code);
    assert_eq!(updated.start_date, promotion.start_date);
    assert_eq!(updated.end_date, promotion.end_date);
}

#[tokio::test]
async fn test_update_rejects_end_before_start() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = PromotionService::new(db.clone());

    let promotion = service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 0, 30))
        .await
        .unwrap();

    // 既存の開始日より前に終了日を動かすことはできない
    let err = service
        .update_promotion(
            &manager.claims,
            promotion.id,
            UpdatePromotionRequest {
                end_date: Some(promotion.start_date - Duration::days(1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_update_rejects_code_already_in_use() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = PromotionService::new(db.clone());

    service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 0, 30))
        .await
        .unwrap();
    let other = service
        .create_promotion(&manager.claims, promotion_payload("AUTUMN26", 10, 60))
        .await
        .unwrap();

    let err = service
        .update_promotion(
            &manager.claims,
            other.id,
            UpdatePromotionRequest {
                code: Some("SUMMER26".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    // 自分自身のコードをそのまま送るのは衝突にならない
    let unchanged = service
        .update_promotion(
            &manager.claims,
            other.id,
            UpdatePromotionRequest {
                code: Some("AUTUMN26".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(unchanged.code, "AUTUMN26");
}

#[tokio::test]
async fn test_delete_is_manager_only() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PromotionService::new(db.clone());

    let promotion = service
        .create_promotion(&manager.claims, promotion_payload("SUMMER26", 0, 30))
        .await
        .unwrap();

    let err = service
        .delete_promotion(&worker.claims, promotion.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    service
        .delete_promotion(&manager.claims, promotion.id)
        .await
        .unwrap();
    let err = service.get_promotion(promotion.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
