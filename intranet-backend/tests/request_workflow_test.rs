// tests/request_workflow_test.rs
//
// 申請のレビューフロー（承認・却下・修正・非表示）の統合テスト。

mod common;

use chrono::NaiveDate;
use common::{create_manager, create_worker, setup_db};
use intranet_backend::api::dto::request_dto::{
    CreatePermissionRequestDto, CreateShiftChangeRequestDto, ModifyPermissionRequestDto,
};
use intranet_backend::error::AppError;
use intranet_backend::service::request_service::{
    PermissionRequestService, ShiftChangeRequestService,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn permission_payload() -> CreatePermissionRequestDto {
    CreatePermissionRequestDto {
        start_date: date(2026, 9, 1),
        end_date: date(2026, 9, 1),
        reason: "Doctor appointment".to_string(),
    }
}

#[tokio::test]
async fn test_create_request_starts_pending_and_owned_by_caller() {
    let db = setup_db().await;
    let worker = create_worker(&db, "alice", "G1", None).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();

    assert_eq!(created.status, "pending");
    assert_eq!(created.user, "alice");
    assert!(created.reviewed_by.is_none());
    assert!(created.hidden_by.is_empty());
}

#[tokio::test]
async fn test_worker_cannot_approve_request() {
    let db = setup_db().await;
    let worker = create_worker(&db, "alice", "G1", None).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();

    let err = service.approve(&worker.claims, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_approve_records_reviewer() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();

    let approved = service.approve(&manager.claims, created.id).await.unwrap();
    assert_eq!(approved.status, "approved");
    assert_eq!(approved.reviewed_by.as_deref(), Some("boss"));
}

#[tokio::test]
async fn test_reject_stores_reason() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();

    let rejected = service
        .reject(&manager.claims, created.id, Some("Too busy that day".to_string()))
        .await
        .unwrap();
    assert_eq!(rejected.status, "rejected");
    assert_eq!(rejected.review_reason.as_deref(), Some("Too busy that day"));
    assert_eq!(rejected.reviewed_by.as_deref(), Some("boss"));
}

#[tokio::test]
async fn test_modify_requires_manager() {
    let db = setup_db().await;
    let worker = create_worker(&db, "alice", "G1", None).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();

    let err = service
        .modify(
            &worker.claims,
            created.id,
            ModifyPermissionRequestDto {
                end_date: Some(date(2026, 9, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_modify_updates_fields_and_marks_modified() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();

    let modified = service
        .modify(
            &manager.claims,
            created.id,
            ModifyPermissionRequestDto {
                end_date: Some(date(2026, 9, 2)),
                review_reason: Some("Extended by one day".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(modified.status, "modified");
    assert_eq!(modified.end_date, date(2026, 9, 2));
    // 未指定のフィールドは変わらない
    assert_eq!(modified.start_date, date(2026, 9, 1));
    assert_eq!(modified.reason, "Doctor appointment");
    assert_eq!(modified.review_reason.as_deref(), Some("Extended by one day"));
}

#[tokio::test]
async fn test_rejected_request_cannot_be_modified() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();
    service.reject(&manager.claims, created.id, None).await.unwrap();

    let err = service
        .modify(
            &manager.claims,
            created.id,
            ModifyPermissionRequestDto {
                end_date: Some(date(2026, 9, 2)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_pending_request_cannot_be_hidden() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();

    let err = service.hide(&manager.claims, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_hide_is_per_viewer_and_idempotent() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();
    service.approve(&manager.claims, created.id).await.unwrap();

    // 二重に隠しても成功する
    service.hide(&manager.claims, created.id).await.unwrap();
    service.hide(&manager.claims, created.id).await.unwrap();

    // マネージャーの一覧からは消え、申請者の一覧には残る
    let manager_list = service.list(&manager.claims).await.unwrap();
    assert!(manager_list.iter().all(|r| r.id != created.id));

    let worker_list = service.list(&worker.claims).await.unwrap();
    let visible = worker_list.iter().find(|r| r.id == created.id).unwrap();
    // ステータスは非表示操作で変わらない
    assert_eq!(visible.status, "approved");
    assert_eq!(visible.hidden_by, vec!["boss".to_string()]);
}

#[tokio::test]
async fn test_worker_hide_removes_from_own_list_only() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&worker.claims, permission_payload())
        .await
        .unwrap();
    service.reject(&manager.claims, created.id, None).await.unwrap();
    service.hide(&worker.claims, created.id).await.unwrap();

    let worker_list = service.list(&worker.claims).await.unwrap();
    assert!(worker_list.iter().all(|r| r.id != created.id));

    let manager_list = service.list(&manager.claims).await.unwrap();
    assert!(manager_list.iter().any(|r| r.id == created.id));
}

#[tokio::test]
async fn test_worker_cannot_view_other_workers_request() {
    let db = setup_db().await;
    let alice = create_worker(&db, "alice", "G1", None).await;
    let bob = create_worker(&db, "bob", "G1", None).await;
    let service = PermissionRequestService::new(db.clone());

    let created = service
        .create(&alice.claims, permission_payload())
        .await
        .unwrap();

    let err = service.get(&bob.claims, created.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_manager_sees_only_own_department_requests() {
    let db = setup_db().await;
    let manager_g1 = create_manager(&db, "boss-g1", "G1").await;
    let alice = create_worker(&db, "alice", "G1", Some(manager_g1.id())).await;
    let carol = create_worker(&db, "carol", "G2", None).await;
    let service = PermissionRequestService::new(db.clone());

    let in_dept = service
        .create(&alice.claims, permission_payload())
        .await
        .unwrap();
    let out_of_dept = service
        .create(&carol.claims, permission_payload())
        .await
        .unwrap();

    let list = service.list(&manager_g1.claims).await.unwrap();
    assert!(list.iter().any(|r| r.id == in_dept.id));
    assert!(list.iter().all(|r| r.id != out_of_dept.id));
}

#[tokio::test]
async fn test_shift_change_acceptor_is_participant() {
    let db = setup_db().await;
    let alice = create_worker(&db, "alice", "G1", None).await;
    let bob = create_worker(&db, "bob", "G1", None).await;
    let service = ShiftChangeRequestService::new(db.clone());

    let created = service
        .create(
            &alice.claims,
            CreateShiftChangeRequestDto {
                acceptor: "bob".to_string(),
                date: date(2026, 9, 5),
                reason: "Family event".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(created.requester, "alice");
    assert_eq!(created.acceptor, "bob");

    // 引受者も一覧・詳細を見られる
    let bob_list = service.list(&bob.claims).await.unwrap();
    assert!(bob_list.iter().any(|r| r.id == created.id));
    service.get(&bob.claims, created.id).await.unwrap();
}

#[tokio::test]
async fn test_shift_change_rejects_unknown_acceptor() {
    let db = setup_db().await;
    let alice = create_worker(&db, "alice", "G1", None).await;
    let service = ShiftChangeRequestService::new(db.clone());

    let err = service
        .create(
            &alice.claims,
            CreateShiftChangeRequestDto {
                acceptor: "nobody".to_string(),
                date: date(2026, 9, 5),
                reason: "Family event".to_string(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
