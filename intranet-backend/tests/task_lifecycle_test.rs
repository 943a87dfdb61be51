// tests/task_lifecycle_test.rs
//
// タスクの状態遷移・承認・削除ルールの統合テスト。

mod common;

use chrono::NaiveDate;
use common::{create_manager, create_worker, setup_db};
use intranet_backend::api::dto::task_dto::{CreateTaskRequest, UpdateTaskRequest};
use intranet_backend::error::AppError;
use intranet_backend::service::task_service::TaskService;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn task_payload(assigned_to: &str) -> CreateTaskRequest {
    CreateTaskRequest {
        title: "Prepare monthly report".to_string(),
        comments: None,
        assigned_to: assigned_to.to_string(),
        start_date: date(2026, 9, 1),
        end_date: date(2026, 9, 5),
    }
}

fn status_update(status: &str) -> UpdateTaskRequest {
    UpdateTaskRequest {
        status: Some(status.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_task_starts_pending() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();

    assert_eq!(task.status, "pending");
    assert_eq!(task.assigned_to, "alice");
    assert_eq!(task.created_by, "boss");
    assert!(task.approved_by.is_none());
}

#[tokio::test]
async fn test_create_task_rejects_end_before_start() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let mut payload = task_payload("alice");
    payload.end_date = date(2026, 8, 31);

    let err = service
        .create_task(&manager.claims, payload)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_create_task_rejects_unknown_assignee() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = TaskService::new(db.clone());

    let err = service
        .create_task(&manager.claims, task_payload("nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_status_cannot_skip_forward() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();

    // pending → completed は in_progress を飛ばすので拒否される
    let err = service
        .update_task(&worker.claims, task.id, status_update("completed"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_status_cannot_move_backward() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("in_progress"))
        .await
        .unwrap();

    let err = service
        .update_task(&worker.claims, task.id, status_update("pending"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_same_status_update_is_noop() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();

    let updated = service
        .update_task(&worker.claims, task.id, status_update("pending"))
        .await
        .unwrap();
    assert_eq!(updated.status, "pending");
}

#[tokio::test]
async fn test_worker_cannot_approve_task() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("in_progress"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("completed"))
        .await
        .unwrap();

    let err = service
        .update_task(&worker.claims, task.id, status_update("approved"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_manager_approval_records_reviewer() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("in_progress"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("completed"))
        .await
        .unwrap();

    let approved = service
        .update_task(&manager.claims, task.id, status_update("approved"))
        .await
        .unwrap();
    assert_eq!(approved.status, "approved");
    assert_eq!(approved.approved_by.as_deref(), Some("boss"));
}

#[tokio::test]
async fn test_rejection_stores_reason() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("in_progress"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("completed"))
        .await
        .unwrap();

    let rejected = service
        .update_task(
            &manager.claims,
            task.id,
            UpdateTaskRequest {
                status: Some("rejected".to_string()),
                rejection_reason: Some("Numbers do not add up".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(rejected.status, "rejected");
    assert_eq!(
        rejected.rejection_reason.as_deref(),
        Some("Numbers do not add up")
    );
}

#[tokio::test]
async fn test_in_progress_task_cannot_be_deleted() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("in_progress"))
        .await
        .unwrap();

    let err = service.delete_task(&worker.claims, task.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_assignee_can_delete_approved_task() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("in_progress"))
        .await
        .unwrap();
    service
        .update_task(&worker.claims, task.id, status_update("completed"))
        .await
        .unwrap();
    service
        .update_task(&manager.claims, task.id, status_update("approved"))
        .await
        .unwrap();

    service.delete_task(&worker.claims, task.id).await.unwrap();

    let err = service.get_task(&worker.claims, task.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_task_is_invisible_to_unrelated_user() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let other = create_worker(&db, "bob", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();

    let err = service.get_task(&other.claims, task.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let list = service.list_tasks(&other.claims).await.unwrap();
    assert!(list.iter().all(|t| t.id != task.id));
}

#[tokio::test]
async fn test_list_visibility_by_role() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let other_manager = create_manager(&db, "chief", "G2").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = TaskService::new(db.clone());

    let task = service
        .create_task(&manager.claims, task_payload("alice"))
        .await
        .unwrap();

    // 作成者のマネージャーと担当ワーカーには見える
    assert!(service
        .list_tasks(&manager.claims)
        .await
        .unwrap()
        .iter()
        .any(|t| t.id == task.id));
    assert!(service
        .list_tasks(&worker.claims)
        .await
        .unwrap()
        .iter()
        .any(|t| t.id == task.id));

    // 別のマネージャーには見えない（作成したタスクのみ）
    assert!(service
        .list_tasks(&other_manager.claims)
        .await
        .unwrap()
        .is_empty());
}
