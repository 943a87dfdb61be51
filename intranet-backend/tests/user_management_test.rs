// tests/user_management_test.rs

mod common;

use common::{create_manager, create_worker, password_manager, setup_db};
use intranet_backend::api::dto::user_dto::{CreateUserRequest, UpdateUserRequest};
use intranet_backend::error::AppError;
use intranet_backend::service::user_service::UserService;

fn create_payload(username: &str) -> CreateUserRequest {
    CreateUserRequest {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "Secret123!".to_string(),
        first_name: "New".to_string(),
        last_name: username.to_string(),
        role: None,
        department: Some("G1".to_string()),
        manager: None,
    }
}

#[tokio::test]
async fn test_worker_cannot_create_users() {
    let db = setup_db().await;
    let worker = create_worker(&db, "alice", "G1", None).await;
    let service = UserService::new(db.clone(), password_manager());

    let err = service
        .create_user(&worker.claims, create_payload("newbie"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_create_user_defaults_to_worker_role() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = UserService::new(db.clone(), password_manager());

    let mut payload = create_payload("newbie");
    payload.manager = Some("boss".to_string());

    let user = service.create_user(&manager.claims, payload).await.unwrap();
    assert_eq!(user.role, "worker");
    assert_eq!(user.manager.as_deref(), Some("boss"));
    assert!(user.is_active);
}

#[tokio::test]
async fn test_duplicate_username_is_rejected() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    create_worker(&db, "alice", "G1", None).await;
    let service = UserService::new(db.clone(), password_manager());

    let err = service
        .create_user(&manager.claims, create_payload("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
async fn test_invalid_role_is_rejected() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = UserService::new(db.clone(), password_manager());

    let mut payload = create_payload("newbie");
    payload.role = Some("admin".to_string());

    let err = service.create_user(&manager.claims, payload).await.unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_worker_list_is_scoped_to_department() {
    let db = setup_db().await;
    create_manager(&db, "boss", "G1").await;
    let alice = create_worker(&db, "alice", "G1", None).await;
    create_worker(&db, "bob", "G1", None).await;
    create_worker(&db, "carol", "G2", None).await;
    let service = UserService::new(db.clone(), password_manager());

    let list = service.list_users(&alice.claims).await.unwrap();
    let usernames: Vec<&str> = list.iter().map(|u| u.username.as_str()).collect();
    assert!(usernames.contains(&"alice"));
    assert!(usernames.contains(&"bob"));
    assert!(usernames.contains(&"boss"));
    assert!(!usernames.contains(&"carol"));
}

#[tokio::test]
async fn test_manager_list_sees_everyone() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    create_worker(&db, "alice", "G1", None).await;
    create_worker(&db, "carol", "G2", None).await;
    let service = UserService::new(db.clone(), password_manager());

    let list = service.list_users(&manager.claims).await.unwrap();
    assert_eq!(list.len(), 3);
}

#[tokio::test]
async fn test_worker_cannot_view_user_in_other_department() {
    let db = setup_db().await;
    let alice = create_worker(&db, "alice", "G1", None).await;
    let carol = create_worker(&db, "carol", "G2", None).await;
    let service = UserService::new(db.clone(), password_manager());

    let err = service.get_user(&alice.claims, carol.id()).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_worker_can_update_own_profile_but_not_role() {
    let db = setup_db().await;
    let alice = create_worker(&db, "alice", "G1", None).await;
    let service = UserService::new(db.clone(), password_manager());

    let updated = service
        .update_user(
            &alice.claims,
            alice.id(),
            UpdateUserRequest {
                first_name: Some("Alicia".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.first_name, "Alicia");

    let err = service
        .update_user(
            &alice.claims,
            alice.id(),
            UpdateUserRequest {
                role: Some("manager".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_worker_cannot_update_other_users() {
    let db = setup_db().await;
    let alice = create_worker(&db, "alice", "G1", None).await;
    let bob = create_worker(&db, "bob", "G1", None).await;
    let service = UserService::new(db.clone(), password_manager());

    let err = service
        .update_user(
            &alice.claims,
            bob.id(),
            UpdateUserRequest {
                first_name: Some("Robert".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_user_cannot_be_own_manager() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = UserService::new(db.clone(), password_manager());

    let err = service
        .update_user(
            &manager.claims,
            manager.id(),
            UpdateUserRequest {
                manager: Some("boss".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_manager_can_deactivate_user() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let alice = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = UserService::new(db.clone(), password_manager());

    let updated = service
        .update_user(
            &manager.claims,
            alice.id(),
            UpdateUserRequest {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(!updated.is_active);
}

#[tokio::test]
async fn test_delete_user_is_manager_only() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let alice = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let bob = create_worker(&db, "bob", "G1", Some(manager.id())).await;
    let service = UserService::new(db.clone(), password_manager());

    let err = service.delete_user(&alice.claims, bob.id()).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    service.delete_user(&manager.claims, alice.id()).await.unwrap();
    let err = service.get_user(&manager.claims, alice.id()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
