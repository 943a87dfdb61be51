// tests/news_test.rs
//
// お知らせの部門配信・既読・アーカイブの統合テスト。

mod common;

use common::{create_manager, create_worker, setup_db};
use intranet_backend::api::dto::news_dto::CreateNewsRequest;
use intranet_backend::error::AppError;
use intranet_backend::service::news_service::NewsService;

fn news_payload(title: &str, department: Option<&str>) -> CreateNewsRequest {
    CreateNewsRequest {
        title: title.to_string(),
        content: "Please read carefully.".to_string(),
        department: department.map(|d| d.to_string()),
    }
}

#[tokio::test]
async fn test_worker_cannot_create_news() {
    let db = setup_db().await;
    let worker = create_worker(&db, "alice", "G1", None).await;
    let service = NewsService::new(db.clone());

    let err = service
        .create_news(&worker.claims, news_payload("Notice", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_create_news_rejects_unknown_department() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = NewsService::new(db.clone());

    let err = service
        .create_news(&manager.claims, news_payload("Notice", Some("sales")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
}

#[tokio::test]
async fn test_department_defaults_to_all() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let service = NewsService::new(db.clone());

    let news = service
        .create_news(&manager.claims, news_payload("Notice", None))
        .await
        .unwrap();
    assert_eq!(news.department, "all");
    assert_eq!(news.created_by, "boss");
    assert!(!news.read);
}

#[tokio::test]
async fn test_worker_list_filters_by_department() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = NewsService::new(db.clone());

    let for_all = service
        .create_news(&manager.claims, news_payload("For everyone", Some("all")))
        .await
        .unwrap();
    let for_g1 = service
        .create_news(&manager.claims, news_payload("For G1", Some("G1")))
        .await
        .unwrap();
    let for_g2 = service
        .create_news(&manager.claims, news_payload("For G2", Some("G2")))
        .await
        .unwrap();

    let list = service.list_news(&worker.claims).await.unwrap();
    assert!(list.iter().any(|n| n.id == for_all.id));
    assert!(list.iter().any(|n| n.id == for_g1.id));
    assert!(list.iter().all(|n| n.id != for_g2.id));
}

#[tokio::test]
async fn test_worker_cannot_view_other_departments_news() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = NewsService::new(db.clone());

    let for_g2 = service
        .create_news(&manager.claims, news_payload("For G2", Some("G2")))
        .await
        .unwrap();

    let err = service.get_news(&worker.claims, for_g2.id).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn test_mark_as_read_is_idempotent() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = NewsService::new(db.clone());

    let news = service
        .create_news(&manager.claims, news_payload("Notice", None))
        .await
        .unwrap();

    let first = service.mark_as_read(&worker.claims, news.id).await.unwrap();
    assert_eq!(first.message, "News marked as read");

    let second = service.mark_as_read(&worker.claims, news.id).await.unwrap();
    assert_eq!(second.message, "News already marked as read");
}

#[tokio::test]
async fn test_read_news_leaves_worker_list() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = NewsService::new(db.clone());

    let news = service
        .create_news(&manager.claims, news_payload("Notice", None))
        .await
        .unwrap();

    service.mark_as_read(&worker.claims, news.id).await.unwrap();

    // 既読記事はワーカーの一覧から消える
    let worker_list = service.list_news(&worker.claims).await.unwrap();
    assert!(worker_list.iter().all(|n| n.id != news.id));

    // マネージャーの一覧には残り、既読フラグは閲覧者ごと
    let manager_list = service.list_news(&manager.claims).await.unwrap();
    let item = manager_list.iter().find(|n| n.id == news.id).unwrap();
    assert!(!item.read);
}

#[tokio::test]
async fn test_archive_contains_only_read_items() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = NewsService::new(db.clone());

    let read_one = service
        .create_news(&manager.claims, news_payload("Read me", None))
        .await
        .unwrap();
    let unread = service
        .create_news(&manager.claims, news_payload("Unread", None))
        .await
        .unwrap();

    service.mark_as_read(&worker.claims, read_one.id).await.unwrap();

    let archive = service.archived_news(&worker.claims).await.unwrap();
    assert_eq!(archive.len(), 1);

    let group = &archive[0];
    // 月キーは作成月
    assert_eq!(group.month, read_one.created_at.format("%Y-%m").to_string());
    assert!(group.items.iter().any(|n| n.id == read_one.id));
    assert!(group.items.iter().all(|n| n.id != unread.id));
    assert!(group.items.iter().all(|n| n.read));
}

#[tokio::test]
async fn test_update_and_delete_are_manager_only() {
    let db = setup_db().await;
    let manager = create_manager(&db, "boss", "G1").await;
    let worker = create_worker(&db, "alice", "G1", Some(manager.id())).await;
    let service = NewsService::new(db.clone());

    let news = service
        .create_news(&manager.claims, news_payload("Notice", None))
        .await
        .unwrap();

    let err = service
        .delete_news(&worker.claims, news.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    service.delete_news(&manager.claims, news.id).await.unwrap();
    let err = service.get_news(&manager.claims, news.id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
