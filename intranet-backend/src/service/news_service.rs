// src/service/news_service.rs

use crate::api::dto::auth_dto::MessageResponse;
use crate::api::dto::news_dto::{
    CreateNewsRequest, NewsArchiveGroup, NewsResponse, UpdateNewsRequest,
};
use crate::db::DbPool;
use crate::domain::news_model::{self, NEWS_DEPARTMENTS};
use crate::domain::user_model::UserClaims;
use crate::error::{AppError, AppResult};
use crate::repository::news_repository::NewsRepository;
use crate::repository::user_repository::UserRepository;
use sea_orm::{ActiveModelBehavior, Set};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct NewsService {
    news_repo: Arc<NewsRepository>,
    user_repo: Arc<UserRepository>,
}

impl NewsService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            news_repo: Arc::new(NewsRepository::new(db_pool.clone())),
            user_repo: Arc::new(UserRepository::new(db_pool)),
        }
    }

    /// お知らせ作成。マネージャーのみ
    pub async fn create_news(
        &self,
        caller: &UserClaims,
        payload: CreateNewsRequest,
    ) -> AppResult<NewsResponse> {
        caller.ensure_manager("manage news")?;

        let department = payload.department.unwrap_or_else(|| "all".to_string());
        validate_department(&department)?;

        let mut active = news_model::ActiveModel::new();
        active.title = Set(payload.title);
        active.content = Set(payload.content);
        active.department = Set(department);
        active.created_by = Set(caller.user_id);

        let news = self.news_repo.create(active).await?;

        info!(news_id = %news.id, created_by = %caller.user_id, "News created");

        self.to_response(news, caller).await
    }

    /// お知らせ更新。マネージャーのみ
    pub async fn update_news(
        &self,
        caller: &UserClaims,
        id: Uuid,
        payload: UpdateNewsRequest,
    ) -> AppResult<NewsResponse> {
        caller.ensure_manager("manage news")?;

        let news = self.find_existing(id).await?;
        let mut active: news_model::ActiveModel = news.into();

        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(content) = payload.content {
            active.content = Set(content);
        }
        if let Some(department) = payload.department {
            validate_department(&department)?;
            active.department = Set(department);
        }

        let news = self.news_repo.update(active).await?;

        info!(news_id = %news.id, updated_by = %caller.user_id, "News updated");

        self.to_response(news, caller).await
    }

    /// お知らせ削除。マネージャーのみ
    pub async fn delete_news(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        caller.ensure_manager("manage news")?;

        self.find_existing(id).await?;
        self.news_repo.delete_by_id(id).await?;

        info!(news_id = %id, deleted_by = %caller.user_id, "News deleted");

        Ok(())
    }

    /// 一覧。マネージャーは全記事、ワーカーは自部門向けの未読記事のみ
    pub async fn list_news(&self, caller: &UserClaims) -> AppResult<Vec<NewsResponse>> {
        let read_ids: HashSet<Uuid> = self
            .news_repo
            .read_ids_for_user(caller.user_id)
            .await?
            .into_iter()
            .collect();

        let items = if caller.is_manager() {
            self.news_repo.find_all().await?
        } else {
            self.news_repo
                .find_for_department(caller.department.as_deref())
                .await?
                .into_iter()
                .filter(|n| !read_ids.contains(&n.id))
                .collect()
        };

        self.to_responses(items, &read_ids).await
    }

    pub async fn get_news(&self, caller: &UserClaims, id: Uuid) -> AppResult<NewsResponse> {
        let news = self.find_visible(caller, id).await?;
        self.to_response(news, caller).await
    }

    /// 既読化。冪等で、二度目以降は区別できるメッセージを返す
    pub async fn mark_as_read(&self, caller: &UserClaims, id: Uuid) -> AppResult<MessageResponse> {
        self.find_visible(caller, id).await?;

        let inserted = self.news_repo.mark_read(id, caller.user_id).await?;

        let message = if inserted {
            info!(news_id = %id, user_id = %caller.user_id, "News marked as read");
            "News marked as read".to_string()
        } else {
            "News already marked as read".to_string()
        };

        Ok(MessageResponse { message })
    }

    /// アーカイブ：呼び出し元が既読にした記事を作成月でまとめ、
    /// 月キーの降順で返す
    pub async fn archived_news(&self, caller: &UserClaims) -> AppResult<Vec<NewsArchiveGroup>> {
        let read_ids: HashSet<Uuid> = self
            .news_repo
            .read_ids_for_user(caller.user_id)
            .await?
            .into_iter()
            .collect();

        let visible = if caller.is_manager() {
            self.news_repo.find_all().await?
        } else {
            self.news_repo
                .find_for_department(caller.department.as_deref())
                .await?
        };

        let read_items: Vec<news_model::Model> = visible
            .into_iter()
            .filter(|n| read_ids.contains(&n.id))
            .collect();

        let groups = group_by_month(read_items);

        let mut result = Vec::with_capacity(groups.len());
        for (month, items) in groups {
            result.push(NewsArchiveGroup {
                month,
                items: self.to_responses(items, &read_ids).await?,
            });
        }

        Ok(result)
    }

    async fn find_existing(&self, id: Uuid) -> AppResult<news_model::Model> {
        self.news_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("News {} not found", id)))
    }

    async fn find_visible(&self, caller: &UserClaims, id: Uuid) -> AppResult<news_model::Model> {
        let news = self.find_existing(id).await?;

        if !caller.is_manager()
            && news.department != "all"
            && Some(news.department.as_str()) != caller.department.as_deref()
        {
            return Err(AppError::Forbidden(
                "You are not allowed to view this news".to_string(),
            ));
        }

        Ok(news)
    }

    async fn to_response(
        &self,
        news: news_model::Model,
        caller: &UserClaims,
    ) -> AppResult<NewsResponse> {
        let read = self
            .news_repo
            .read_ids_for_user(caller.user_id)
            .await?
            .contains(&news.id);

        let names = self.user_repo.usernames_by_ids(&[news.created_by]).await?;
        let created_by = names.get(&news.created_by).cloned().unwrap_or_default();

        Ok(NewsResponse::from_model(news, created_by, read))
    }

    async fn to_responses(
        &self,
        items: Vec<news_model::Model>,
        read_ids: &HashSet<Uuid>,
    ) -> AppResult<Vec<NewsResponse>> {
        let creator_ids: Vec<Uuid> = items.iter().map(|n| n.created_by).collect();
        let names = self.user_repo.usernames_by_ids(&creator_ids).await?;

        Ok(items
            .into_iter()
            .map(|news| {
                let created_by = names.get(&news.created_by).cloned().unwrap_or_default();
                let read = read_ids.contains(&news.id);
                NewsResponse::from_model(news, created_by, read)
            })
            .collect())
    }
}

fn validate_department(department: &str) -> AppResult<()> {
    if NEWS_DEPARTMENTS.contains(&department) {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Invalid department: '{}' (expected one of {})",
            department,
            NEWS_DEPARTMENTS.join(", ")
        )))
    }
}

/// 記事を作成月"YYYY-MM"でまとめ、月キーの降順で返す。
/// 各月の中は新しい順
fn group_by_month(mut items: Vec<news_model::Model>) -> Vec<(String, Vec<news_model::Model>)> {
    items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut groups: Vec<(String, Vec<news_model::Model>)> = Vec::new();
    for item in items {
        let month = item.month_key();
        match groups.last_mut() {
            Some((key, bucket)) if *key == month => bucket.push(item),
            _ => groups.push((month, vec![item])),
        }
    }

    groups.sort_by(|a, b| b.0.cmp(&a.0));
    groups
}
