// src/api/dto/news_dto.rs

use crate::domain::news_model;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// お知らせ作成リクエスト（マネージャーのみ）
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateNewsRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    /// "all"（デフォルト）または部門コード
    pub department: Option<String>,
}

/// お知らせ更新リクエスト（マネージャーのみ）
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateNewsRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: Option<String>,

    pub department: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub department: String,
    pub created_by: String,
    /// 呼び出し元が既読かどうか
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewsResponse {
    pub fn from_model(news: news_model::Model, created_by: String, read: bool) -> Self {
        Self {
            id: news.id,
            title: news.title,
            content: news.content,
            department: news.department,
            created_by,
            read,
            created_at: news.created_at,
            updated_at: news.updated_at,
        }
    }
}

/// 月ごとにまとめたアーカイブ。月キー"YYYY-MM"の降順
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArchiveGroup {
    pub month: String,
    pub items: Vec<NewsResponse>,
}
