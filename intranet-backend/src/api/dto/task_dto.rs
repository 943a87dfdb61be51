// src/api/dto/task_dto.rs

use crate::domain::task_model;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// タスク作成リクエスト。担当者はユーザー名で指定する
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: String,

    pub comments: Option<String>,

    #[validate(length(min = 1, message = "Assigned user is required"))]
    pub assigned_to: String,

    pub start_date: NaiveDate,

    pub end_date: NaiveDate,
}

/// タスク更新リクエスト
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be between 1 and 200 characters"))]
    pub title: Option<String>,

    pub comments: Option<String>,

    /// pending / in_progress / completed / approved / rejected
    pub status: Option<String>,

    pub assigned_to: Option<String>,

    pub start_date: Option<NaiveDate>,

    pub end_date: Option<NaiveDate>,

    pub rejection_reason: Option<String>,
}

/// タスクレスポンス。関係者は全てユーザー名で返す
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub id: Uuid,
    pub title: String,
    pub comments: Option<String>,
    pub status: String,
    pub assigned_to: String,
    pub created_by: String,
    pub approved_by: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    pub fn from_model(
        task: task_model::Model,
        assigned_to: String,
        created_by: String,
        approved_by: Option<String>,
    ) -> Self {
        Self {
            id: task.id,
            title: task.title,
            comments: task.comments,
            status: task.status,
            assigned_to,
            created_by,
            approved_by,
            start_date: task.start_date,
            end_date: task.end_date,
            rejection_reason: task.rejection_reason,
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
