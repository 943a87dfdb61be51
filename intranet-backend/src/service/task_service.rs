// src/service/task_service.rs

use crate::api::dto::task_dto::{CreateTaskRequest, TaskResponse, UpdateTaskRequest};
use crate::db::DbPool;
use crate::domain::task_model::{self};
use crate::domain::task_status::TaskStatus;
use crate::domain::user_model::UserClaims;
use crate::error::{AppError, AppResult};
use crate::repository::task_repository::TaskRepository;
use crate::repository::user_repository::UserRepository;
use sea_orm::{ActiveModelBehavior, Set};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct TaskService {
    task_repo: Arc<TaskRepository>,
    user_repo: Arc<UserRepository>,
}

impl TaskService {
    pub fn new(db_pool: DbPool) -> Self {
        Self {
            task_repo: Arc::new(TaskRepository::new(db_pool.clone())),
            user_repo: Arc::new(UserRepository::new(db_pool)),
        }
    }

    /// 可視範囲のタスク一覧。
    /// マネージャーは自分が作成したタスク、ワーカーは自分に割り当てられたタスク
    pub async fn list_tasks(&self, caller: &UserClaims) -> AppResult<Vec<TaskResponse>> {
        let tasks = if caller.is_manager() {
            self.task_repo.find_by_creator(caller.user_id).await?
        } else {
            self.task_repo.find_by_assignee(caller.user_id).await?
        };

        self.to_responses(tasks).await
    }

    pub async fn get_task(&self, caller: &UserClaims, id: Uuid) -> AppResult<TaskResponse> {
        let task = self.find_visible(caller, id).await?;
        self.to_response(task).await
    }

    /// タスク作成。作成者は必ず呼び出し元、担当者はユーザー名で指定する
    pub async fn create_task(
        &self,
        caller: &UserClaims,
        payload: CreateTaskRequest,
    ) -> AppResult<TaskResponse> {
        if payload.end_date < payload.start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        let assignee_id = self.resolve_username(&payload.assigned_to).await?;

        let mut active = task_model::ActiveModel::new();
        active.title = Set(payload.title);
        active.comments = Set(payload.comments);
        active.assigned_to = Set(assignee_id);
        active.created_by = Set(caller.user_id);
        active.start_date = Set(payload.start_date);
        active.end_date = Set(payload.end_date);

        let task = self.task_repo.create(active).await?;

        info!(task_id = %task.id, created_by = %caller.user_id, "Task created");

        self.to_response(task).await
    }

    /// タスク更新。状態遷移は前進のみ許可し、同一状態への更新は無視する。
    /// approved / rejected への遷移はマネージャーのみで、レビュアーを記録する
    pub async fn update_task(
        &self,
        caller: &UserClaims,
        id: Uuid,
        payload: UpdateTaskRequest,
    ) -> AppResult<TaskResponse> {
        let task = self.find_visible(caller, id).await?;
        let current_status = task.status();

        let mut active: task_model::ActiveModel = task.into();

        if let Some(status) = payload.status.as_deref() {
            let new_status = TaskStatus::from_str(status).ok_or_else(|| {
                AppError::ValidationError(format!("Invalid task status: '{}'", status))
            })?;

            if new_status != current_status {
                if !current_status.can_transition_to(new_status) {
                    return Err(AppError::Conflict(format!(
                        "Task cannot move from '{}' to '{}'",
                        current_status, new_status
                    )));
                }

                if matches!(new_status, TaskStatus::Approved | TaskStatus::Rejected) {
                    caller.ensure_manager("approve or reject tasks")?;
                    active.approved_by = Set(Some(caller.user_id));
                    if new_status == TaskStatus::Rejected {
                        active.rejection_reason = Set(payload.rejection_reason.clone());
                    }
                }

                active.status = Set(new_status.as_str().to_string());
            }
        }

        if let Some(title) = payload.title {
            active.title = Set(title);
        }
        if let Some(comments) = payload.comments {
            active.comments = Set(Some(comments));
        }
        if let Some(assigned_to) = payload.assigned_to.as_deref() {
            let assignee_id = self.resolve_username(assigned_to).await?;
            active.assigned_to = Set(assignee_id);
        }
        if let Some(start_date) = payload.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = payload.end_date {
            active.end_date = Set(end_date);
        }

        let task = self.task_repo.update(active).await?;

        info!(task_id = %task.id, updated_by = %caller.user_id, "Task updated");

        self.to_response(task).await
    }

    /// タスク削除。approved / rejected のタスクだけが対象で、
    /// マネージャーまたは担当者のみが削除できる
    pub async fn delete_task(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        let task = self.find_visible(caller, id).await?;

        if !task.status().is_deletable() {
            return Err(AppError::Forbidden(format!(
                "Task in status '{}' cannot be deleted",
                task.status()
            )));
        }

        if !caller.is_manager() && task.assigned_to != caller.user_id {
            return Err(AppError::Forbidden(
                "Only managers or the assigned worker can delete a task".to_string(),
            ));
        }

        self.task_repo.delete_by_id(id).await?;

        info!(task_id = %id, deleted_by = %caller.user_id, "Task deleted");

        Ok(())
    }

    async fn find_visible(&self, caller: &UserClaims, id: Uuid) -> AppResult<task_model::Model> {
        let task = self
            .task_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Task {} not found", id)))?;

        if task.assigned_to != caller.user_id && task.created_by != caller.user_id {
            return Err(AppError::Forbidden(
                "You are not allowed to access this task".to_string(),
            ));
        }

        Ok(task)
    }

    async fn resolve_username(&self, username: &str) -> AppResult<Uuid> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;
        Ok(user.id)
    }

    async fn to_response(&self, task: task_model::Model) -> AppResult<TaskResponse> {
        let mut ids = vec![task.assigned_to, task.created_by];
        if let Some(approved_by) = task.approved_by {
            ids.push(approved_by);
        }
        let names = self.user_repo.usernames_by_ids(&ids).await?;

        let assigned_to = names.get(&task.assigned_to).cloned().unwrap_or_default();
        let created_by = names.get(&task.created_by).cloned().unwrap_or_default();
        let approved_by = task
            .approved_by
            .and_then(|id| names.get(&id).cloned());

        Ok(TaskResponse::from_model(
            task,
            assigned_to,
            created_by,
            approved_by,
        ))
    }

    async fn to_responses(&self, tasks: Vec<task_model::Model>) -> AppResult<Vec<TaskResponse>> {
        let mut ids: Vec<Uuid> = Vec::new();
        for task in &tasks {
            ids.push(task.assigned_to);
            ids.push(task.created_by);
            if let Some(approved_by) = task.approved_by {
                ids.push(approved_by);
            }
        }
        let names = self.user_repo.usernames_by_ids(&ids).await?;

        Ok(tasks
            .into_iter()
            .map(|task| {
                let assigned_to = names.get(&task.assigned_to).cloned().unwrap_or_default();
                let created_by = names.get(&task.created_by).cloned().unwrap_or_default();
                let approved_by = task.approved_by.and_then(|id| names.get(&id).cloned());
                TaskResponse::from_model(task, assigned_to, created_by, approved_by)
            })
            .collect())
    }
}
