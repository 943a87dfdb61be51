// src/repository/task_repository.rs
use crate::domain::task_model::{self, ActiveModel as TaskActiveModel, Entity as TaskEntity};
use sea_orm::{entity::*, query::*, DbConn, DbErr, DeleteResult};
use uuid::Uuid;

pub struct TaskRepository {
    db: DbConn,
}

impl TaskRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<task_model::Model>, DbErr> {
        TaskEntity::find_by_id(id).one(&self.db).await
    }

    /// マネージャー視点：自分が作成したタスク
    pub async fn find_by_creator(&self, creator_id: Uuid) -> Result<Vec<task_model::Model>, DbErr> {
        TaskEntity::find()
            .filter(task_model::Column::CreatedBy.eq(creator_id))
            .order_by_desc(task_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// ワーカー視点：自分に割り当てられたタスク
    pub async fn find_by_assignee(
        &self,
        assignee_id: Uuid,
    ) -> Result<Vec<task_model::Model>, DbErr> {
        TaskEntity::find()
            .filter(task_model::Column::AssignedTo.eq(assignee_id))
            .order_by_desc(task_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    pub async fn create(&self, task: TaskActiveModel) -> Result<task_model::Model, DbErr> {
        task.insert(&self.db).await
    }

    pub async fn update(&self, task: TaskActiveModel) -> Result<task_model::Model, DbErr> {
        task.update(&self.db).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<DeleteResult, DbErr> {
        TaskEntity::delete_by_id(id).exec(&self.db).await
    }
}
