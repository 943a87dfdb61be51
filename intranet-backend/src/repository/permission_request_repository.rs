// src/repository/permission_request_repository.rs
use crate::domain::permission_request_model::{
    self, ActiveModel as PermissionActiveModel, Entity as PermissionEntity,
};
use crate::domain::review::{RequestKind, ReviewStatus};
use crate::repository::request_hide_repository::hidden_request_ids;
use crate::repository::reviewable::ReviewableRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};
use uuid::Uuid;

/// 外出許可申請の作成入力
pub struct NewPermissionRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}

/// マネージャーによる部分修正
#[derive(Default)]
pub struct PermissionPatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
}

pub struct PermissionRequestRepository {
    db: DbConn,
}

impl PermissionRequestRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewableRepository for PermissionRequestRepository {
    type Record = permission_request_model::Model;
    type NewRequest = NewPermissionRequest;
    type Patch = PermissionPatch;

    fn kind(&self) -> RequestKind {
        RequestKind::Permission
    }

    fn record_id(record: &Self::Record) -> Uuid {
        record.id
    }

    fn record_status(record: &Self::Record) -> ReviewStatus {
        record.status()
    }

    fn record_participants(record: &Self::Record) -> Vec<Uuid> {
        vec![record.user_id]
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Self::Record>, DbErr> {
        PermissionEntity::find_by_id(id).one(&self.db).await
    }

    async fn insert(
        &self,
        owner_id: Uuid,
        input: Self::NewRequest,
    ) -> Result<Self::Record, DbErr> {
        let mut active = PermissionActiveModel::new();
        active.user_id = Set(owner_id);
        active.start_date = Set(input.start_date);
        active.end_date = Set(input.end_date);
        active.reason = Set(input.reason);
        active.insert(&self.db).await
    }

    async fn find_for_owners(
        &self,
        owner_ids: &[Uuid],
        viewer_id: Uuid,
    ) -> Result<Vec<Self::Record>, DbErr> {
        let hidden = hidden_request_ids(&self.db, self.kind(), viewer_id).await?;

        PermissionEntity::find()
            .filter(permission_request_model::Column::UserId.is_in(owner_ids.iter().copied()))
            .filter(permission_request_model::Column::Id.is_not_in(hidden))
            .order_by_desc(permission_request_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    async fn find_for_participant(&self, viewer_id: Uuid) -> Result<Vec<Self::Record>, DbErr> {
        let hidden = hidden_request_ids(&self.db, self.kind(), viewer_id).await?;

        PermissionEntity::find()
            .filter(permission_request_model::Column::UserId.eq(viewer_id))
            .filter(permission_request_model::Column::Id.is_not_in(hidden))
            .order_by_desc(permission_request_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    async fn set_review(
        &self,
        id: Uuid,
        status: ReviewStatus,
        reason: Option<String>,
        reviewer_id: Uuid,
    ) -> Result<Self::Record, DbErr> {
        let record = PermissionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("permission request {} not found", id)))?;

        let mut active: PermissionActiveModel = record.into();
        active.status = Set(status.as_str().to_string());
        active.review_reason = Set(reason);
        active.reviewed_by = Set(Some(reviewer_id));
        active.update(&self.db).await
    }

    async fn apply_patch(
        &self,
        id: Uuid,
        patch: Self::Patch,
        reviewer_id: Uuid,
        reason: Option<String>,
    ) -> Result<Self::Record, DbErr> {
        let record = PermissionEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("permission request {} not found", id)))?;

        let mut active: PermissionActiveModel = record.into();
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(patched_reason) = patch.reason {
            active.reason = Set(patched_reason);
        }
        active.status = Set(ReviewStatus::Modified.as_str().to_string());
        active.review_reason = Set(reason);
        active.reviewed_by = Set(Some(reviewer_id));
        active.update(&self.db).await
    }
}
