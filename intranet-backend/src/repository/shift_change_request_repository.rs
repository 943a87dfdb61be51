// src/repository/shift_change_request_repository.rs
use crate::domain::review::{RequestKind, ReviewStatus};
use crate::domain::shift_change_request_model::{
    self, ActiveModel as ShiftChangeActiveModel, Entity as ShiftChangeEntity,
};
use crate::repository::request_hide_repository::hidden_request_ids;
use crate::repository::reviewable::ReviewableRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, Condition, DbConn, DbErr, Set};
use uuid::Uuid;

/// シフト交代申請の作成入力。acceptor_idはservice層でユーザー名から解決済み
pub struct NewShiftChangeRequest {
    pub acceptor_id: Uuid,
    pub date: NaiveDate,
    pub reason: String,
}

/// マネージャーによる部分修正
#[derive(Default)]
pub struct ShiftChangePatch {
    pub acceptor_id: Option<Uuid>,
    pub date: Option<NaiveDate>,
    pub reason: Option<String>,
}

pub struct ShiftChangeRequestRepository {
    db: DbConn,
}

impl ShiftChangeRequestRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewableRepository for ShiftChangeRequestRepository {
    type Record = shift_change_request_model::Model;
    type NewRequest = NewShiftChangeRequest;
    type Patch = ShiftChangePatch;

    fn kind(&self) -> RequestKind {
        RequestKind::ShiftChange
    }

    fn record_id(record: &Self::Record) -> Uuid {
        record.id
    }

    fn record_status(record: &Self::Record) -> ReviewStatus {
        record.status()
    }

    fn record_participants(record: &Self::Record) -> Vec<Uuid> {
        vec![record.requester_id, record.acceptor_id]
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Self::Record>, DbErr> {
        ShiftChangeEntity::find_by_id(id).one(&self.db).await
    }

    async fn insert(
        &self,
        owner_id: Uuid,
        input: Self::NewRequest,
    ) -> Result<Self::Record, DbErr> {
        let mut active = ShiftChangeActiveModel::new();
        active.requester_id = Set(owner_id);
        active.acceptor_id = Set(input.acceptor_id);
        active.date = Set(input.date);
        active.reason = Set(input.reason);
        active.insert(&self.db).await
    }

    async fn find_for_owners(
        &self,
        owner_ids: &[Uuid],
        viewer_id: Uuid,
    ) -> Result<Vec<Self::Record>, DbErr> {
        let hidden = hidden_request_ids(&self.db, self.kind(), viewer_id).await?;

        ShiftChangeEntity::find()
            .filter(
                shift_change_request_model::Column::RequesterId.is_in(owner_ids.iter().copied()),
            )
            .filter(shift_change_request_model::Column::Id.is_not_in(hidden))
            .order_by_desc(shift_change_request_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// 申請者としてだけでなく、引受者に指名された申請も見える
    async fn find_for_participant(&self, viewer_id: Uuid) -> Result<Vec<Self::Record>, DbErr> {
        let hidden = hidden_request_ids(&self.db, self.kind(), viewer_id).await?;

        ShiftChangeEntity::find()
            .filter(
                Condition::any()
                    .add(shift_change_request_model::Column::RequesterId.eq(viewer_id))
                    .add(shift_change_request_model::Column::AcceptorId.eq(viewer_id)),
            )
            .filter(shift_change_request_model::Column::Id.is_not_in(hidden))
            .order_by_desc(shift_change_request_model::Column::CreatedAt)
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
        let record = ShiftChangeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("shift change request {} not found", id))
            })?;

        let mut active: ShiftChangeActiveModel = record.into();
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
        let record = ShiftChangeEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("shift change request {} not found", id))
            })?;

        let mut active: ShiftChangeActiveModel = record.into();
        if let Some(acceptor_id) = patch.acceptor_id {
            active.acceptor_id = Set(acceptor_id);
        }
        if let Some(date) = patch.date {
            active.date = Set(date);
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
