// src/repository/vacation_request_repository.rs
use crate::domain::review::{RequestKind, ReviewStatus};
use crate::domain::vacation_request_model::{
    self, ActiveModel as VacationActiveModel, Entity as VacationEntity,
};
use crate::repository::request_hide_repository::hidden_request_ids;
use crate::repository::reviewable::ReviewableRepository;
use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};
use uuid::Uuid;

/// 休暇申請の作成入力
pub struct NewVacationRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub period: String,
}

/// マネージャーによる部分修正
#[derive(Default)]
pub struct VacationPatch {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub period: Option<String>,
}

pub struct VacationRequestRepository {
    db: DbConn,
}

impl VacationRequestRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReviewableRepository for VacationRequestRepository {
    type Record = vacation_request_model::Model;
    type NewRequest = NewVacationRequest;
    type Patch = VacationPatch;

    fn kind(&self) -> RequestKind {
        RequestKind::Vacation
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
        VacationEntity::find_by_id(id).one(&self.db).await
    }

    async fn insert(
        &self,
        owner_id: Uuid,
        input: Self::NewRequest,
    ) -> Result<Self::Record, DbErr> {
        let mut active = VacationActiveModel::new();
        active.user_id = Set(owner_id);
        active.start_date = Set(input.start_date);
        active.end_date = Set(input.end_date);
        active.period = Set(input.period);
        active.insert(&self.db).await
    }

    async fn find_for_owners(
        &self,
        owner_ids: &[Uuid],
        viewer_id: Uuid,
    ) -> Result<Vec<Self::Record>, DbErr> {
        let hidden = hidden_request_ids(&self.db, self.kind(), viewer_id).await?;

        VacationEntity::find()
            .filter(vacation_request_model::Column::UserId.is_in(owner_ids.iter().copied()))
            .filter(vacation_request_model::Column::Id.is_not_in(hidden))
            .order_by_desc(vacation_request_model::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    async fn find_for_participant(&self, viewer_id: Uuid) -> Result<Vec<Self::Record>, DbErr> {
        let hidden = hidden_request_ids(&self.db, self.kind(), viewer_id).await?;

        VacationEntity::find()
            .filter(vacation_request_model::Column::UserId.eq(viewer_id))
            .filter(vacation_request_model::Column::Id.is_not_in(hidden))
            .order_by_desc(vacation_request_model::Column::CreatedAt)
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
        let record = VacationEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("vacation request {} not found", id)))?;

        let mut active: VacationActiveModel = record.into();
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
        let record = VacationEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("vacation request {} not found", id)))?;

        let mut active: VacationActiveModel = record.into();
        if let Some(start_date) = patch.start_date {
            active.start_date = Set(start_date);
        }
        if let Some(end_date) = patch.end_date {
            active.end_date = Set(end_date);
        }
        if let Some(period) = patch.period {
            active.period = Set(period);
        }
        active.status = Set(ReviewStatus::Modified.as_str().to_string());
        active.review_reason = Set(reason);
        active.reviewed_by = Set(Some(reviewer_id));
        active.update(&self.db).await
    }
}
