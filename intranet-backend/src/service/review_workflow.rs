// src/service/review_workflow.rs
//
// 3種類の申請に共通するレビューライフサイクル（承認・却下・修正・非表示）。
// 型ごとの差分はReviewableRepositoryの関連型に閉じ込め、ここで一度だけ実装する。

use crate::domain::review::ReviewStatus;
use crate::domain::user_model::UserClaims;
use crate::error::{AppError, AppResult};
use crate::repository::request_hide_repository::RequestHideRepository;
use crate::repository::reviewable::ReviewableRepository;
use crate::repository::user_repository::UserRepository;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub struct ReviewWorkflow<R: ReviewableRepository> {
    repo: Arc<R>,
    user_repo: Arc<UserRepository>,
    hide_repo: Arc<RequestHideRepository>,
}

impl<R: ReviewableRepository> ReviewWorkflow<R> {
    pub fn new(
        repo: Arc<R>,
        user_repo: Arc<UserRepository>,
        hide_repo: Arc<RequestHideRepository>,
    ) -> Self {
        Self {
            repo,
            user_repo,
            hide_repo,
        }
    }

    /// 申請を作成する。所有者は必ず認証済みの呼び出し元、状態は必ずpending
    pub async fn create(&self, user: &UserClaims, input: R::NewRequest) -> AppResult<R::Record> {
        let record = self.repo.insert(user.user_id, input).await?;

        info!(
            user_id = %user.user_id,
            kind = %self.repo.kind(),
            request_id = %R::record_id(&record),
            "Request created"
        );

        Ok(record)
    }

    /// 可視範囲の申請一覧。
    /// マネージャーは自部門の所有者の申請、ワーカーは当事者としての申請。
    pub async fn list(&self, user: &UserClaims) -> AppResult<Vec<R::Record>> {
        if user.is_manager() {
            let owners = match &user.department {
                Some(department) => self.user_repo.find_by_department(department).await?,
                None => self.user_repo.find_all().await?,
            };
            let owner_ids: Vec<Uuid> = owners.into_iter().map(|u| u.id).collect();
            Ok(self.repo.find_for_owners(&owner_ids, user.user_id).await?)
        } else {
            Ok(self.repo.find_for_participant(user.user_id).await?)
        }
    }

    pub async fn get(&self, user: &UserClaims, id: Uuid) -> AppResult<R::Record> {
        let record = self.find_existing(id).await?;

        if !user.is_manager() && !R::record_participants(&record).contains(&user.user_id) {
            return Err(AppError::Forbidden(
                "You are not allowed to view this request".to_string(),
            ));
        }

        Ok(record)
    }

    /// 承認。マネージャーのみ
    pub async fn approve(&self, user: &UserClaims, id: Uuid) -> AppResult<R::Record> {
        user.ensure_manager("approve requests")?;
        self.find_existing(id).await?;

        let record = self
            .repo
            .set_review(id, ReviewStatus::Approved, None, user.user_id)
            .await?;

        info!(
            reviewer_id = %user.user_id,
            kind = %self.repo.kind(),
            request_id = %id,
            "Request approved"
        );

        Ok(record)
    }

    /// 却下。マネージャーのみ。理由は任意
    pub async fn reject(
        &self,
        user: &UserClaims,
        id: Uuid,
        reason: Option<String>,
    ) -> AppResult<R::Record> {
        user.ensure_manager("reject requests")?;
        self.find_existing(id).await?;

        let record = self
            .repo
            .set_review(id, ReviewStatus::Rejected, reason, user.user_id)
            .await?;

        info!(
            reviewer_id = %user.user_id,
            kind = %self.repo.kind(),
            request_id = %id,
            "Request rejected"
        );

        Ok(record)
    }

    /// 修正。マネージャーのみ、pendingまたはapprovedの申請だけが対象
    pub async fn modify(
        &self,
        user: &UserClaims,
        id: Uuid,
        patch: R::Patch,
        reason: Option<String>,
    ) -> AppResult<R::Record> {
        user.ensure_manager("modify requests")?;

        let record = self.find_existing(id).await?;
        let status = R::record_status(&record);
        if !status.can_modify() {
            return Err(AppError::Conflict(format!(
                "Request in status '{}' cannot be modified",
                status
            )));
        }

        let record = self.repo.apply_patch(id, patch, user.user_id, reason).await?;

        info!(
            reviewer_id = %user.user_id,
            kind = %self.repo.kind(),
            request_id = %id,
            "Request modified"
        );

        Ok(record)
    }

    /// 呼び出し元の一覧から申請を非表示にする。
    /// approved/rejectedのみ対象。冪等で、申請自体の状態は変わらない。
    pub async fn hide(&self, user: &UserClaims, id: Uuid) -> AppResult<()> {
        let record = self.find_existing(id).await?;

        let status = R::record_status(&record);
        if !status.can_hide() {
            return Err(AppError::Conflict(format!(
                "Request in status '{}' cannot be hidden",
                status
            )));
        }

        self.hide_repo
            .hide(self.repo.kind(), id, user.user_id)
            .await?;

        info!(
            user_id = %user.user_id,
            kind = %self.repo.kind(),
            request_id = %id,
            "Request hidden"
        );

        Ok(())
    }

    /// ある申請を非表示にしているユーザー名の一覧（DTO用）
    pub async fn hidden_usernames(&self, id: Uuid) -> AppResult<Vec<String>> {
        let hider_ids = self.hide_repo.hider_ids(self.repo.kind(), id).await?;
        let usernames = self.user_repo.usernames_by_ids(&hider_ids).await?;

        let mut names: Vec<String> = usernames.into_values().collect();
        names.sort();
        Ok(names)
    }

    /// ID集合からユーザー名への対応表（DTO用）
    pub async fn usernames(&self, ids: &[Uuid]) -> AppResult<HashMap<Uuid, String>> {
        Ok(self.user_repo.usernames_by_ids(ids).await?)
    }

    async fn find_existing(&self, id: Uuid) -> AppResult<R::Record> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request {} not found", id)))
    }
}
