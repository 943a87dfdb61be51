// src/service/request_service.rs
//
// レビュー対象申請3種のサービス。ライフサイクル本体はReviewWorkflowに
// 委譲し、ここではユーザー名の解決とDTOへの変換だけを行う。

use crate::api::dto::request_dto::{
    CreatePermissionRequestDto, CreateShiftChangeRequestDto, CreateVacationRequestDto,
    ModifyPermissionRequestDto, ModifyShiftChangeRequestDto, ModifyVacationRequestDto,
    PermissionRequestResponse, ShiftChangeRequestResponse, VacationRequestResponse,
};
use crate::db::DbPool;
use crate::domain::user_model::UserClaims;
use crate::domain::{
    permission_request_model, shift_change_request_model, vacation_request_model,
};
use crate::error::{AppError, AppResult};
use crate::repository::permission_request_repository::{
    NewPermissionRequest, PermissionPatch, PermissionRequestRepository,
};
use crate::repository::request_hide_repository::RequestHideRepository;
use crate::repository::shift_change_request_repository::{
    NewShiftChangeRequest, ShiftChangePatch, ShiftChangeRequestRepository,
};
use crate::repository::user_repository::UserRepository;
use crate::repository::vacation_request_repository::{
    NewVacationRequest, VacationPatch, VacationRequestRepository,
};
use crate::service::review_workflow::ReviewWorkflow;
use std::sync::Arc;
use uuid::Uuid;

// --- 外出許可申請 ---

pub struct PermissionRequestService {
    workflow: ReviewWorkflow<PermissionRequestRepository>,
}

impl PermissionRequestService {
    pub fn new(db_pool: DbPool) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let hide_repo = Arc::new(RequestHideRepository::new(db_pool.clone()));
        let repo = Arc::new(PermissionRequestRepository::new(db_pool));
        Self {
            workflow: ReviewWorkflow::new(repo, user_repo, hide_repo),
        }
    }

    pub async fn create(
        &self,
        caller: &UserClaims,
        payload: CreatePermissionRequestDto,
    ) -> AppResult<PermissionRequestResponse> {
        if payload.end_date < payload.start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        let record = self
            .workflow
            .create(
                caller,
                NewPermissionRequest {
                    start_date: payload.start_date,
                    end_date: payload.end_date,
                    reason: payload.reason,
                },
            )
            .await?;
        self.to_response(record).await
    }

    pub async fn list(&self, caller: &UserClaims) -> AppResult<Vec<PermissionRequestResponse>> {
        let records = self.workflow.list(caller).await?;
        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            responses.push(self.to_response(record).await?);
        }
        Ok(responses)
    }

    pub async fn get(
        &self,
        caller: &UserClaims,
        id: Uuid,
    ) -> AppResult<PermissionRequestResponse> {
        let record = self.workflow.get(caller, id).await?;
        self.to_response(record).await
    }

    pub async fn approve(
        &self,
        caller: &UserClaims,
        id: Uuid,
    ) -> AppResult<PermissionRequestResponse> {
        let record = self.workflow.approve(caller, id).await?;
        self.to_response(record).await
    }

    pub async fn reject(
        &self,
        caller: &UserClaims,
        id: Uuid,
        reason: Option<String>,
    ) -> AppResult<PermissionRequestResponse> {
        let record = self.workflow.reject(caller, id, reason).await?;
        self.to_response(record).await
    }

    pub async fn modify(
        &self,
        caller: &UserClaims,
        id: Uuid,
        payload: ModifyPermissionRequestDto,
    ) -> AppResult<PermissionRequestResponse> {
        let patch = PermissionPatch {
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
        };
        let record = self
            .workflow
            .modify(caller, id, patch, payload.review_reason)
            .await?;
        self.to_response(record).await
    }

    pub async fn hide(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        self.workflow.hide(caller, id).await
    }

    async fn to_response(
        &self,
        record: permission_request_model::Model,
    ) -> AppResult<PermissionRequestResponse> {
        let mut ids = vec![record.user_id];
        if let Some(reviewed_by) = record.reviewed_by {
            ids.push(reviewed_by);
        }
        let names = self.workflow.usernames(&ids).await?;
        let hidden_by = self.workflow.hidden_usernames(record.id).await?;

        let user = names.get(&record.user_id).cloned().unwrap_or_default();
        let reviewed_by = record.reviewed_by.and_then(|id| names.get(&id).cloned());

        Ok(PermissionRequestResponse::from_model(
            record, user, reviewed_by, hidden_by,
        ))
    }
}

// --- 休暇申請 ---

pub struct VacationRequestService {
    workflow: ReviewWorkflow<VacationRequestRepository>,
}

impl VacationRequestService {
    pub fn new(db_pool: DbPool) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let hide_repo = Arc::new(RequestHideRepository::new(db_pool.clone()));
        let repo = Arc::new(VacationRequestRepository::new(db_pool));
        Self {
            workflow: ReviewWorkflow::new(repo, user_repo, hide_repo),
        }
    }

    pub async fn create(
        &self,
        caller: &UserClaims,
        payload: CreateVacationRequestDto,
    ) -> AppResult<VacationRequestResponse> {
        if payload.end_date < payload.start_date {
            return Err(AppError::ValidationError(
                "End date must not be before start date".to_string(),
            ));
        }

        let record = self
            .workflow
            .create(
                caller,
                NewVacationRequest {
                    start_date: payload.start_date,
                    end_date: payload.end_date,
                    period: payload.period,
                },
            )
            .await?;
        self.to_response(record).await
    }

    pub async fn list(&self, caller: &UserClaims) -> AppResult<Vec<VacationRequestResponse>> {
        let records = self.workflow.list(caller).await?;
        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            responses.push(self.to_response(record).await?);
        }
        Ok(responses)
    }

    pub async fn get(&self, caller: &UserClaims, id: Uuid) -> AppResult<VacationRequestResponse> {
        let record = self.workflow.get(caller, id).await?;
        self.to_response(record).await
    }

    pub async fn approve(
        &self,
        caller: &UserClaims,
        id: Uuid,
    ) -> AppResult<VacationRequestResponse> {
        let record = self.workflow.approve(caller, id).await?;
        self.to_response(record).await
    }

    pub async fn reject(
        &self,
        caller: &UserClaims,
        id: Uuid,
        reason: Option<String>,
    ) -> AppResult<VacationRequestResponse> {
        let record = self.workflow.reject(caller, id, reason).await?;
        self.to_response(record).await
    }

    pub async fn modify(
        &self,
        caller: &UserClaims,
        id: Uuid,
        payload: ModifyVacationRequestDto,
    ) -> AppResult<VacationRequestResponse> {
        let patch = VacationPatch {
            start_date: payload.start_date,
            end_date: payload.end_date,
            period: payload.period,
        };
        let record = self
            .workflow
            .modify(caller, id, patch, payload.review_reason)
            .await?;
        self.to_response(record).await
    }

    pub async fn hide(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        self.workflow.hide(caller, id).await
    }

    async fn to_response(
        &self,
        record: vacation_request_model::Model,
    ) -> AppResult<VacationRequestResponse> {
        let mut ids = vec![record.user_id];
        if let Some(reviewed_by) = record.reviewed_by {
            ids.push(reviewed_by);
        }
        let names = self.workflow.usernames(&ids).await?;
        let hidden_by = self.workflow.hidden_usernames(record.id).await?;

        let user = names.get(&record.user_id).cloned().unwrap_or_default();
        let reviewed_by = record.reviewed_by.and_then(|id| names.get(&id).cloned());

        Ok(VacationRequestResponse::from_model(
            record, user, reviewed_by, hidden_by,
        ))
    }
}

// --- シフト交代申請 ---

pub struct ShiftChangeRequestService {
    workflow: ReviewWorkflow<ShiftChangeRequestRepository>,
    user_repo: Arc<UserRepository>,
}

impl ShiftChangeRequestService {
    pub fn new(db_pool: DbPool) -> Self {
        let user_repo = Arc::new(UserRepository::new(db_pool.clone()));
        let hide_repo = Arc::new(RequestHideRepository::new(db_pool.clone()));
        let repo = Arc::new(ShiftChangeRequestRepository::new(db_pool));
        Self {
            workflow: ReviewWorkflow::new(repo, user_repo.clone(), hide_repo),
            user_repo,
        }
    }

    pub async fn create(
        &self,
        caller: &UserClaims,
        payload: CreateShiftChangeRequestDto,
    ) -> AppResult<ShiftChangeRequestResponse> {
        let acceptor_id = self.resolve_acceptor(&payload.acceptor).await?;

        let record = self
            .workflow
            .create(
                caller,
                NewShiftChangeRequest {
                    acceptor_id,
                    date: payload.date,
                    reason: payload.reason,
                },
            )
            .await?;
        self.to_response(record).await
    }

    pub async fn list(&self, caller: &UserClaims) -> AppResult<Vec<ShiftChangeRequestResponse>> {
        let records = self.workflow.list(caller).await?;
        let mut responses = Vec::with_capacity(records.len());
        for record in records {
            responses.push(self.to_response(record).await?);
        }
        Ok(responses)
    }

    pub async fn get(
        &self,
        caller: &UserClaims,
        id: Uuid,
    ) -> AppResult<ShiftChangeRequestResponse> {
        let record = self.workflow.get(caller, id).await?;
        self.to_response(record).await
    }

    pub async fn approve(
        &self,
        caller: &UserClaims,
        id: Uuid,
    ) -> AppResult<ShiftChangeRequestResponse> {
        let record = self.workflow.approve(caller, id).await?;
        self.to_response(record).await
    }

    pub async fn reject(
        &self,
        caller: &UserClaims,
        id: Uuid,
        reason: Option<String>,
    ) -> AppResult<ShiftChangeRequestResponse> {
        let record = self.workflow.reject(caller, id, reason).await?;
        self.to_response(record).await
    }

    pub async fn modify(
        &self,
        caller: &UserClaims,
        id: Uuid,
        payload: ModifyShiftChangeRequestDto,
    ) -> AppResult<ShiftChangeRequestResponse> {
        let acceptor_id = match payload.acceptor.as_deref() {
            Some(username) => Some(self.resolve_acceptor(username).await?),
            None => None,
        };

        let patch = ShiftChangePatch {
            acceptor_id,
            date: payload.date,
            reason: payload.reason,
        };
        let record = self
            .workflow
            .modify(caller, id, patch, payload.review_reason)
            .await?;
        self.to_response(record).await
    }

    pub async fn hide(&self, caller: &UserClaims, id: Uuid) -> AppResult<()> {
        self.workflow.hide(caller, id).await
    }

    async fn resolve_acceptor(&self, username: &str) -> AppResult<Uuid> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User '{}' not found", username)))?;
        Ok(user.id)
    }

    async fn to_response(
        &self,
        record: shift_change_request_model::Model,
    ) -> AppResult<ShiftChangeRequestResponse> {
        let mut ids = vec![record.requester_id, record.acceptor_id];
        if let Some(reviewed_by) = record.reviewed_by {
            ids.push(reviewed_by);
        }
        let names = self.workflow.usernames(&ids).await?;
        let hidden_by = self.workflow.hidden_usernames(record.id).await?;

        let requester = names.get(&record.requester_id).cloned().unwrap_or_default();
        let acceptor = names.get(&record.acceptor_id).cloned().unwrap_or_default();
        let reviewed_by = record.reviewed_by.and_then(|id| names.get(&id).cloned());

        Ok(ShiftChangeRequestResponse::from_model(
            record, requester, acceptor, reviewed_by, hidden_by,
        ))
    }
}
