// src/api/dto/request_dto.rs
//
// レビュー対象申請（許可・休暇・シフト交代）のDTO。
// 申請者・レビュアー・非表示ユーザーは全てユーザー名で表現する。

use crate::domain::{
    permission_request_model, shift_change_request_model, vacation_request_model,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

// --- 作成リクエスト ---

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePermissionRequestDto {
    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateVacationRequestDto {
    pub start_date: NaiveDate,

    pub end_date: NaiveDate,

    #[validate(length(min = 1, message = "Period is required"))]
    pub period: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateShiftChangeRequestDto {
    /// 交代を引き受けるユーザーのユーザー名
    #[validate(length(min = 1, message = "Acceptor is required"))]
    pub acceptor: String,

    pub date: NaiveDate,

    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

// --- レビュー操作 ---

/// 却下リクエスト。理由は任意
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RejectRequestDto {
    pub review_reason: Option<String>,
}

/// マネージャーによる修正（部分更新）
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModifyPermissionRequestDto {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub review_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModifyVacationRequestDto {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub period: Option<String>,
    pub review_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ModifyShiftChangeRequestDto {
    /// 引受者のユーザー名
    pub acceptor: Option<String>,
    pub date: Option<NaiveDate>,
    pub reason: Option<String>,
    pub review_reason: Option<String>,
}

// --- レスポンス ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRequestResponse {
    pub id: Uuid,
    pub user: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: String,
    pub review_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub hidden_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PermissionRequestResponse {
    pub fn from_model(
        record: permission_request_model::Model,
        user: String,
        reviewed_by: Option<String>,
        hidden_by: Vec<String>,
    ) -> Self {
        Self {
            id: record.id,
            user,
            start_date: record.start_date,
            end_date: record.end_date,
            reason: record.reason,
            status: record.status,
            review_reason: record.review_reason,
            reviewed_by,
            hidden_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacationRequestResponse {
    pub id: Uuid,
    pub user: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub period: String,
    pub status: String,
    pub review_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub hidden_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VacationRequestResponse {
    pub fn from_model(
        record: vacation_request_model::Model,
        user: String,
        reviewed_by: Option<String>,
        hidden_by: Vec<String>,
    ) -> Self {
        Self {
            id: record.id,
            user,
            start_date: record.start_date,
            end_date: record.end_date,
            period: record.period,
            status: record.status,
            review_reason: record.review_reason,
            reviewed_by,
            hidden_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftChangeRequestResponse {
    pub id: Uuid,
    pub requester: String,
    pub acceptor: String,
    pub date: NaiveDate,
    pub reason: String,
    pub status: String,
    pub review_reason: Option<String>,
    pub reviewed_by: Option<String>,
    pub hidden_by: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ShiftChangeRequestResponse {
    pub fn from_model(
        record: shift_change_request_model::Model,
        requester: String,
        acceptor: String,
        reviewed_by: Option<String>,
        hidden_by: Vec<String>,
    ) -> Self {
        Self {
            id: record.id,
            requester,
            acceptor,
            date: record.date,
            reason: record.reason,
            status: record.status,
            review_reason: record.review_reason,
            reviewed_by,
            hidden_by,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
