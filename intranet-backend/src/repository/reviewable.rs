// src/repository/reviewable.rs
//
// 3種類の申請テーブル（許可・休暇・シフト交代）に共通するレビュー操作の
// リポジトリ境界。ワークフロー本体は service 層で一度だけ実装する。

use crate::domain::review::{RequestKind, ReviewStatus};
use async_trait::async_trait;
use sea_orm::DbErr;
use uuid::Uuid;

#[async_trait]
pub trait ReviewableRepository: Send + Sync {
    type Record: Clone + Send + Sync;
    type NewRequest: Send + 'static;
    type Patch: Send + 'static;

    fn kind(&self) -> RequestKind;

    fn record_id(record: &Self::Record) -> Uuid;

    fn record_status(record: &Self::Record) -> ReviewStatus;

    /// 申請の当事者（所有者と、シフト交代では引受者も）
    fn record_participants(record: &Self::Record) -> Vec<Uuid>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Self::Record>, DbErr>;

    async fn insert(&self, owner_id: Uuid, input: Self::NewRequest)
        -> Result<Self::Record, DbErr>;

    /// 指定した所有者集合の申請。viewerが非表示にしたものは除く
    async fn find_for_owners(
        &self,
        owner_ids: &[Uuid],
        viewer_id: Uuid,
    ) -> Result<Vec<Self::Record>, DbErr>;

    /// 当事者として自分に見える申請。viewerが非表示にしたものは除く
    async fn find_for_participant(&self, viewer_id: Uuid) -> Result<Vec<Self::Record>, DbErr>;

    async fn set_review(
        &self,
        id: Uuid,
        status: ReviewStatus,
        reason: Option<String>,
        reviewer_id: Uuid,
    ) -> Result<Self::Record, DbErr>;

    /// 部分修正を適用し、statusをmodifiedへ移す
    async fn apply_patch(
        &self,
        id: Uuid,
        patch: Self::Patch,
        reviewer_id: Uuid,
        reason: Option<String>,
    ) -> Result<Self::Record, DbErr>;
}
