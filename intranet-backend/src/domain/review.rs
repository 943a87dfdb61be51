// src/domain/review.rs
//
// 許可申請・休暇申請・シフト交代申請で共有するレビューライフサイクル。
// approve / reject / modify / hide の4操作はこの型の上に一度だけ実装する。

use serde::{Deserialize, Serialize};
use std::fmt;

/// レビュー対象申請の状態を表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    Approved,
    Rejected,
    Modified,
    // 休暇申請だけが宣言する状態。遷移で到達するエンドポイントは存在しない
    Deleted,
}

impl ReviewStatus {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "modified" => Some(Self::Modified),
            "deleted" => Some(Self::Deleted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
        }
    }

    /// 非表示にできる状態かチェック（承認済みまたは却下済みのみ）
    pub fn can_hide(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// マネージャーが修正できる状態かチェック（保留中または承認済みのみ）
    pub fn can_modify(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }
}

impl Default for ReviewStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| format!("Invalid review status: '{}'", s))
    }
}

impl From<ReviewStatus> for String {
    fn from(status: ReviewStatus) -> Self {
        status.as_str().to_string()
    }
}

/// 申請の種別。request_hidesテーブルの判別キーとしても使う。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    Permission,
    Vacation,
    ShiftChange,
}

impl RequestKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Permission => "permission",
            Self::Vacation => "vacation",
            Self::ShiftChange => "shift_change",
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_hide() {
        assert!(ReviewStatus::Approved.can_hide());
        assert!(ReviewStatus::Rejected.can_hide());
        assert!(!ReviewStatus::Pending.can_hide());
        assert!(!ReviewStatus::Modified.can_hide());
        assert!(!ReviewStatus::Deleted.can_hide());
    }

    #[test]
    fn test_can_modify() {
        assert!(ReviewStatus::Pending.can_modify());
        assert!(ReviewStatus::Approved.can_modify());
        assert!(!ReviewStatus::Rejected.can_modify());
        assert!(!ReviewStatus::Modified.can_modify());
    }

    #[test]
    fn test_round_trip() {
        for status in [
            ReviewStatus::Pending,
            ReviewStatus::Approved,
            ReviewStatus::Rejected,
            ReviewStatus::Modified,
            ReviewStatus::Deleted,
        ] {
            assert_eq!(ReviewStatus::from_str(status.as_str()), Some(status));
        }
    }
}
