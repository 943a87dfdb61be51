// src/domain/task_status.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// タスクの状態を表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Approved,
    Rejected,
}

impl TaskStatus {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Pending,
            Self::InProgress,
            Self::Completed,
            Self::Approved,
            Self::Rejected,
        ]
    }

    /// 削除可能な状態かチェック（承認済みまたは却下済みのみ削除できる）
    pub fn is_deletable(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// レビュー済み（終端状態）かチェック
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }

    /// 有効なステータス遷移かチェック。
    /// pending → in_progress → completed → approved / rejected の前進のみ許可。
    pub fn can_transition_to(&self, new_status: Self) -> bool {
        match (self, new_status) {
            // 同じステータスは常に有効（no-op更新）
            (current, new) if current == &new => true,

            (Self::Pending, Self::InProgress) => true,
            (Self::InProgress, Self::Completed) => true,
            (Self::Completed, Self::Approved | Self::Rejected) => true,

            // その他の遷移は無効
            _ => false,
        }
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!(
                "Invalid task status: '{}'. Valid statuses are: {}",
                s,
                Self::all()
                    .iter()
                    .map(|s| s.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!(TaskStatus::from_str("pending"), Some(TaskStatus::Pending));
        assert_eq!(
            TaskStatus::from_str("IN_PROGRESS"),
            Some(TaskStatus::InProgress)
        );
        assert_eq!(TaskStatus::from_str("approved"), Some(TaskStatus::Approved));
        assert_eq!(TaskStatus::from_str("invalid"), None);
    }

    #[test]
    fn test_is_deletable() {
        assert!(TaskStatus::Approved.is_deletable());
        assert!(TaskStatus::Rejected.is_deletable());
        assert!(!TaskStatus::Pending.is_deletable());
        assert!(!TaskStatus::InProgress.is_deletable());
        assert!(!TaskStatus::Completed.is_deletable());
    }

    #[test]
    fn test_transitions_forward_only() {
        assert!(TaskStatus::Pending.can_transition_to(TaskStatus::InProgress));
        assert!(TaskStatus::InProgress.can_transition_to(TaskStatus::Completed));
        assert!(TaskStatus::Completed.can_transition_to(TaskStatus::Approved));
        assert!(TaskStatus::Completed.can_transition_to(TaskStatus::Rejected));

        // 後退・飛び越しは不可
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Completed));
        assert!(!TaskStatus::Pending.can_transition_to(TaskStatus::Approved));
        assert!(!TaskStatus::InProgress.can_transition_to(TaskStatus::Pending));
        assert!(!TaskStatus::Approved.can_transition_to(TaskStatus::Pending));
        assert!(!TaskStatus::Rejected.can_transition_to(TaskStatus::InProgress));
    }

    #[test]
    fn test_same_status_is_noop() {
        for status in TaskStatus::all() {
            assert!(status.can_transition_to(status));
        }
    }
}
