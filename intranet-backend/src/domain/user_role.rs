// src/domain/user_role.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// ユーザーのロールを表すenum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Worker,
    Manager,
}

impl UserRole {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "worker" => Some(Self::Worker),
            "manager" => Some(Self::Manager),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Manager => "manager",
        }
    }

    /// マネージャーかチェック（承認権限・部門全体の可視性を持つ）
    pub fn is_manager(&self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Worker
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s).ok_or_else(|| {
            format!("Invalid user role: '{}'. Valid roles are: worker, manager", s)
        })
    }
}

// データベースとの変換用
impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

impl TryFrom<String> for UserRole {
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
        assert_eq!(UserRole::from_str("worker"), Some(UserRole::Worker));
        assert_eq!(UserRole::from_str("MANAGER"), Some(UserRole::Manager));
        assert_eq!(UserRole::from_str("admin"), None);
    }

    #[test]
    fn test_is_manager() {
        assert!(UserRole::Manager.is_manager());
        assert!(!UserRole::Worker.is_manager());
    }

    #[test]
    fn test_serde() {
        let serialized = serde_json::to_string(&UserRole::Manager).unwrap();
        assert_eq!(serialized, r#""manager""#);

        let deserialized: UserRole = serde_json::from_str(r#""worker""#).unwrap();
        assert_eq!(deserialized, UserRole::Worker);
    }
}
