//! User Name Value Object
//!
//! 表示名。投稿者名・コメント投稿者名のスナップショットとして使われる。
//!
//! ## 不変条件
//! - 前後の空白を除去した上で空でないこと
//! - 長さ: 1〜100文字（Unicode コードポイント数）
//! - 制御文字を含まないこと

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{AuthError, AuthResult};

/// Maximum length for user name (in characters)
pub const USER_NAME_MAX_LENGTH: usize = 100;

/// User display name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    /// 検証してユーザー名を作成
    pub fn new(raw: impl Into<String>) -> AuthResult<Self> {
        let name = raw.into().trim().to_string();

        if name.is_empty() {
            return Err(AuthError::InvalidParam("name is required".into()));
        }

        if name.chars().count() > USER_NAME_MAX_LENGTH {
            return Err(AuthError::InvalidParam(format!(
                "name must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AuthError::InvalidParam(
                "name contains invalid characters".into(),
            ));
        }

        Ok(Self(name))
    }

    /// DB から復元（検証済みとみなす）
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
