//! Post Title Value Object
//!
//! ## 不変条件
//! - 前後の空白を除去した上で空でないこと
//! - 長さ: 1〜255文字（Unicode コードポイント数）
//! - 改行などの制御文字を含まないこと

use std::fmt;

use crate::error::{BlogError, BlogResult};

/// タイトルの最大文字数
pub const POST_TITLE_MAX_LENGTH: usize = 255;

/// 投稿タイトル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTitle(String);

impl PostTitle {
    /// 検証してタイトルを作成
    pub fn new(raw: impl Into<String>) -> BlogResult<Self> {
        let title = raw.into().trim().to_string();

        if title.is_empty() {
            return Err(BlogError::InvalidParam("title is required".into()));
        }

        if title.chars().count() > POST_TITLE_MAX_LENGTH {
            return Err(BlogError::InvalidParam(format!(
                "title must be at most {} characters",
                POST_TITLE_MAX_LENGTH
            )));
        }

        if title.chars().any(char::is_control) {
            return Err(BlogError::InvalidParam(
                "title contains invalid characters".into(),
            ));
        }

        Ok(Self(title))
    }

    /// DB から復元（検証済みとみなす）
    pub fn from_db(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
