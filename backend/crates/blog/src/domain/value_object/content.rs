//! Content Value Object
//!
//! Free-text body of a post or comment. Only sanitized text can be turned
//! into a [`Content`]; rows loaded from the database are trusted.

use std::fmt;

use platform::sanitize::Sanitize;

use crate::error::{BlogError, BlogResult};

/// Sanitized free text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content(String);

impl Content {
    /// Sanitize `raw` and require something to remain
    pub fn sanitized(raw: &str, sanitizer: &dyn Sanitize) -> BlogResult<Self> {
        if raw.trim().is_empty() {
            return Err(BlogError::InvalidParam("content is required".into()));
        }

        let clean = sanitizer.sanitize(raw);
        if clean.trim().is_empty() {
            return Err(BlogError::InvalidParam(
                "content is empty after sanitization".into(),
            ));
        }

        Ok(Self(clean))
    }

    pub fn from_db(content: impl Into<String>) -> Self {
        Self(content.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_db(self) -> String {
        self.0
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
