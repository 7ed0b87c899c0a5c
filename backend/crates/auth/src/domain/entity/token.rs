//! Token payload
//!
//! The opaque data embedded in every access and refresh token.

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

/// Subject carried by a token
///
/// Serialized as `{"id": <user id>}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    #[serde(rename = "id")]
    pub user_id: UserId,
}

impl TokenPayload {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}

/// Token kind, distinguished only by lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Access,
    Refresh,
}
