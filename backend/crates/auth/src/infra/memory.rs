//! In-memory adapters
//!
//! Used by tests and local runs without PostgreSQL. Semantics match the
//! production adapters: lookups skip soft-deleted users, emails are unique,
//! tokens have a validity window.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use chrono::Utc;
use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use kernel::tx::TransactionCoordinator;
use kernel::tx::memory::{MemoryDatabase, MemoryTx};
use uuid::Uuid;

use crate::domain::entity::{
    token::TokenPayload,
    user::{NewUser, User},
};
use crate::domain::repository::{CredentialStore, TokenService};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Credential Store
// ============================================================================

/// Users keyed by id
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl AuthState {
    fn live_users(&self) -> impl Iterator<Item = &User> {
        self.users.values().filter(|u| is_live(u))
    }
}

/// Soft-delete predicate for in-memory users
fn is_live(user: &User) -> bool {
    !user.is_deleted()
}

/// In-memory credential store and transaction coordinator
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    db: MemoryDatabase<AuthState>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a user deleted (test setup)
    pub async fn soft_delete(&self, id: UserId) -> AuthResult<()> {
        use kernel::tx::Transaction;

        let mut tx = self.db.begin().await?;
        let user = tx
            .state_mut()
            .users
            .get_mut(&id.value())
            .ok_or(AuthError::UserNotFound)?;
        user.deleted_at = Some(Utc::now());
        tx.commit().await?;
        Ok(())
    }
}

impl TransactionCoordinator for MemoryAuthRepository {
    type Tx = MemoryTx<AuthState>;

    async fn begin(&self) -> AppResult<Self::Tx> {
        self.db.begin().await
    }
}

impl CredentialStore for MemoryAuthRepository {
    type Tx = MemoryTx<AuthState>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .db
            .read(|s| s.live_users().find(|u| &u.email == email).cloned()))
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.db.read(|s| {
            s.users
                .get(&id.value())
                .filter(|u| is_live(u))
                .cloned()
        }))
    }

    async fn create(&self, tx: &mut MemoryTx<AuthState>, user: NewUser) -> AuthResult<User> {
        let state = tx.state_mut();

        // mirrors the unique index, which also covers deleted rows
        if state.users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }

        state.last_id += 1;
        let created = User {
            id: UserId::new(state.last_id),
            name: user.name,
            email: user.email,
            password: user.password,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        };
        state.users.insert(state.last_id, created.clone());

        Ok(created)
    }
}

// ============================================================================
// Token Service
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct IssuedToken {
    payload: TokenPayload,
    not_before: i64,
    expires_at: i64,
}

/// Opaque random tokens remembered in a map
#[derive(Debug, Default)]
pub struct MemoryTokenService {
    issued: Mutex<HashMap<String, IssuedToken>>,
}

impl MemoryTokenService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenService for MemoryTokenService {
    fn issue(&self, payload: &TokenPayload, ttl: Duration) -> AuthResult<String> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl.as_secs())
            .map_err(|_| AuthError::Internal("Token TTL out of range".into()))?;

        let token = Uuid::new_v4().simple().to_string();
        let mut issued = self.issued.lock().unwrap_or_else(PoisonError::into_inner);
        // expired tokens can never verify again
        issued.retain(|_, t| t.expires_at > now);
        issued.insert(
            token.clone(),
            IssuedToken {
                payload: *payload,
                not_before: now,
                expires_at: now.saturating_add(ttl),
            },
        );

        Ok(token)
    }

    fn verify(&self, token: &str) -> AuthResult<TokenPayload> {
        let issued = self
            .issued
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .copied()
            .ok_or(AuthError::InvalidToken)?;

        let now = Utc::now().timestamp();
        if now < issued.not_before || now >= issued.expires_at {
            return Err(AuthError::InvalidToken);
        }

        Ok(issued.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{
        user_name::UserName,
        user_password::{RawPassword, UserPassword},
    };
    use kernel::tx::Transaction;

    async fn new_user(email: &str) -> NewUser {
        NewUser {
            name: UserName::new("Alice").unwrap(),
            email: Email::new(email).unwrap(),
            password: UserPassword::from_raw(RawPassword::new("pw123".into()).unwrap())
                .await
                .unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let repo = MemoryAuthRepository::new();

        let mut tx = repo.begin().await.unwrap();
        let a = repo.create(&mut tx, new_user("a@x.com").await).await.unwrap();
        let b = repo.create(&mut tx, new_user("b@x.com").await).await.unwrap();
        tx.commit().await.unwrap();

        assert!(a.id < b.id);
        assert_eq!(
            repo.find_by_id(b.id).await.unwrap().unwrap().email.as_str(),
            "b@x.com"
        );
    }

    #[tokio::test]
    async fn test_uncommitted_user_is_invisible() {
        let repo = MemoryAuthRepository::new();
        let email = Email::new("a@x.com").unwrap();

        let mut tx = repo.begin().await.unwrap();
        repo.create(&mut tx, new_user("a@x.com").await).await.unwrap();
        assert!(repo.find_by_email(&email).await.unwrap().is_none());
        drop(tx);

        assert!(repo.find_by_email(&email).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_in_store() {
        let repo = MemoryAuthRepository::new();

        let mut tx = repo.begin().await.unwrap();
        repo.create(&mut tx, new_user("a@x.com").await).await.unwrap();
        let err = repo
            .create(&mut tx, new_user("a@x.com").await)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailAlreadyExists));
    }

    #[tokio::test]
    async fn test_soft_deleted_user_is_excluded() {
        let repo = MemoryAuthRepository::new();

        let mut tx = repo.begin().await.unwrap();
        let user = repo.create(&mut tx, new_user("a@x.com").await).await.unwrap();
        tx.commit().await.unwrap();

        repo.soft_delete(user.id).await.unwrap();

        assert!(repo.find_by_id(user.id).await.unwrap().is_none());
        assert!(
            repo.find_by_email(&user.email)
                .await
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_memory_tokens() {
        let svc = MemoryTokenService::new();
        let payload = TokenPayload::new(UserId::new(5));

        let token = svc.issue(&payload, Duration::from_secs(60)).unwrap();
        assert_eq!(svc.verify(&token).unwrap(), payload);

        assert!(matches!(svc.verify("unknown"), Err(AuthError::InvalidToken)));

        // zero lifetime is already expired
        let expired = svc.issue(&payload, Duration::ZERO).unwrap();
        assert!(matches!(svc.verify(&expired), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_issue_evicts_expired_tokens() {
        let svc = MemoryTokenService::new();
        let payload = TokenPayload::new(UserId::new(5));

        let expired = svc.issue(&payload, Duration::ZERO).unwrap();
        let live = svc.issue(&payload, Duration::from_secs(60)).unwrap();

        let issued = svc.issued.lock().unwrap();
        assert!(!issued.contains_key(&expired));
        assert!(issued.contains_key(&live));
        assert_eq!(issued.len(), 1);
    }
}
