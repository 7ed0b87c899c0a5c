//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::id::UserId;
use kernel::tx::{Transaction, TransactionCoordinator};

use crate::domain::entity::user::NewUser;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{
    email::Email,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
}

/// Register use case
pub struct RegisterUseCase<U, C>
where
    C: TransactionCoordinator,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx>,
{
    store: Arc<U>,
    coordinator: Arc<C>,
}

impl<U, C> RegisterUseCase<U, C>
where
    C: TransactionCoordinator,
    U: CredentialStore<Tx = <C as TransactionCoordinator>::Tx>,
{
    pub fn new(store: Arc<U>, coordinator: Arc<C>) -> Self {
        Self { store, coordinator }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let name = UserName::new(input.name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password = UserPassword::from_raw(raw_password).await?;

        // dropped without commit on any error below
        let mut tx = self.coordinator.begin().await?;
        let user = self
            .store
            .create(
                &mut tx,
                NewUser {
                    name,
                    email,
                    password,
                },
            )
            .await?;
        tx.commit().await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(RegisterOutput { user_id: user.id })
    }
}
