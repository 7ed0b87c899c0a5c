//! In-memory transactions for tests and local runs
//!
//! The whole state `S` is copied on `begin` and written back on `commit`.
//! Writers are serialized by a single lock held for the life of the
//! transaction, which gives the same guarantee as a row lock taken with
//! `SELECT ... FOR UPDATE`: a second writer only observes committed state.
//! Reads outside a transaction see the last committed state.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::{Transaction, TransactionCoordinator};
use crate::error::app_error::AppResult;

/// 共有メモリデータベース
#[derive(Debug)]
pub struct MemoryDatabase<S> {
    committed: Arc<RwLock<S>>,
    writer: Arc<Mutex<()>>,
}

impl<S> Clone for MemoryDatabase<S> {
    fn clone(&self) -> Self {
        Self {
            committed: Arc::clone(&self.committed),
            writer: Arc::clone(&self.writer),
        }
    }
}

impl<S: Default> Default for MemoryDatabase<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> MemoryDatabase<S> {
    pub fn new(state: S) -> Self {
        Self {
            committed: Arc::new(RwLock::new(state)),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// 確定済みの状態を読む
    pub fn read<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let guard = self.committed.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

impl<S> TransactionCoordinator for MemoryDatabase<S>
where
    S: Clone + Send + Sync + 'static,
{
    type Tx = MemoryTx<S>;

    async fn begin(&self) -> AppResult<Self::Tx> {
        let guard = Arc::clone(&self.writer).lock_owned().await;
        let working = self.read(S::clone);
        Ok(MemoryTx {
            working,
            committed: Arc::clone(&self.committed),
            _writer: guard,
        })
    }
}

/// メモリトランザクション
pub struct MemoryTx<S> {
    working: S,
    committed: Arc<RwLock<S>>,
    _writer: OwnedMutexGuard<()>,
}

impl<S> MemoryTx<S> {
    /// 作業中の状態（このトランザクション内の書き込みを含む）
    pub fn state(&self) -> &S {
        &self.working
    }

    pub fn state_mut(&mut self) -> &mut S {
        &mut self.working
    }
}

impl<S> Transaction for MemoryTx<S>
where
    S: Send + Sync,
{
    async fn commit(self) -> AppResult<()> {
        let MemoryTx {
            working,
            committed,
            _writer,
        } = self;
        let mut guard = committed.write().unwrap_or_else(PoisonError::into_inner);
        *guard = working;
        Ok(())
    }

    async fn rollback(self) -> AppResult<()> {
        Ok(())
    }
}
