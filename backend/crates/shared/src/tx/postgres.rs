//! PostgreSQL transactions backed by `sqlx::Transaction`
//!
//! `sqlx` issues `ROLLBACK` when a transaction is dropped without commit.

use sqlx::{PgConnection, PgPool, Postgres};

use super::{Transaction, TransactionCoordinator};
use crate::error::app_error::AppResult;

/// PostgreSQL トランザクションコーディネーター
#[derive(Clone)]
pub struct PgTransactor {
    pool: PgPool,
}

impl PgTransactor {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl TransactionCoordinator for PgTransactor {
    type Tx = PgTx;

    async fn begin(&self) -> AppResult<Self::Tx> {
        let tx = self.pool.begin().await?;
        Ok(PgTx(tx))
    }
}

/// PostgreSQL トランザクション
pub struct PgTx(sqlx::Transaction<'static, Postgres>);

impl PgTx {
    /// クエリ実行用のコネクション
    pub fn conn(&mut self) -> &mut PgConnection {
        &mut self.0
    }
}

impl Transaction for PgTx {
    async fn commit(self) -> AppResult<()> {
        self.0.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> AppResult<()> {
        self.0.rollback().await?;
        Ok(())
    }
}
