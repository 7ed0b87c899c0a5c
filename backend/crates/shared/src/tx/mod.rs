//! Transaction coordinator
//!
//! A unit of work spans one or more store calls. Store methods that write
//! take `&mut Tx`; the use case owns the transaction and must call
//! [`Transaction::commit`] explicitly. A transaction dropped without commit
//! rolls back, so every `?` on an error path and every cancelled request
//! leaves no partial writes behind.

pub mod memory;
#[cfg(feature = "sqlx")]
pub mod postgres;

use crate::error::app_error::AppResult;

/// トランザクションを開始する能力
#[trait_variant::make(TransactionCoordinator: Send)]
pub trait LocalTransactionCoordinator {
    /// このコーディネーターが払い出すトランザクション型
    type Tx: Transaction + Send;

    /// 新しいトランザクションを開始
    async fn begin(&self) -> AppResult<Self::Tx>;
}

/// 開始済みのトランザクション
///
/// `commit` を呼ばずに drop した場合はロールバックされます。
#[trait_variant::make(Transaction: Send)]
pub trait LocalTransaction {
    /// 変更を確定
    async fn commit(self) -> AppResult<()>;

    /// 変更を破棄
    async fn rollback(self) -> AppResult<()>;
}
