//! Transaction session shared by the repositories of one unit of work
//!
//! Writes from every repository of a [`PgUnitOfWork`](crate::PgUnitOfWork) go
//! through the same PostgreSQL transaction. The transaction is opened by the
//! first write and closed by `commit` or `rollback`; the next write after that
//! opens a fresh one.

use sqlx::{PgPool, Postgres, Transaction};
use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

use crate::error::DatabaseError;

pub(crate) type PgTransaction = Transaction<'static, Postgres>;

/// Slot holding the open transaction, if any
pub(crate) type TransactionSlot = Option<PgTransaction>;

/// Lazily opened transaction over a connection pool
pub struct PgSession {
    pool: PgPool,
    transaction: Mutex<TransactionSlot>,
}

impl std::fmt::Debug for PgSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgSession")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl PgSession {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            transaction: Mutex::new(None),
        }
    }

    /// Pool used for reads, which only see committed rows
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Returns true while a transaction holds uncommitted writes
    pub async fn in_transaction(&self) -> bool {
        self.transaction.lock().await.is_some()
    }

    /// Locks the transaction slot for the duration of one write
    pub(crate) async fn lock(&self) -> MutexGuard<'_, TransactionSlot> {
        self.transaction.lock().await
    }

    /// Returns the open transaction, beginning one if the slot is empty
    pub(crate) async fn begin<'g>(
        &self,
        slot: &'g mut TransactionSlot,
    ) -> Result<&'g mut PgTransaction, DatabaseError> {
        if slot.is_none() {
            let transaction = self
                .pool
                .begin()
                .await
                .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;
            debug!("Opened database transaction");
            *slot = Some(transaction);
        }

        slot.as_mut()
            .ok_or_else(|| DatabaseError::TransactionFailed("transaction slot is empty".to_string()))
    }

    /// Commits the open transaction; a no-op when nothing was written
    pub async fn commit(&self) -> Result<(), DatabaseError> {
        let transaction = self.transaction.lock().await.take();
        if let Some(transaction) = transaction {
            transaction.commit().await?;
            debug!("Committed database transaction");
        }
        Ok(())
    }

    /// Rolls back the open transaction; a no-op when nothing was written
    pub async fn rollback(&self) -> Result<(), DatabaseError> {
        let transaction = self.transaction.lock().await.take();
        if let Some(transaction) = transaction {
            transaction.rollback().await?;
            debug!("Rolled back database transaction");
        }
        Ok(())
    }
}
