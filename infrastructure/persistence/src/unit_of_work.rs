use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use business::domain::errors::RepositoryError;
use business::domain::transaction::{TransactionCoordinator, UnitOfWork};

use crate::error::db_error;

pub struct PgTransactionCoordinator {
    pool: PgPool,
}

impl PgTransactionCoordinator {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionCoordinator for PgTransactionCoordinator {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        let tx = self.pool.begin().await.map_err(db_error("begin"))?;
        Ok(Box::new(PgUnitOfWork { tx: Some(tx) }))
    }
}

/// One Postgres transaction. Every repository trait is implemented on this
/// type (see the per-entity `repository` modules), so all statements of a
/// scope run on the same connection. Dropping it without commit rolls back.
pub struct PgUnitOfWork {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgUnitOfWork {
    pub(crate) fn conn(&mut self) -> Result<&mut PgConnection, RepositoryError> {
        self.tx
            .as_deref_mut()
            .ok_or(RepositoryError::TransactionClosed)
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    async fn commit(&mut self) -> Result<(), RepositoryError> {
        let tx = self.tx.take().ok_or(RepositoryError::TransactionClosed)?;
        tx.commit().await.map_err(db_error("commit"))
    }

    async fn rollback(&mut self) -> Result<(), RepositoryError> {
        let tx = self.tx.take().ok_or(RepositoryError::TransactionClosed)?;
        tx.rollback().await.map_err(db_error("rollback"))
    }
}
