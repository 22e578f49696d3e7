use async_trait::async_trait;

use crate::domain::cart::repository::{
    CartActivityRepository, CartItemRepository, CartRepository,
};
use crate::domain::catalog::repository::{CustomerRepository, ProductRepository};
use crate::domain::errors::RepositoryError;
use crate::domain::inventory::repository::StockMovementRepository;
use crate::domain::logger::Logger;
use crate::domain::order::repository::OrderRepository;

/// One open transaction against the backing store.
///
/// Every repository port is reachable through the scope, so a group of
/// mutations issued through the same `UnitOfWork` commits or rolls back as a
/// whole. A scope cannot open another scope: nesting is impossible by
/// construction.
#[async_trait]
pub trait UnitOfWork:
    ProductRepository
    + CustomerRepository
    + StockMovementRepository
    + CartRepository
    + CartItemRepository
    + CartActivityRepository
    + OrderRepository
    + Send
{
    async fn commit(&mut self) -> Result<(), RepositoryError>;
    async fn rollback(&mut self) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait TransactionCoordinator: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError>;
}

/// Ends a scope according to the outcome of the work done inside it.
///
/// On success the scope is committed and a commit failure becomes the result.
/// On failure the scope is rolled back before the original error is returned;
/// commit is never attempted. A rollback failure is logged and the original
/// error still wins.
pub async fn complete<T, E>(
    mut scope: Box<dyn UnitOfWork>,
    outcome: Result<T, E>,
    logger: &dyn Logger,
) -> Result<T, E>
where
    E: From<RepositoryError> + std::fmt::Display,
{
    match outcome {
        Ok(value) => {
            scope.commit().await?;
            Ok(value)
        }
        Err(err) => {
            logger.debug(&format!("Rolling back transaction after error: {}", err));
            if let Err(rollback_err) = scope.rollback().await {
                logger.error(&format!(
                    "Rollback failed ({}) while handling error: {}",
                    rollback_err, err
                ));
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockUow, mock_logger};

    #[derive(Debug, thiserror::Error)]
    enum TestError {
        #[error("test.failed")]
        Failed,
        #[error("repository.persistence")]
        Repository(#[from] RepositoryError),
    }

    #[tokio::test]
    async fn should_commit_on_success() {
        let mut uow = MockUow::new();
        uow.expect_commit().times(1).returning(|| Ok(()));
        uow.expect_rollback().never();

        let result: Result<u32, TestError> =
            complete(Box::new(uow), Ok(7), mock_logger().as_ref()).await;

        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn should_rollback_and_never_commit_on_error() {
        let mut uow = MockUow::new();
        uow.expect_commit().never();
        uow.expect_rollback().times(1).returning(|| Ok(()));

        let result: Result<u32, TestError> =
            complete(Box::new(uow), Err(TestError::Failed), mock_logger().as_ref()).await;

        assert!(matches!(result.unwrap_err(), TestError::Failed));
    }

    #[tokio::test]
    async fn should_keep_original_error_when_rollback_fails() {
        let mut uow = MockUow::new();
        uow.expect_rollback()
            .times(1)
            .returning(|| Err(RepositoryError::DatabaseError));

        let result: Result<u32, TestError> =
            complete(Box::new(uow), Err(TestError::Failed), mock_logger().as_ref()).await;

        assert!(matches!(result.unwrap_err(), TestError::Failed));
    }

    #[tokio::test]
    async fn should_surface_commit_failure() {
        let mut uow = MockUow::new();
        uow.expect_commit()
            .times(1)
            .returning(|| Err(RepositoryError::DatabaseError));

        let result: Result<u32, TestError> =
            complete(Box::new(uow), Ok(1), mock_logger().as_ref()).await;

        assert!(matches!(
            result.unwrap_err(),
            TestError::Repository(RepositoryError::DatabaseError)
        ));
    }
}
