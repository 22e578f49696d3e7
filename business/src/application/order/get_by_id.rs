use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_by_id::{GetOrderByIdParams, GetOrderByIdUseCase};
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct GetOrderByIdUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrderByIdUseCase for GetOrderByIdUseCaseImpl {
    async fn execute(&self, params: GetOrderByIdParams) -> Result<Order, OrderError> {
        self.logger
            .info(&format!("Fetching order by id: {}", params.order_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = scope.find_order(params.order_id).await.map_err(|e| match e {
            RepositoryError::NotFound => OrderError::OrderNotFound,
            other => OrderError::Repository(other),
        });
        complete(scope, outcome, self.logger.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{coordinator_with, mock_logger, rolling_back_uow};
    use uuid::Uuid;

    #[tokio::test]
    async fn should_return_not_found_for_unknown_order() {
        let mut uow = rolling_back_uow();
        uow.expect_find_order()
            .returning(|_| Err(RepositoryError::NotFound));

        let use_case = GetOrderByIdUseCaseImpl {
            transactions: coordinator_with(vec![uow]),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(GetOrderByIdParams {
                order_id: Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), OrderError::OrderNotFound));
    }
}
