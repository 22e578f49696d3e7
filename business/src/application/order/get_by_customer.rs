use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::catalog::repository::CustomerRepository;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_by_customer::{
    GetCustomerOrdersParams, GetCustomerOrdersUseCase,
};
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct GetCustomerOrdersUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

async fn read(
    scope: &mut dyn UnitOfWork,
    params: &GetCustomerOrdersParams,
) -> Result<Vec<Order>, OrderError> {
    if !scope.customer_exists(params.customer_id).await? {
        return Err(OrderError::CustomerNotFound);
    }
    Ok(scope.orders_for_customer(params.customer_id).await?)
}

#[async_trait]
impl GetCustomerOrdersUseCase for GetCustomerOrdersUseCaseImpl {
    async fn execute(&self, params: GetCustomerOrdersParams) -> Result<Vec<Order>, OrderError> {
        self.logger.info(&format!(
            "Fetching orders for customer: {}",
            params.customer_id
        ));

        let mut scope = self.transactions.begin().await?;
        let outcome = read(scope.as_mut(), &params).await;
        complete(scope, outcome, self.logger.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{committing_uow, coordinator_with, mock_logger};
    use uuid::Uuid;

    #[tokio::test]
    async fn should_list_nothing_for_customer_without_orders() {
        let mut uow = committing_uow();
        uow.expect_customer_exists().returning(|_| Ok(true));
        uow.expect_orders_for_customer().returning(|_| Ok(vec![]));

        let use_case = GetCustomerOrdersUseCaseImpl {
            transactions: coordinator_with(vec![uow]),
            logger: mock_logger(),
        };

        let orders = use_case
            .execute(GetCustomerOrdersParams {
                customer_id: Uuid::new_v4(),
            })
            .await
            .unwrap();

        assert!(orders.is_empty());
    }
}
