use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::number::is_order_number;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::get_by_number::{
    GetOrderByNumberParams, GetOrderByNumberUseCase,
};
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct GetOrderByNumberUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetOrderByNumberUseCase for GetOrderByNumberUseCaseImpl {
    async fn execute(&self, params: GetOrderByNumberParams) -> Result<Order, OrderError> {
        let order_number = params.order_number.trim();
        self.logger
            .info(&format!("Fetching order by number: {}", order_number));

        if !is_order_number(order_number) {
            return Err(OrderError::OrderNotFound);
        }

        let mut scope = self.transactions.begin().await?;
        let outcome = scope
            .find_order_by_number(order_number)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => OrderError::OrderNotFound,
                other => OrderError::Repository(other),
            });
        complete(scope, outcome, self.logger.as_ref()).await
    }
}
