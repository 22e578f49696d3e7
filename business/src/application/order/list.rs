use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::query::{OrderPage, OrderQuery};
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::list::{ListOrdersParams, ListOrdersUseCase};
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct ListOrdersUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl ListOrdersUseCase for ListOrdersUseCaseImpl {
    async fn execute(&self, params: ListOrdersParams) -> Result<OrderPage, OrderError> {
        let query = OrderQuery::new(params.status, params.page, params.page_size)?;
        match query.status {
            Some(status) => self.logger.info(&format!(
                "Listing {} orders, page {} of size {}",
                status, query.page, query.page_size
            )),
            None => self.logger.info(&format!(
                "Listing orders, page {} of size {}",
                query.page, query.page_size
            )),
        }

        let mut scope = self.transactions.begin().await?;
        let outcome = scope.find_orders(&query).await.map_err(OrderError::from);
        let (orders, total) = complete(scope, outcome, self.logger.as_ref()).await?;

        Ok(OrderPage {
            orders,
            total,
            page: query.page,
            page_size: query.page_size,
        })
    }
}
