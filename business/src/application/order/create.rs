use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::order::assembler::assemble;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::use_cases::create::{CreateOrderParams, CreateOrderUseCase};
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct CreateOrderUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateOrderUseCase for CreateOrderUseCaseImpl {
    async fn execute(&self, params: CreateOrderParams) -> Result<Order, OrderError> {
        self.logger.info(&format!(
            "Creating order for customer {} with {} lines",
            params.draft.customer_id,
            params.draft.lines.len()
        ));

        if params.draft.lines.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let mut scope = self.transactions.begin().await?;
        let outcome = assemble(scope.as_mut(), params.draft, &params.actor).await;
        let order = complete(scope, outcome, self.logger.as_ref()).await?;

        self.logger.info(&format!(
            "Order {} created with total {}",
            order.order_number, order.total_amount
        ));
        Ok(order)
    }
}
