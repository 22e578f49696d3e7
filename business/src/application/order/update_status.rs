use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::repository::OrderRepository;
use crate::domain::order::use_cases::update_status::{
    UpdateOrderStatusParams, UpdateOrderStatusUseCase,
};
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

/// Payment callbacks land here with PaymentConfirmed / PaymentFailed.
pub struct UpdateOrderStatusUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

async fn transition(
    scope: &mut dyn UnitOfWork,
    params: &UpdateOrderStatusParams,
) -> Result<(Order, bool), OrderError> {
    let mut order = scope.find_order(params.order_id).await.map_err(|e| match e {
        RepositoryError::NotFound => OrderError::OrderNotFound,
        other => OrderError::Repository(other),
    })?;

    let changed = order.apply_status(params.status, params.processed_by, Utc::now())?;
    if changed {
        scope.update_order(&order).await?;
    }
    Ok((order, changed))
}

#[async_trait]
impl UpdateOrderStatusUseCase for UpdateOrderStatusUseCaseImpl {
    async fn execute(&self, params: UpdateOrderStatusParams) -> Result<Order, OrderError> {
        self.logger.info(&format!(
            "Updating order {} to {}",
            params.order_id, params.status
        ));

        let mut scope = self.transactions.begin().await?;
        let outcome = transition(scope.as_mut(), &params).await;
        let (order, changed) = complete(scope, outcome, self.logger.as_ref()).await?;

        if !changed {
            self.logger.debug(&format!(
                "Order {} already {}, nothing to do",
                order.id, order.status
            ));
        }
        Ok(order)
    }
}
