use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::ledger::current_stock;
use crate::domain::inventory::use_cases::get_current_stock::{
    GetCurrentStockParams, GetCurrentStockUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct GetCurrentStockUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetCurrentStockUseCase for GetCurrentStockUseCaseImpl {
    async fn execute(&self, params: GetCurrentStockParams) -> Result<i32, InventoryError> {
        self.logger
            .info(&format!("Fetching stock for product: {}", params.product_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = current_stock(scope.as_mut(), params.product_id).await;
        complete(scope, outcome, self.logger.as_ref()).await
    }
}
