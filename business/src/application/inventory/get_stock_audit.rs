use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::ledger::audit;
use crate::domain::inventory::model::StockAudit;
use crate::domain::inventory::use_cases::get_stock_audit::{
    GetStockAuditParams, GetStockAuditUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct GetStockAuditUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl GetStockAuditUseCase for GetStockAuditUseCaseImpl {
    async fn execute(&self, params: GetStockAuditParams) -> Result<StockAudit, InventoryError> {
        let mut scope = self.transactions.begin().await?;
        let outcome = audit(scope.as_mut(), params.product_id).await;
        let audit = complete(scope, outcome, self.logger.as_ref()).await?;

        if audit.opening_balance() < 0 {
            self.logger.warn(&format!(
                "Product {} ledger exceeds cached stock: cached={}, net={}",
                audit.product_id, audit.cached_quantity, audit.net_movement
            ));
        }
        Ok(audit)
    }
}
