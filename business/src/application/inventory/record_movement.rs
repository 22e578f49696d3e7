use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::ledger::record_movement;
use crate::domain::inventory::model::{LedgerEntry, MovementRequest};
use crate::domain::inventory::use_cases::record_movement::RecordMovementUseCase;
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct RecordMovementUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl RecordMovementUseCase for RecordMovementUseCaseImpl {
    async fn execute(&self, request: MovementRequest) -> Result<LedgerEntry, InventoryError> {
        self.logger.info(&format!(
            "Recording {} movement of {} for product {}",
            request.movement_type, request.quantity, request.product_id
        ));

        request.validate()?;

        let mut scope = self.transactions.begin().await?;
        let outcome = record_movement(scope.as_mut(), request).await;
        let entry = complete(scope, outcome, self.logger.as_ref()).await?;

        self.logger.info(&format!(
            "Movement {} recorded, stock now {}",
            entry.movement.id, entry.stock_after
        ));
        Ok(entry)
    }
}
