use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::{LedgerEntry, MovementRequest};

#[async_trait]
pub trait RecordMovementUseCase: Send + Sync {
    async fn execute(&self, request: MovementRequest) -> Result<LedgerEntry, InventoryError>;
}
