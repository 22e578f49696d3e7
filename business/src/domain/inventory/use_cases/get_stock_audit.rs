use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::StockAudit;

pub struct GetStockAuditParams {
    pub product_id: Uuid,
}

#[async_trait]
pub trait GetStockAuditUseCase: Send + Sync {
    async fn execute(&self, params: GetStockAuditParams) -> Result<StockAudit, InventoryError>;
}
