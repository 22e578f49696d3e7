use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::inventory::errors::InventoryError;

pub struct GetCurrentStockParams {
    pub product_id: Uuid,
}

#[async_trait]
pub trait GetCurrentStockUseCase: Send + Sync {
    async fn execute(&self, params: GetCurrentStockParams) -> Result<i32, InventoryError>;
}
