use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::model::{MovementType, StockMovement};

pub struct GetMovementsParams {
    pub product_id: Uuid,
    /// Only movements of this type when set.
    pub movement_type: Option<MovementType>,
}

#[async_trait]
pub trait GetMovementsUseCase: Send + Sync {
    async fn execute(&self, params: GetMovementsParams)
    -> Result<Vec<StockMovement>, InventoryError>;
}
