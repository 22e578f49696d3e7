use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;

use super::model::StockMovement;

/// Append-only movement log: rows are inserted, never updated or deleted.
#[async_trait]
pub trait StockMovementRepository: Send {
    async fn insert_movement(&mut self, movement: &StockMovement) -> Result<(), RepositoryError>;
    /// Movements for a product, newest first.
    async fn movements_for_product(
        &mut self,
        product_id: Uuid,
    ) -> Result<Vec<StockMovement>, RepositoryError>;
    async fn net_movement(&mut self, product_id: Uuid) -> Result<i64, RepositoryError>;
}
