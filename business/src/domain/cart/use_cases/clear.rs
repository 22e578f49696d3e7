use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::shared::value_objects::Actor;

pub struct ClearCartParams {
    pub cart_id: Uuid,
    pub actor: Actor,
}

#[async_trait]
pub trait ClearCartUseCase: Send + Sync {
    /// Returns the number of removed lines.
    async fn execute(&self, params: ClearCartParams) -> Result<usize, CartError>;
}
