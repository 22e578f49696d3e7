use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::shared::value_objects::Actor;

pub struct RemoveCartItemParams {
    pub cart_item_id: Uuid,
    pub actor: Actor,
}

#[async_trait]
pub trait RemoveCartItemUseCase: Send + Sync {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<(), CartError>;
}
