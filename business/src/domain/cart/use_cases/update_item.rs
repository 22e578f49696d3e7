use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartItem;
use crate::domain::shared::value_objects::Actor;

pub struct UpdateCartItemParams {
    pub cart_item_id: Uuid,
    pub quantity: i32,
    pub actor: Actor,
}

#[async_trait]
pub trait UpdateCartItemUseCase: Send + Sync {
    async fn execute(&self, params: UpdateCartItemParams) -> Result<CartItem, CartError>;
}
