use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartItem;
use crate::domain::shared::value_objects::Actor;

pub struct AddCartItemParams {
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub actor: Actor,
}

#[async_trait]
pub trait AddCartItemUseCase: Send + Sync {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartItem, CartError>;
}
