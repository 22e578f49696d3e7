use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::Cart;
use crate::domain::shared::value_objects::Actor;

pub struct CreateCartParams {
    pub customer_id: Uuid,
    pub session_id: Option<String>,
    pub actor: Actor,
}

#[async_trait]
pub trait CreateCartUseCase: Send + Sync {
    async fn execute(&self, params: CreateCartParams) -> Result<Cart, CartError>;
}
