use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;

pub struct GetCartByIdParams {
    pub cart_id: Uuid,
}

#[async_trait]
pub trait GetCartByIdUseCase: Send + Sync {
    async fn execute(&self, params: GetCartByIdParams) -> Result<CartView, CartError>;
}
