use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;

pub struct GetActiveCartParams {
    pub customer_id: Uuid,
}

#[async_trait]
pub trait GetActiveCartUseCase: Send + Sync {
    async fn execute(&self, params: GetActiveCartParams) -> Result<CartView, CartError>;
}
