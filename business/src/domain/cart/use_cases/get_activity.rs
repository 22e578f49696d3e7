use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::cart::activity::CartActivity;
use crate::domain::cart::errors::CartError;

pub struct GetCartActivityParams {
    pub cart_id: Uuid,
}

#[async_trait]
pub trait GetCartActivityUseCase: Send + Sync {
    async fn execute(&self, params: GetCartActivityParams)
    -> Result<Vec<CartActivity>, CartError>;
}
