use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::CartView;

#[async_trait]
pub trait ListActiveCartsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<CartView>, CartError>;
}
