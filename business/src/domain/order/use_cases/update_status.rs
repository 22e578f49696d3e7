use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::{Order, OrderStatus};

pub struct UpdateOrderStatusParams {
    pub order_id: Uuid,
    pub status: OrderStatus,
    pub processed_by: Option<Uuid>,
}

#[async_trait]
pub trait UpdateOrderStatusUseCase: Send + Sync {
    async fn execute(&self, params: UpdateOrderStatusParams) -> Result<Order, OrderError>;
}
