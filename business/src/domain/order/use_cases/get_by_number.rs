use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;

pub struct GetOrderByNumberParams {
    pub order_number: String,
}

#[async_trait]
pub trait GetOrderByNumberUseCase: Send + Sync {
    async fn execute(&self, params: GetOrderByNumberParams) -> Result<Order, OrderError>;
}
