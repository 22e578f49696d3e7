use async_trait::async_trait;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::OrderStatus;
use crate::domain::order::query::OrderPage;

pub struct ListOrdersParams {
    pub status: Option<OrderStatus>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[async_trait]
pub trait ListOrdersUseCase: Send + Sync {
    async fn execute(&self, params: ListOrdersParams) -> Result<OrderPage, OrderError>;
}
