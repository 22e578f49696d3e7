use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;

pub struct GetCustomerOrdersParams {
    pub customer_id: Uuid,
}

#[async_trait]
pub trait GetCustomerOrdersUseCase: Send + Sync {
    async fn execute(&self, params: GetCustomerOrdersParams) -> Result<Vec<Order>, OrderError>;
}
