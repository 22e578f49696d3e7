use async_trait::async_trait;

use crate::domain::order::assembler::OrderDraft;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::shared::value_objects::Actor;

pub struct CreateOrderParams {
    pub draft: OrderDraft,
    pub actor: Actor,
}

#[async_trait]
pub trait CreateOrderUseCase: Send + Sync {
    async fn execute(&self, params: CreateOrderParams) -> Result<Order, OrderError>;
}
