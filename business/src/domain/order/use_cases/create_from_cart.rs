use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::value_objects::ShippingAddress;
use crate::domain::shared::value_objects::Actor;

pub struct CreateOrderFromCartParams {
    pub cart_id: Uuid,
    pub shipping: ShippingAddress,
    pub notes: Option<String>,
    pub actor: Actor,
}

#[async_trait]
pub trait CreateOrderFromCartUseCase: Send + Sync {
    async fn execute(&self, params: CreateOrderFromCartParams) -> Result<Order, OrderError>;
}
