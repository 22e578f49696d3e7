use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::logger::Logger;
use crate::domain::order::assembler::convert_cart;
use crate::domain::order::errors::OrderError;
use crate::domain::order::model::Order;
use crate::domain::order::use_cases::create_from_cart::{
    CreateOrderFromCartParams, CreateOrderFromCartUseCase,
};
use crate::domain::transaction::{TransactionCoordinator, complete};

pub struct CreateOrderFromCartUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl CreateOrderFromCartUseCase for CreateOrderFromCartUseCaseImpl {
    async fn execute(&self, params: CreateOrderFromCartParams) -> Result<Order, OrderError> {
        self.logger
            .info(&format!("Converting cart {} to an order", params.cart_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = convert_cart(
            scope.as_mut(),
            params.cart_id,
            params.shipping,
            params.notes,
            &params.actor,
            &self.expiry,
            Utc::now(),
        )
        .await;
        let conversion = complete(scope, outcome, self.logger.as_ref()).await?;

        for change in &conversion.price_changes {
            self.logger.warn(&format!(
                "Price of product {} changed since it was added to cart {}: {} -> {}",
                change.product_id, params.cart_id, change.cart_price, change.order_price
            ));
        }
        self.logger.info(&format!(
            "Order {} created from cart {}",
            conversion.order.order_number, params.cart_id
        ));
        Ok(conversion.order)
    }
}
