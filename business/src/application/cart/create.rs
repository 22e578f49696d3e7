use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::activity::{CartAction, log_activity};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::cart::model::Cart;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::store::expire_if_idle;
use crate::domain::cart::use_cases::create::{CreateCartParams, CreateCartUseCase};
use crate::domain::catalog::repository::CustomerRepository;
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct CreateCartUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl CreateCartUseCaseImpl {
    async fn create(
        &self,
        scope: &mut dyn UnitOfWork,
        params: &CreateCartParams,
    ) -> Result<Cart, CartError> {
        if !scope.customer_exists(params.customer_id).await? {
            return Err(CartError::CustomerNotFound);
        }

        // One usable cart per customer: hand back the current one if it is still live.
        if let Some(existing) = scope
            .find_active_cart_for_customer(params.customer_id)
            .await?
        {
            let existing =
                expire_if_idle(scope, existing, &self.expiry, Utc::now(), &params.actor).await?;
            if existing.is_active() {
                return Ok(existing);
            }
        }

        let cart = Cart::new(params.customer_id, params.session_id.clone());
        scope.insert_cart(&cart).await?;
        log_activity(scope, &cart, None, CartAction::Create, (None, None), &params.actor).await?;
        Ok(cart)
    }
}

#[async_trait]
impl CreateCartUseCase for CreateCartUseCaseImpl {
    async fn execute(&self, params: CreateCartParams) -> Result<Cart, CartError> {
        self.logger
            .info(&format!("Creating cart for customer: {}", params.customer_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = self.create(scope.as_mut(), &params).await;
        let cart = complete(scope, outcome, self.logger.as_ref()).await?;

        self.logger.info(&format!("Cart ready with id: {}", cart.id));
        Ok(cart)
    }
}
