use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::cart::model::CartView;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::store::{build_view, expire_if_idle};
use crate::domain::cart::use_cases::get_active::{GetActiveCartParams, GetActiveCartUseCase};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::Actor;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct GetActiveCartUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl GetActiveCartUseCaseImpl {
    async fn read(
        &self,
        scope: &mut dyn UnitOfWork,
        customer_id: Uuid,
    ) -> Result<Option<CartView>, CartError> {
        let Some(cart) = scope.find_active_cart_for_customer(customer_id).await? else {
            return Ok(None);
        };
        let cart = expire_if_idle(scope, cart, &self.expiry, Utc::now(), &Actor::system()).await?;
        if !cart.is_active() {
            return Ok(None);
        }
        Ok(Some(build_view(scope, cart).await?))
    }
}

#[async_trait]
impl GetActiveCartUseCase for GetActiveCartUseCaseImpl {
    async fn execute(&self, params: GetActiveCartParams) -> Result<CartView, CartError> {
        self.logger.info(&format!(
            "Fetching active cart for customer: {}",
            params.customer_id
        ));

        let mut scope = self.transactions.begin().await?;
        let outcome = self.read(scope.as_mut(), params.customer_id).await;
        let view = complete(scope, outcome, self.logger.as_ref()).await?;

        view.ok_or(CartError::CartNotFound)
    }
}
