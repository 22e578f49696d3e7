use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::activity::CartAction;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::store::{clear_items, ensure_mutable, load_cart};
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct ClearCartUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl ClearCartUseCaseImpl {
    async fn clear(
        &self,
        scope: &mut dyn UnitOfWork,
        params: &ClearCartParams,
    ) -> Result<usize, CartError> {
        let mut cart = load_cart(scope, params.cart_id).await?;
        ensure_mutable(&cart, &self.expiry, Utc::now())?;

        let removed = clear_items(scope, &cart, CartAction::Remove, &params.actor).await?;
        if !removed.is_empty() {
            cart.touch();
            scope.update_cart(&cart).await?;
        }
        Ok(removed.len())
    }
}

#[async_trait]
impl ClearCartUseCase for ClearCartUseCaseImpl {
    async fn execute(&self, params: ClearCartParams) -> Result<usize, CartError> {
        self.logger
            .info(&format!("Clearing cart: {}", params.cart_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = self.clear(scope.as_mut(), &params).await;
        let removed = complete(scope, outcome, self.logger.as_ref()).await?;

        self.logger.info(&format!(
            "Removed {} lines from cart {}",
            removed, params.cart_id
        ));
        Ok(removed)
    }
}
