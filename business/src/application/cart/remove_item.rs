use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::activity::{CartAction, log_activity};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::cart::repository::{CartItemRepository, CartRepository};
use crate::domain::cart::store::{ensure_mutable, load_cart, load_item};
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct RemoveCartItemUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl RemoveCartItemUseCaseImpl {
    async fn remove(
        &self,
        scope: &mut dyn UnitOfWork,
        params: &RemoveCartItemParams,
    ) -> Result<(), CartError> {
        let item = load_item(scope, params.cart_item_id).await?;
        let mut cart = load_cart(scope, item.cart_id).await?;
        ensure_mutable(&cart, &self.expiry, Utc::now())?;

        scope.delete_cart_item(item.id).await?;
        cart.touch();
        scope.update_cart(&cart).await?;
        log_activity(
            scope,
            &cart,
            Some(item.product_id),
            CartAction::Remove,
            (Some(0), Some(item.quantity)),
            &params.actor,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl RemoveCartItemUseCase for RemoveCartItemUseCaseImpl {
    async fn execute(&self, params: RemoveCartItemParams) -> Result<(), CartError> {
        self.logger
            .info(&format!("Removing cart item: {}", params.cart_item_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = self.remove(scope.as_mut(), &params).await;
        complete(scope, outcome, self.logger.as_ref()).await
    }
}
