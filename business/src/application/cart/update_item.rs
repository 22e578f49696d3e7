use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::activity::{CartAction, log_activity};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::cart::model::CartItem;
use crate::domain::cart::repository::{CartItemRepository, CartRepository};
use crate::domain::cart::store::{ensure_mutable, load_cart, load_item};
use crate::domain::cart::use_cases::update_item::{UpdateCartItemParams, UpdateCartItemUseCase};
use crate::domain::catalog::repository::ProductRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct UpdateCartItemUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl UpdateCartItemUseCaseImpl {
    async fn update(
        &self,
        scope: &mut dyn UnitOfWork,
        params: &UpdateCartItemParams,
    ) -> Result<CartItem, CartError> {
        let mut item = load_item(scope, params.cart_item_id).await?;
        let mut cart = load_cart(scope, item.cart_id).await?;
        ensure_mutable(&cart, &self.expiry, Utc::now())?;

        let increase = params.quantity - item.quantity;
        if increase > 0 {
            let product = scope
                .find_product(item.product_id)
                .await
                .map_err(|e| match e {
                    RepositoryError::NotFound => CartError::ProductNotFound(item.product_id),
                    other => CartError::Repository(other),
                })?;
            if !product.has_stock_for(increase) {
                return Err(CartError::InsufficientStock {
                    product_id: product.id,
                    requested: increase,
                    available: product.stock_quantity,
                });
            }
        }

        let previous = item.quantity;
        item.set_quantity(params.quantity)?;
        scope.save_cart_item(&item).await?;

        cart.touch();
        scope.update_cart(&cart).await?;
        log_activity(
            scope,
            &cart,
            Some(item.product_id),
            CartAction::Update,
            (Some(item.quantity), Some(previous)),
            &params.actor,
        )
        .await?;

        Ok(item)
    }
}

#[async_trait]
impl UpdateCartItemUseCase for UpdateCartItemUseCaseImpl {
    async fn execute(&self, params: UpdateCartItemParams) -> Result<CartItem, CartError> {
        self.logger.info(&format!(
            "Updating cart item {} to quantity {}",
            params.cart_item_id, params.quantity
        ));

        if params.quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }

        let mut scope = self.transactions.begin().await?;
        let outcome = self.update(scope.as_mut(), &params).await;
        complete(scope, outcome, self.logger.as_ref()).await
    }
}
