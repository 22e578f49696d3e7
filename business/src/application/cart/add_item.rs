use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::activity::{CartAction, log_activity};
use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::cart::model::CartItem;
use crate::domain::cart::repository::{CartItemRepository, CartRepository};
use crate::domain::cart::store::{ensure_mutable, load_cart};
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::catalog::repository::ProductRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct AddCartItemUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl AddCartItemUseCaseImpl {
    async fn add(
        &self,
        scope: &mut dyn UnitOfWork,
        params: &AddCartItemParams,
    ) -> Result<CartItem, CartError> {
        let mut cart = load_cart(scope, params.cart_id).await?;
        ensure_mutable(&cart, &self.expiry, Utc::now())?;

        let product = scope
            .find_product(params.product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::ProductNotFound(params.product_id),
                other => CartError::Repository(other),
            })?;
        if !product.is_active {
            return Err(CartError::ProductInactive(product.id));
        }
        // Only the quantity added by this call is checked; stock is reserved at order time.
        if !product.has_stock_for(params.quantity) {
            return Err(CartError::InsufficientStock {
                product_id: product.id,
                requested: params.quantity,
                available: product.stock_quantity,
            });
        }

        let existing = scope
            .find_cart_item_by_product(cart.id, product.id)
            .await?;
        let (item, previous) = match existing {
            Some(mut item) => {
                let previous = item.quantity;
                item.add_quantity(params.quantity)?;
                (item, Some(previous))
            }
            None => (
                CartItem::new(cart.id, product.id, params.quantity, product.price)?,
                None,
            ),
        };
        scope.save_cart_item(&item).await?;

        cart.touch();
        scope.update_cart(&cart).await?;
        log_activity(
            scope,
            &cart,
            Some(product.id),
            CartAction::Add,
            (Some(item.quantity), previous),
            &params.actor,
        )
        .await?;

        Ok(item)
    }
}

#[async_trait]
impl AddCartItemUseCase for AddCartItemUseCaseImpl {
    async fn execute(&self, params: AddCartItemParams) -> Result<CartItem, CartError> {
        self.logger.info(&format!(
            "Adding {} x {} to cart {}",
            params.quantity, params.product_id, params.cart_id
        ));

        if params.quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }

        let mut scope = self.transactions.begin().await?;
        let outcome = self.add(scope.as_mut(), &params).await;
        let item = complete(scope, outcome, self.logger.as_ref()).await?;

        self.logger.info(&format!(
            "Cart item {} now holds {} units",
            item.id, item.quantity
        ));
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::model::Cart;
    use crate::domain::shared::value_objects::Actor;
    use crate::test_support::{
        MockUow, cart_item, committing_uow, coordinator_with, mock_logger, product_with_stock,
        rolling_back_uow,
    };
    use bigdecimal::BigDecimal;
    use uuid::Uuid;

    fn use_case(scope: MockUow) -> AddCartItemUseCaseImpl {
        AddCartItemUseCaseImpl {
            transactions: coordinator_with(vec![scope]),
            expiry: CartExpiryPolicy::default(),
            logger: mock_logger(),
        }
    }

    fn params(cart_id: Uuid, product_id: Uuid, quantity: i32) -> AddCartItemParams {
        AddCartItemParams {
            cart_id,
            product_id,
            quantity,
            actor: Actor::system(),
        }
    }

    #[tokio::test]
    async fn should_add_new_line_at_current_price() {
        let cart = Cart::new(Uuid::new_v4(), None);
        let cart_id = cart.id;
        let product = product_with_stock(100, 5);
        let product_id = product.id;

        let mut uow = committing_uow();
        uow.expect_find_cart().returning(move |_| Ok(cart.clone()));
        uow.expect_find_product()
            .returning(move |_| Ok(product.clone()));
        uow.expect_find_cart_item_by_product()
            .returning(|_, _| Ok(None));
        uow.expect_save_cart_item().times(1).returning(|_| Ok(()));
        uow.expect_update_cart().times(1).returning(|_| Ok(()));
        uow.expect_append_activity()
            .withf(|a| {
                a.action == CartAction::Add && a.quantity == Some(2) && a.previous_quantity.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));

        let item = use_case(uow)
            .execute(params(cart_id, product_id, 2))
            .await
            .unwrap();

        assert_eq!(item.quantity, 2);
        assert_eq!(item.unit_price, BigDecimal::from(100));
    }

    #[tokio::test]
    async fn should_merge_into_existing_line() {
        let cart = Cart::new(Uuid::new_v4(), None);
        let cart_id = cart.id;
        let product = product_with_stock(100, 5);
        let product_id = product.id;
        let existing = cart_item(&cart, product_id, 1, 90);
        let existing_id = existing.id;

        let mut uow = committing_uow();
        uow.expect_find_cart().returning(move |_| Ok(cart.clone()));
        uow.expect_find_product()
            .returning(move |_| Ok(product.clone()));
        uow.expect_find_cart_item_by_product()
            .returning(move |_, _| Ok(Some(existing.clone())));
        uow.expect_save_cart_item()
            .withf(move |i| i.id == existing_id && i.quantity == 3)
            .times(1)
            .returning(|_| Ok(()));
        uow.expect_update_cart().returning(|_| Ok(()));
        uow.expect_append_activity()
            .withf(|a| a.quantity == Some(3) && a.previous_quantity == Some(1))
            .returning(|_| Ok(()));

        let item = use_case(uow)
            .execute(params(cart_id, product_id, 2))
            .await
            .unwrap();

        assert_eq!(item.id, existing_id);
        assert_eq!(item.unit_price, BigDecimal::from(90));
    }

    #[tokio::test]
    async fn should_roll_back_when_stock_short() {
        let cart = Cart::new(Uuid::new_v4(), None);
        let cart_id = cart.id;
        let product = product_with_stock(100, 3);
        let product_id = product.id;

        let mut uow = rolling_back_uow();
        uow.expect_find_cart().returning(move |_| Ok(cart.clone()));
        uow.expect_find_product()
            .returning(move |_| Ok(product.clone()));
        uow.expect_save_cart_item().never();
        uow.expect_append_activity().never();

        let result = use_case(uow).execute(params(cart_id, product_id, 5)).await;

        assert!(matches!(
            result.unwrap_err(),
            CartError::InsufficientStock {
                requested: 5,
                available: 3,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn should_reject_non_positive_quantity_without_transaction() {
        let use_case = AddCartItemUseCaseImpl {
            transactions: coordinator_with(vec![]),
            expiry: CartExpiryPolicy::default(),
            logger: mock_logger(),
        };

        let result = use_case
            .execute(params(Uuid::new_v4(), Uuid::new_v4(), 0))
            .await;

        assert!(matches!(result.unwrap_err(), CartError::InvalidQuantity));
    }
}
