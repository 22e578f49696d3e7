use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::{CartExpiryPolicy, CartStatus};
use crate::domain::cart::model::CartView;
use crate::domain::cart::store::{build_view, expire_if_idle, load_cart};
use crate::domain::cart::use_cases::get_by_id::{GetCartByIdParams, GetCartByIdUseCase};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::Actor;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct GetCartByIdUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl GetCartByIdUseCaseImpl {
    /// `None` when the cart is (or just became) expired.
    async fn read(
        &self,
        scope: &mut dyn UnitOfWork,
        cart_id: Uuid,
    ) -> Result<Option<CartView>, CartError> {
        let cart = load_cart(scope, cart_id).await?;
        let was_active = cart.is_active();
        let cart = expire_if_idle(scope, cart, &self.expiry, Utc::now(), &Actor::system()).await?;

        if cart.status == CartStatus::Expired {
            if was_active {
                self.logger
                    .warn(&format!("Cart {} expired on read", cart.id));
            }
            return Ok(None);
        }
        Ok(Some(build_view(scope, cart).await?))
    }
}

#[async_trait]
impl GetCartByIdUseCase for GetCartByIdUseCaseImpl {
    async fn execute(&self, params: GetCartByIdParams) -> Result<CartView, CartError> {
        self.logger
            .info(&format!("Fetching cart by id: {}", params.cart_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = self.read(scope.as_mut(), params.cart_id).await;
        let view = complete(scope, outcome, self.logger.as_ref()).await?;

        view.ok_or(CartError::CartNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cart::activity::CartAction;
    use crate::test_support::{
        MockUow, cart_item, committing_uow, coordinator_with, idle_cart, mock_logger,
        product_with_stock, rolling_back_uow,
    };
    use bigdecimal::BigDecimal;
    use chrono::Duration;

    fn use_case(scope: MockUow) -> GetCartByIdUseCaseImpl {
        GetCartByIdUseCaseImpl {
            transactions: coordinator_with(vec![scope]),
            expiry: CartExpiryPolicy::default(),
            logger: mock_logger(),
        }
    }

    #[tokio::test]
    async fn should_return_view_with_totals() {
        let product = product_with_stock(100, 10);
        let cart = idle_cart(Duration::hours(1));
        let cart_id = cart.id;
        let item = cart_item(&cart, product.id, 3, 100);

        let mut uow = committing_uow();
        uow.expect_find_cart().returning(move |_| Ok(cart.clone()));
        uow.expect_cart_items()
            .returning(move |_| Ok(vec![item.clone()]));
        uow.expect_find_product()
            .returning(move |_| Ok(product.clone()));

        let view = use_case(uow)
            .execute(GetCartByIdParams { cart_id })
            .await
            .unwrap();

        assert_eq!(view.total_items, 3);
        assert_eq!(view.total_amount, BigDecimal::from(300));
    }

    #[tokio::test]
    async fn should_commit_expiry_and_report_not_found() {
        let cart = idle_cart(Duration::hours(25));
        let cart_id = cart.id;
        let item = cart_item(&cart, uuid::Uuid::new_v4(), 1, 10);

        let mut uow = committing_uow();
        uow.expect_find_cart().returning(move |_| Ok(cart.clone()));
        uow.expect_cart_items()
            .returning(move |_| Ok(vec![item.clone()]));
        uow.expect_delete_cart_item().times(1).returning(|_| Ok(()));
        uow.expect_append_activity()
            .withf(|a| a.action == CartAction::Expire)
            .returning(|_| Ok(()));
        uow.expect_update_cart()
            .withf(|c| c.status == CartStatus::Expired)
            .times(1)
            .returning(|_| Ok(()));

        let result = use_case(uow).execute(GetCartByIdParams { cart_id }).await;

        assert!(matches!(result.unwrap_err(), CartError::CartNotFound));
    }

    #[tokio::test]
    async fn should_map_missing_cart_to_not_found() {
        let mut uow = rolling_back_uow();
        uow.expect_find_cart()
            .returning(|_| Err(crate::domain::errors::RepositoryError::NotFound));

        let result = use_case(uow)
            .execute(GetCartByIdParams {
                cart_id: uuid::Uuid::new_v4(),
            })
            .await;

        assert!(matches!(result.unwrap_err(), CartError::CartNotFound));
    }
}
