use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::CartExpiryPolicy;
use crate::domain::cart::model::CartView;
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::store::build_view;
use crate::domain::cart::use_cases::list_active::ListActiveCartsUseCase;
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

/// Live carts for the back office. Idle carts are left out but not expired
/// here; that is the sweep's job.
pub struct ListActiveCartsUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl ListActiveCartsUseCaseImpl {
    async fn read(&self, scope: &mut dyn UnitOfWork) -> Result<Vec<CartView>, CartError> {
        let now = Utc::now();
        let carts = scope.active_carts().await?;
        let mut views = Vec::with_capacity(carts.len());
        for cart in carts
            .into_iter()
            .filter(|c| !self.expiry.is_idle(c.updated_at, now))
        {
            views.push(build_view(scope, cart).await?);
        }
        Ok(views)
    }
}

#[async_trait]
impl ListActiveCartsUseCase for ListActiveCartsUseCaseImpl {
    async fn execute(&self) -> Result<Vec<CartView>, CartError> {
        self.logger.info("Listing active carts");

        let mut scope = self.transactions.begin().await?;
        let outcome = self.read(scope.as_mut()).await;
        complete(scope, outcome, self.logger.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        cart_item, committing_uow, coordinator_with, idle_cart, mock_logger, product_with_stock,
    };
    use chrono::Duration;

    #[tokio::test]
    async fn should_list_live_carts_with_totals_and_leave_idle_ones_alone() {
        let fresh = idle_cart(Duration::minutes(30));
        let stale = idle_cart(Duration::hours(30));
        let fresh_id = fresh.id;
        let product = product_with_stock(100, 9);
        let line = cart_item(&fresh, product.id, 2, 100);
        let listed = vec![stale, fresh];

        let mut uow = committing_uow();
        uow.expect_active_carts()
            .returning(move || Ok(listed.clone()));
        uow.expect_cart_items()
            .withf(move |id| *id == fresh_id)
            .times(1)
            .returning(move |_| Ok(vec![line.clone()]));
        uow.expect_find_product()
            .returning(move |_| Ok(product.clone()));
        uow.expect_update_cart().never();
        uow.expect_append_activity().never();

        let use_case = ListActiveCartsUseCaseImpl {
            transactions: coordinator_with(vec![uow]),
            expiry: CartExpiryPolicy::default(),
            logger: mock_logger(),
        };

        let views = use_case.execute().await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].cart.id, fresh_id);
        assert_eq!(views[0].total_items, 2);
        assert_eq!(views[0].total_amount, bigdecimal::BigDecimal::from(200));
    }
}
