use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::lifecycle::{CartExpiryPolicy, CartStatus};
use crate::domain::cart::repository::CartRepository;
use crate::domain::cart::store::{expire_if_idle, load_cart};
use crate::domain::cart::use_cases::sweep_expired::{SweepExpiredCartsUseCase, SweepReport};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::Actor;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

/// Expires every idle active cart, one transaction per cart.
pub struct SweepExpiredCartsUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub expiry: CartExpiryPolicy,
    pub logger: Arc<dyn Logger>,
}

impl SweepExpiredCartsUseCaseImpl {
    async fn expire_one(
        &self,
        scope: &mut dyn UnitOfWork,
        cart_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, CartError> {
        // Re-read: the cart may have been touched since the listing.
        let cart = load_cart(scope, cart_id).await?;
        let before = cart.status;
        let cart = expire_if_idle(scope, cart, &self.expiry, now, &Actor::system()).await?;
        Ok(before == CartStatus::Active && cart.status == CartStatus::Expired)
    }
}

#[async_trait]
impl SweepExpiredCartsUseCase for SweepExpiredCartsUseCaseImpl {
    async fn execute(&self) -> Result<SweepReport, CartError> {
        let now = Utc::now();

        let mut scope = self.transactions.begin().await?;
        let listing = scope.active_carts().await.map_err(CartError::from);
        let carts = complete(scope, listing, self.logger.as_ref()).await?;

        let mut report = SweepReport::default();
        for cart in carts
            .iter()
            .filter(|c| self.expiry.is_idle(c.updated_at, now))
        {
            report.examined += 1;
            let result = match self.transactions.begin().await {
                Ok(mut scope) => {
                    let outcome = self.expire_one(scope.as_mut(), cart.id, now).await;
                    complete(scope, outcome, self.logger.as_ref()).await
                }
                Err(e) => Err(CartError::from(e)),
            };
            match result {
                Ok(true) => report.expired += 1,
                Ok(false) => {}
                Err(e) => {
                    report.failed += 1;
                    self.logger
                        .error(&format!("Failed to expire cart {}: {}", cart.id, e));
                }
            }
        }

        self.logger.info(&format!(
            "Cart sweep done: examined={}, expired={}, failed={}",
            report.examined, report.expired, report.failed
        ));
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::RepositoryError;
    use crate::test_support::{
        MockUow, committing_uow, coordinator_with, idle_cart, mock_logger, rolling_back_uow,
    };
    use chrono::Duration;

    fn expiring_scope(cart: crate::domain::cart::model::Cart) -> MockUow {
        let mut uow = committing_uow();
        uow.expect_find_cart().returning(move |_| Ok(cart.clone()));
        uow.expect_cart_items().returning(|_| Ok(vec![]));
        uow.expect_update_cart().times(1).returning(|_| Ok(()));
        uow.expect_append_activity().returning(|_| Ok(()));
        uow
    }

    #[tokio::test]
    async fn should_expire_idle_carts_and_skip_recent_ones() {
        let stale = idle_cart(Duration::hours(30));
        let fresh = idle_cart(Duration::hours(2));
        let listed = vec![stale.clone(), fresh];

        let mut listing = committing_uow();
        listing
            .expect_active_carts()
            .returning(move || Ok(listed.clone()));

        let use_case = SweepExpiredCartsUseCaseImpl {
            transactions: coordinator_with(vec![listing, expiring_scope(stale)]),
            expiry: CartExpiryPolicy::default(),
            logger: mock_logger(),
        };

        let report = use_case.execute().await.unwrap();

        assert_eq!(
            report,
            SweepReport {
                examined: 1,
                expired: 1,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn should_not_count_cart_expired_by_someone_else() {
        let stale = idle_cart(Duration::hours(30));
        let listed = vec![stale.clone()];
        let mut already_expired = stale;
        already_expired.status = CartStatus::Expired;

        let mut listing = committing_uow();
        listing
            .expect_active_carts()
            .returning(move || Ok(listed.clone()));
        let mut rereading = committing_uow();
        rereading
            .expect_find_cart()
            .returning(move |_| Ok(already_expired.clone()));
        rereading.expect_update_cart().never();
        rereading.expect_append_activity().never();

        let use_case = SweepExpiredCartsUseCaseImpl {
            transactions: coordinator_with(vec![listing, rereading]),
            expiry: CartExpiryPolicy::default(),
            logger: mock_logger(),
        };

        let report = use_case.execute().await.unwrap();

        assert_eq!(
            report,
            SweepReport {
                examined: 1,
                expired: 0,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn should_continue_after_one_cart_fails() {
        let broken = idle_cart(Duration::hours(30));
        let stale = idle_cart(Duration::hours(40));
        let listed = vec![broken, stale.clone()];

        let mut listing = committing_uow();
        listing
            .expect_active_carts()
            .returning(move || Ok(listed.clone()));
        let mut failing = rolling_back_uow();
        failing
            .expect_find_cart()
            .returning(|_| Err(RepositoryError::DatabaseError));

        let use_case = SweepExpiredCartsUseCaseImpl {
            transactions: coordinator_with(vec![listing, failing, expiring_scope(stale)]),
            expiry: CartExpiryPolicy::default(),
            logger: mock_logger(),
        };

        let report = use_case.execute().await.unwrap();

        assert_eq!(report.examined, 2);
        assert_eq!(report.expired, 1);
        assert_eq!(report.failed, 1);
    }
}
