use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cart::activity::CartActivity;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::repository::CartActivityRepository;
use crate::domain::cart::store::load_cart;
use crate::domain::cart::use_cases::get_activity::{GetCartActivityParams, GetCartActivityUseCase};
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct GetCartActivityUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

async fn read(
    scope: &mut dyn UnitOfWork,
    params: &GetCartActivityParams,
) -> Result<Vec<CartActivity>, CartError> {
    let cart = load_cart(scope, params.cart_id).await?;
    Ok(scope.activity_for_cart(cart.id).await?)
}

#[async_trait]
impl GetCartActivityUseCase for GetCartActivityUseCaseImpl {
    async fn execute(
        &self,
        params: GetCartActivityParams,
    ) -> Result<Vec<CartActivity>, CartError> {
        self.logger
            .info(&format!("Fetching activity for cart: {}", params.cart_id));

        let mut scope = self.transactions.begin().await?;
        let outcome = read(scope.as_mut(), &params).await;
        complete(scope, outcome, self.logger.as_ref()).await
    }
}
