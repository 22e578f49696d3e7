use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::inventory::errors::InventoryError;
use crate::domain::inventory::ledger::current_stock;
use crate::domain::inventory::model::StockMovement;
use crate::domain::inventory::repository::StockMovementRepository;
use crate::domain::inventory::use_cases::get_movements::{GetMovementsParams, GetMovementsUseCase};
use crate::domain::logger::Logger;
use crate::domain::transaction::{TransactionCoordinator, UnitOfWork, complete};

pub struct GetMovementsUseCaseImpl {
    pub transactions: Arc<dyn TransactionCoordinator>,
    pub logger: Arc<dyn Logger>,
}

async fn read(
    scope: &mut dyn UnitOfWork,
    params: &GetMovementsParams,
) -> Result<Vec<StockMovement>, InventoryError> {
    // Unknown products are NotFound rather than an empty history.
    current_stock(scope, params.product_id).await?;
    let mut movements = scope.movements_for_product(params.product_id).await?;
    if let Some(movement_type) = params.movement_type {
        movements.retain(|m| m.movement_type == movement_type);
    }
    Ok(movements)
}

#[async_trait]
impl GetMovementsUseCase for GetMovementsUseCaseImpl {
    async fn execute(
        &self,
        params: GetMovementsParams,
    ) -> Result<Vec<StockMovement>, InventoryError> {
        self.logger.info(&format!(
            "Fetching movements for product: {}",
            params.product_id
        ));

        let mut scope = self.transactions.begin().await?;
        let outcome = read(scope.as_mut(), &params).await;
        complete(scope, outcome, self.logger.as_ref()).await
    }
}
