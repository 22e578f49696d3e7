use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::inventory::model::{MovementType, StockMovement};

use crate::error::corrupt;

#[derive(Debug, FromRow)]
pub struct StockMovementEntity {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub movement_type: String,
    pub actor_id: Uuid,
    pub reference_id: Option<Uuid>,
    pub notes: String,
    pub movement_date: DateTime<Utc>,
}

impl StockMovementEntity {
    pub fn into_domain(self) -> Result<StockMovement, RepositoryError> {
        let movement_type = self
            .movement_type
            .parse::<MovementType>()
            .map_err(|_| corrupt("stock_movements.movement_type", &self.movement_type))?;

        Ok(StockMovement::from_repository(
            self.id,
            self.product_id,
            self.quantity,
            movement_type,
            self.actor_id,
            self.reference_id,
            self.notes,
            self.movement_date,
        ))
    }
}
