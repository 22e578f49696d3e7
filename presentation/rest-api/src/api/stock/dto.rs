use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::inventory::model::{LedgerEntry, MovementType, StockAudit, StockMovement};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Enum)]
pub enum MovementTypeDto {
    #[oai(rename = "IN")]
    In,
    #[oai(rename = "OUT")]
    Out,
    #[oai(rename = "ADJUSTMENT")]
    Adjustment,
}

impl From<MovementTypeDto> for MovementType {
    fn from(dto: MovementTypeDto) -> Self {
        match dto {
            MovementTypeDto::In => MovementType::In,
            MovementTypeDto::Out => MovementType::Out,
            MovementTypeDto::Adjustment => MovementType::Adjustment,
        }
    }
}

impl From<MovementType> for MovementTypeDto {
    fn from(movement_type: MovementType) -> Self {
        match movement_type {
            MovementType::In => MovementTypeDto::In,
            MovementType::Out => MovementTypeDto::Out,
            MovementType::Adjustment => MovementTypeDto::Adjustment,
        }
    }
}

/// `quantity` is the number of units for IN/OUT and the target stock level
/// for ADJUSTMENT.
#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct RecordMovementRequest {
    pub product_id: Uuid,
    pub movement_type: MovementTypeDto,
    pub quantity: i32,
    pub reference_id: Option<Uuid>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct StockMovementResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Signed change applied to stock
    pub quantity: i32,
    pub movement_type: MovementTypeDto,
    pub actor_id: Uuid,
    pub reference_id: Option<Uuid>,
    pub notes: String,
    pub movement_date: DateTime<Utc>,
}

impl From<StockMovement> for StockMovementResponse {
    fn from(m: StockMovement) -> Self {
        Self {
            id: m.id,
            product_id: m.product_id,
            quantity: m.quantity,
            movement_type: m.movement_type.into(),
            actor_id: m.actor_id,
            reference_id: m.reference_id,
            notes: m.notes,
            movement_date: m.movement_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct LedgerEntryResponse {
    pub movement: StockMovementResponse,
    pub stock_after: i32,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            movement: entry.movement.into(),
            stock_after: entry.stock_after,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct StockLevelResponse {
    pub product_id: Uuid,
    pub stock_quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct StockAuditResponse {
    pub product_id: Uuid,
    pub cached_quantity: i32,
    pub net_movement: i64,
    pub opening_balance: i64,
}

impl From<StockAudit> for StockAuditResponse {
    fn from(audit: StockAudit) -> Self {
        Self {
            product_id: audit.product_id,
            cached_quantity: audit.cached_quantity,
            net_movement: audit.net_movement,
            opening_balance: audit.opening_balance(),
        }
    }
}
