use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::InventoryError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

impl std::fmt::Display for MovementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementType::In => write!(f, "IN"),
            MovementType::Out => write!(f, "OUT"),
            MovementType::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

impl std::str::FromStr for MovementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(MovementType::In),
            "OUT" => Ok(MovementType::Out),
            "ADJUSTMENT" => Ok(MovementType::Adjustment),
            _ => Err(format!("Invalid movement type: {}", s)),
        }
    }
}

/// One immutable ledger row. `quantity` is the signed change applied to the
/// product's stock: negative for OUT, positive for IN, `target - previous` for
/// ADJUSTMENT.
#[derive(Debug, Clone)]
pub struct StockMovement {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub movement_type: MovementType,
    pub actor_id: Uuid,
    pub reference_id: Option<Uuid>,
    pub notes: String,
    pub movement_date: DateTime<Utc>,
}

impl StockMovement {
    pub fn record(
        product_id: Uuid,
        quantity: i32,
        movement_type: MovementType,
        actor_id: Uuid,
        reference_id: Option<Uuid>,
        notes: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            product_id,
            quantity,
            movement_type,
            actor_id,
            reference_id,
            notes,
            movement_date: Utc::now(),
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        product_id: Uuid,
        quantity: i32,
        movement_type: MovementType,
        actor_id: Uuid,
        reference_id: Option<Uuid>,
        notes: String,
        movement_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_id,
            quantity,
            movement_type,
            actor_id,
            reference_id,
            notes,
            movement_date,
        }
    }
}

/// What a caller asks the ledger to do.
///
/// For IN and OUT `quantity` is the number of units moved. For ADJUSTMENT it is
/// the absolute stock level the product must end up with.
#[derive(Debug, Clone)]
pub struct MovementRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub movement_type: MovementType,
    pub actor_id: Uuid,
    pub reference_id: Option<Uuid>,
    pub notes: Option<String>,
}

impl MovementRequest {
    pub fn validate(&self) -> Result<(), InventoryError> {
        let valid = match self.movement_type {
            MovementType::In | MovementType::Out => self.quantity > 0,
            MovementType::Adjustment => self.quantity >= 0,
        };
        if valid {
            Ok(())
        } else {
            Err(InventoryError::InvalidQuantity)
        }
    }
}

#[derive(Debug, Clone)]
pub struct LedgerEntry {
    pub movement: StockMovement,
    pub stock_after: i32,
}

/// Cached stock next to what the ledger says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockAudit {
    pub product_id: Uuid,
    pub cached_quantity: i32,
    pub net_movement: i64,
}

impl StockAudit {
    /// Stock the product held before its first recorded movement.
    pub fn opening_balance(&self) -> i64 {
        i64::from(self.cached_quantity) - self.net_movement
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(movement_type: MovementType, quantity: i32) -> MovementRequest {
        MovementRequest {
            product_id: Uuid::new_v4(),
            quantity,
            movement_type,
            actor_id: Uuid::new_v4(),
            reference_id: None,
            notes: None,
        }
    }

    #[test]
    fn should_parse_movement_type_round_trip() {
        for t in [MovementType::In, MovementType::Out, MovementType::Adjustment] {
            assert_eq!(t.to_string().parse::<MovementType>().unwrap(), t);
        }
    }

    #[test]
    fn should_reject_unknown_movement_type() {
        assert!("TRANSFER".parse::<MovementType>().is_err());
    }

    #[test]
    fn should_reject_non_positive_out() {
        assert!(matches!(
            request(MovementType::Out, 0).validate(),
            Err(InventoryError::InvalidQuantity)
        ));
    }

    #[test]
    fn should_accept_zero_adjustment_target() {
        assert!(request(MovementType::Adjustment, 0).validate().is_ok());
    }

    #[test]
    fn should_reject_negative_adjustment_target() {
        assert!(request(MovementType::Adjustment, -1).validate().is_err());
    }

    #[test]
    fn should_compute_opening_balance() {
        let audit = StockAudit {
            product_id: Uuid::new_v4(),
            cached_quantity: 10,
            net_movement: 3,
        };
        assert_eq!(audit.opening_balance(), 7);
    }
}
