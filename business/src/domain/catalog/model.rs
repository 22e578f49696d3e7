use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A sellable catalog entry (a cycle model) with its cached stock level.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub model_name: String,
    pub price: BigDecimal,
    pub cost_price: BigDecimal,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        model_name: String,
        price: BigDecimal,
        cost_price: BigDecimal,
        stock_quantity: i32,
        is_active: bool,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            model_name,
            price,
            cost_price,
            stock_quantity,
            is_active,
            updated_at,
        }
    }

    pub fn has_stock_for(&self, quantity: i32) -> bool {
        self.stock_quantity >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32) -> Product {
        Product::from_repository(
            Uuid::new_v4(),
            "Trail 29".to_string(),
            BigDecimal::from(100),
            BigDecimal::from(60),
            stock,
            true,
            Utc::now(),
        )
    }

    #[test]
    fn should_have_stock_when_quantity_equals_stock() {
        assert!(product(3).has_stock_for(3));
    }

    #[test]
    fn should_not_have_stock_when_quantity_exceeds_stock() {
        assert!(!product(3).has_stock_for(5));
    }
}
