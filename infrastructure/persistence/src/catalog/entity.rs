use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::catalog::model::Product;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub model_name: String,
    pub price: BigDecimal,
    pub cost_price: BigDecimal,
    pub stock_quantity: i32,
    pub is_active: bool,
    pub updated_at: DateTime<Utc>,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(
            self.id,
            self.model_name,
            self.price,
            self.cost_price,
            self.stock_quantity,
            self.is_active,
            self.updated_at,
        )
    }
}
