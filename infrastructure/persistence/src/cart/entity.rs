use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::cart::activity::{CartAction, CartActivity};
use business::domain::cart::lifecycle::CartStatus;
use business::domain::cart::model::{Cart, CartItem};
use business::domain::errors::RepositoryError;

use crate::error::corrupt;

#[derive(Debug, FromRow)]
pub struct CartEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub session_id: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartEntity {
    pub fn into_domain(self) -> Result<Cart, RepositoryError> {
        let status = self
            .status
            .parse::<CartStatus>()
            .map_err(|_| corrupt("carts.status", &self.status))?;

        Ok(Cart::from_repository(
            self.id,
            self.customer_id,
            self.session_id,
            self.notes,
            status,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[derive(Debug, FromRow)]
pub struct CartItemEntity {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItemEntity {
    pub fn into_domain(self) -> CartItem {
        CartItem::from_repository(
            self.id,
            self.cart_id,
            self.product_id,
            self.quantity,
            self.unit_price,
            self.added_at,
            self.updated_at,
        )
    }
}

#[derive(Debug, FromRow)]
pub struct CartActivityEntity {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Option<Uuid>,
    pub action: String,
    pub quantity: Option<i32>,
    pub previous_quantity: Option<i32>,
    pub actor_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CartActivityEntity {
    pub fn into_domain(self) -> Result<CartActivity, RepositoryError> {
        let action = self
            .action
            .parse::<CartAction>()
            .map_err(|_| corrupt("cart_activity_logs.action", &self.action))?;

        Ok(CartActivity::from_repository(
            self.id,
            self.cart_id,
            self.customer_id,
            self.product_id,
            action,
            self.quantity,
            self.previous_quantity,
            self.actor_id,
            self.ip_address,
            self.notes,
            self.created_at,
        ))
    }
}
