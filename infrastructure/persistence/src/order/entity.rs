use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::order::model::{Order, OrderItem, OrderStatus};
use business::domain::order::value_objects::ShippingAddress;

use crate::error::corrupt;

#[derive(Debug, FromRow)]
pub struct OrderEntity {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_number: String,
    pub status: String,
    pub total_amount: BigDecimal,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_state: String,
    pub shipping_postal_code: String,
    pub notes: Option<String>,
    pub processed_by: Option<Uuid>,
    pub order_date: DateTime<Utc>,
    pub processed_date: Option<DateTime<Utc>>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderEntity {
    pub fn into_domain(self, items: Vec<OrderItem>) -> Result<Order, RepositoryError> {
        let status = self
            .status
            .parse::<OrderStatus>()
            .map_err(|_| corrupt("orders.status", &self.status))?;

        Ok(Order {
            id: self.id,
            customer_id: self.customer_id,
            order_number: self.order_number,
            status,
            total_amount: self.total_amount,
            shipping: ShippingAddress {
                address: self.shipping_address,
                city: self.shipping_city,
                state: self.shipping_state,
                postal_code: self.shipping_postal_code,
            },
            notes: self.notes,
            processed_by: self.processed_by,
            order_date: self.order_date,
            processed_date: self.processed_date,
            shipped_date: self.shipped_date,
            delivered_date: self.delivered_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
            items,
        })
    }
}

#[derive(Debug, FromRow)]
pub struct OrderItemEntity {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
    pub notes: Option<String>,
}

impl OrderItemEntity {
    pub fn into_domain(self) -> OrderItem {
        OrderItem::from_repository(
            self.id,
            self.order_id,
            self.product_id,
            self.quantity,
            self.unit_price,
            self.subtotal,
            self.notes,
        )
    }
}
