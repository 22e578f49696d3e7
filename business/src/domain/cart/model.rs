use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use uuid::Uuid;

use super::errors::CartError;
use super::lifecycle::CartStatus;

#[derive(Debug, Clone)]
pub struct Cart {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub session_id: Option<String>,
    pub notes: Option<String>,
    pub status: CartStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(customer_id: Uuid, session_id: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            session_id: session_id.filter(|s| !s.trim().is_empty()),
            notes: None,
            status: CartStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        customer_id: Uuid,
        session_id: Option<String>,
        notes: Option<String>,
        status: CartStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            customer_id,
            session_id,
            notes,
            status,
            created_at,
            updated_at,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CartStatus::Active
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[derive(Debug, Clone)]
pub struct CartItem {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Product price when the line was first added. Orders re-read the price.
    pub unit_price: BigDecimal,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CartItem {
    pub fn new(
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
    ) -> Result<Self, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            cart_id,
            product_id,
            quantity,
            unit_price,
            added_at: now,
            updated_at: now,
        })
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        cart_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
        added_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            cart_id,
            product_id,
            quantity,
            unit_price,
            added_at,
            updated_at,
        }
    }

    pub fn set_quantity(&mut self, quantity: i32) -> Result<(), CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity);
        }
        self.quantity = quantity;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn add_quantity(&mut self, quantity: i32) -> Result<(), CartError> {
        let merged = self
            .quantity
            .checked_add(quantity)
            .ok_or(CartError::InvalidQuantity)?;
        self.set_quantity(merged)
    }
}

/// A cart line priced at the product's current price.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub item: CartItem,
    pub model_name: String,
    pub current_unit_price: BigDecimal,
    pub line_total: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct CartView {
    pub cart: Cart,
    pub lines: Vec<CartLine>,
    pub total_amount: BigDecimal,
    pub total_items: i64,
}

impl CartView {
    pub fn new(cart: Cart, lines: Vec<CartLine>) -> Self {
        let total_amount = lines
            .iter()
            .fold(BigDecimal::zero(), |acc, line| acc + &line.line_total);
        let total_items = lines.iter().map(|l| i64::from(l.item.quantity)).sum();
        Self {
            cart,
            lines,
            total_amount,
            total_items,
        }
    }
}
