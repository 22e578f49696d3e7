use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::cart::activity::CartActivity;
use business::domain::cart::model::{Cart, CartItem, CartLine, CartView};
use business::domain::cart::use_cases::sweep_expired::SweepReport;

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CreateCartRequest {
    pub customer_id: Uuid,
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct AddCartItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CartResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub session_id: Option<String>,
    /// active, expired or cleared
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            id: cart.id,
            customer_id: cart.customer_id,
            session_id: cart.session_id,
            status: cart.status.to_string(),
            created_at: cart.created_at,
            updated_at: cart.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CartItemResponse {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    /// Price when the line was added, as a decimal string
    pub unit_price: String,
    pub added_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            id: item.id,
            cart_id: item.cart_id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            added_at: item.added_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CartLineResponse {
    pub item: CartItemResponse,
    pub model_name: String,
    pub current_unit_price: String,
    pub line_total: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        Self {
            item: line.item.into(),
            model_name: line.model_name,
            current_unit_price: line.current_unit_price.to_string(),
            line_total: line.line_total.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CartViewResponse {
    pub cart: CartResponse,
    pub items: Vec<CartLineResponse>,
    pub total_amount: String,
    pub total_items: i64,
}

impl From<CartView> for CartViewResponse {
    fn from(view: CartView) -> Self {
        Self {
            cart: view.cart.into(),
            items: view.lines.into_iter().map(Into::into).collect(),
            total_amount: view.total_amount.to_string(),
            total_items: view.total_items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CartActivityResponse {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Option<Uuid>,
    /// CREATE, ADD, UPDATE, REMOVE or EXPIRE
    pub action: String,
    pub quantity: Option<i32>,
    pub previous_quantity: Option<i32>,
    pub actor_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CartActivity> for CartActivityResponse {
    fn from(a: CartActivity) -> Self {
        Self {
            id: a.id,
            cart_id: a.cart_id,
            customer_id: a.customer_id,
            product_id: a.product_id,
            action: a.action.to_string(),
            quantity: a.quantity,
            previous_quantity: a.previous_quantity,
            actor_id: a.actor_id,
            ip_address: a.ip_address,
            notes: a.notes,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ClearCartResponse {
    pub removed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct SweepReportResponse {
    pub examined: u64,
    pub expired: u64,
    pub failed: u64,
}

impl From<SweepReport> for SweepReportResponse {
    fn from(report: SweepReport) -> Self {
        Self {
            examined: report.examined as u64,
            expired: report.expired as u64,
            failed: report.failed as u64,
        }
    }
}
