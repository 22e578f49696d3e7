use chrono::{DateTime, Utc};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use business::domain::order::assembler::{OrderDraft, OrderLineRequest};
use business::domain::order::model::{Order, OrderItem, OrderStatus};
use business::domain::order::query::OrderPage;
use business::domain::order::value_objects::ShippingAddress;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Enum)]
pub enum OrderStatusDto {
    #[oai(rename = "pending")]
    Pending,
    #[oai(rename = "processing")]
    Processing,
    #[oai(rename = "payment_confirmed")]
    PaymentConfirmed,
    #[oai(rename = "payment_failed")]
    PaymentFailed,
    #[oai(rename = "shipped")]
    Shipped,
    #[oai(rename = "delivered")]
    Delivered,
    #[oai(rename = "cancelled")]
    Cancelled,
    #[oai(rename = "returned")]
    Returned,
}

impl From<OrderStatus> for OrderStatusDto {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => OrderStatusDto::Pending,
            OrderStatus::Processing => OrderStatusDto::Processing,
            OrderStatus::PaymentConfirmed => OrderStatusDto::PaymentConfirmed,
            OrderStatus::PaymentFailed => OrderStatusDto::PaymentFailed,
            OrderStatus::Shipped => OrderStatusDto::Shipped,
            OrderStatus::Delivered => OrderStatusDto::Delivered,
            OrderStatus::Cancelled => OrderStatusDto::Cancelled,
            OrderStatus::Returned => OrderStatusDto::Returned,
        }
    }
}

impl From<OrderStatusDto> for OrderStatus {
    fn from(dto: OrderStatusDto) -> Self {
        match dto {
            OrderStatusDto::Pending => OrderStatus::Pending,
            OrderStatusDto::Processing => OrderStatus::Processing,
            OrderStatusDto::PaymentConfirmed => OrderStatus::PaymentConfirmed,
            OrderStatusDto::PaymentFailed => OrderStatus::PaymentFailed,
            OrderStatusDto::Shipped => OrderStatus::Shipped,
            OrderStatusDto::Delivered => OrderStatus::Delivered,
            OrderStatusDto::Cancelled => OrderStatus::Cancelled,
            OrderStatusDto::Returned => OrderStatus::Returned,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct ShippingAddressDto {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl From<ShippingAddressDto> for ShippingAddress {
    fn from(dto: ShippingAddressDto) -> Self {
        Self {
            address: dto.address,
            city: dto.city,
            state: dto.state,
            postal_code: dto.postal_code,
        }
    }
}

impl From<ShippingAddress> for ShippingAddressDto {
    fn from(shipping: ShippingAddress) -> Self {
        Self {
            address: shipping.address,
            city: shipping.city,
            state: shipping.state,
            postal_code: shipping.postal_code,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct OrderLineDto {
    pub product_id: Uuid,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    pub items: Vec<OrderLineDto>,
    pub shipping: ShippingAddressDto,
    pub notes: Option<String>,
}

impl From<CreateOrderRequest> for OrderDraft {
    fn from(request: CreateOrderRequest) -> Self {
        Self {
            customer_id: request.customer_id,
            lines: request
                .items
                .into_iter()
                .map(|line| OrderLineRequest {
                    product_id: line.product_id,
                    quantity: line.quantity,
                    notes: line.notes,
                })
                .collect(),
            shipping: request.shipping.into(),
            notes: request.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct CreateOrderFromCartRequest {
    pub cart_id: Uuid,
    pub shipping: ShippingAddressDto,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatusDto,
    pub processed_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct OrderItemResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: String,
    pub subtotal: String,
    pub notes: Option<String>,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            id: item.id,
            product_id: item.product_id,
            quantity: item.quantity,
            unit_price: item.unit_price.to_string(),
            subtotal: item.subtotal.to_string(),
            notes: item.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct OrderResponse {
    pub id: Uuid,
    pub order_number: String,
    pub customer_id: Uuid,
    pub status: OrderStatusDto,
    pub total_amount: String,
    pub shipping: ShippingAddressDto,
    pub notes: Option<String>,
    pub processed_by: Option<Uuid>,
    pub order_date: DateTime<Utc>,
    pub processed_date: Option<DateTime<Utc>>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    pub items: Vec<OrderItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            customer_id: order.customer_id,
            status: order.status.into(),
            total_amount: order.total_amount.to_string(),
            shipping: order.shipping.into(),
            notes: order.notes,
            processed_by: order.processed_by,
            order_date: order.order_date,
            processed_date: order.processed_date,
            shipped_date: order.shipped_date,
            delivered_date: order.delivered_date,
            items: order.items.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Object)]
pub struct OrderPageResponse {
    pub orders: Vec<OrderResponse>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl From<OrderPage> for OrderPageResponse {
    fn from(page: OrderPage) -> Self {
        Self {
            orders: page.orders.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }
}
