use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::OrderError;
use super::value_objects::ShippingAddress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    PaymentConfirmed,
    PaymentFailed,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    /// Forward-only transition table.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Processing | PaymentConfirmed | PaymentFailed | Cancelled)
                | (Processing, PaymentConfirmed | PaymentFailed | Shipped | Cancelled)
                | (PaymentConfirmed, Shipped | Cancelled)
                | (PaymentFailed, PaymentConfirmed | Cancelled)
                | (Shipped, Delivered)
                | (Delivered, Returned)
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::PaymentConfirmed => write!(f, "payment_confirmed"),
            OrderStatus::PaymentFailed => write!(f, "payment_failed"),
            OrderStatus::Shipped => write!(f, "shipped"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
            OrderStatus::Returned => write!(f, "returned"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "processing" => Ok(OrderStatus::Processing),
            "payment_confirmed" => Ok(OrderStatus::PaymentConfirmed),
            "payment_failed" => Ok(OrderStatus::PaymentFailed),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "returned" => Ok(OrderStatus::Returned),
            _ => Err(format!("Invalid order status: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
    pub notes: Option<String>,
}

impl OrderItem {
    pub fn new(
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
        notes: Option<String>,
    ) -> Self {
        let subtotal = &unit_price * BigDecimal::from(quantity);
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id,
            quantity,
            unit_price,
            subtotal,
            notes,
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        order_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: BigDecimal,
        subtotal: BigDecimal,
        notes: Option<String>,
    ) -> Self {
        Self {
            id,
            order_id,
            product_id,
            quantity,
            unit_price,
            subtotal,
            notes,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub order_number: String,
    pub status: OrderStatus,
    pub total_amount: BigDecimal,
    pub shipping: ShippingAddress,
    pub notes: Option<String>,
    pub processed_by: Option<Uuid>,
    pub order_date: DateTime<Utc>,
    pub processed_date: Option<DateTime<Utc>>,
    pub shipped_date: Option<DateTime<Utc>>,
    pub delivered_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}

/// A priced line ready to become an `OrderItem`.
pub struct PricedLine {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub notes: Option<String>,
}

pub struct NewOrderProps {
    pub customer_id: Uuid,
    pub order_number: String,
    pub shipping: ShippingAddress,
    pub notes: Option<String>,
    pub lines: Vec<PricedLine>,
    pub now: DateTime<Utc>,
}

impl Order {
    /// Builds a Pending order whose total is the sum of its line subtotals.
    pub fn new(props: NewOrderProps) -> Self {
        let id = Uuid::new_v4();
        let items: Vec<OrderItem> = props
            .lines
            .into_iter()
            .map(|line| {
                OrderItem::new(id, line.product_id, line.quantity, line.unit_price, line.notes)
            })
            .collect();
        let total_amount = items
            .iter()
            .fold(BigDecimal::zero(), |acc, item| acc + &item.subtotal);

        Self {
            id,
            customer_id: props.customer_id,
            order_number: props.order_number,
            status: OrderStatus::Pending,
            total_amount,
            shipping: props.shipping,
            notes: props.notes,
            processed_by: None,
            order_date: props.now,
            processed_date: None,
            shipped_date: None,
            delivered_date: None,
            created_at: props.now,
            updated_at: props.now,
            items,
        }
    }

    /// Moves the order forward. Returns `false` when `next` equals the current
    /// status, in which case nothing changes.
    pub fn apply_status(
        &mut self,
        next: OrderStatus,
        processed_by: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> Result<bool, OrderError> {
        if self.status == next {
            return Ok(false);
        }
        if !self.status.can_transition_to(next) {
            return Err(OrderError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }

        self.status = next;
        match next {
            OrderStatus::Processing => self.processed_date = Some(now),
            OrderStatus::Shipped => self.shipped_date = Some(now),
            OrderStatus::Delivered => self.delivered_date = Some(now),
            _ => {}
        }
        if processed_by.is_some() {
            self.processed_by = processed_by;
        }
        self.updated_at = now;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order::new(NewOrderProps {
            customer_id: Uuid::new_v4(),
            order_number: "ORD-20260101-00000001".to_string(),
            shipping: ShippingAddress {
                address: "1 Main".to_string(),
                city: "Pune".to_string(),
                state: "MH".to_string(),
                postal_code: "411001".to_string(),
            },
            notes: None,
            lines: vec![
                PricedLine {
                    product_id: Uuid::new_v4(),
                    quantity: 2,
                    unit_price: BigDecimal::from(100),
                    notes: None,
                },
                PricedLine {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                    unit_price: BigDecimal::from(50),
                    notes: None,
                },
            ],
            now: Utc::now(),
        })
    }

    #[test]
    fn should_total_line_subtotals() {
        let order = order();
        assert_eq!(order.total_amount, BigDecimal::from(250));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items.iter().all(|i| i.order_id == order.id));
    }

    #[test]
    fn should_stamp_shipped_date() {
        let mut order = order();
        let now = Utc::now();
        order
            .apply_status(OrderStatus::PaymentConfirmed, None, now)
            .unwrap();
        order.apply_status(OrderStatus::Shipped, None, now).unwrap();
        assert_eq!(order.shipped_date, Some(now));
    }

    #[test]
    fn should_treat_same_status_as_no_op() {
        let mut order = order();
        let before = order.updated_at;
        let changed = order
            .apply_status(OrderStatus::Pending, Some(Uuid::new_v4()), Utc::now())
            .unwrap();
        assert!(!changed);
        assert_eq!(order.updated_at, before);
        assert!(order.processed_by.is_none());
    }

    #[test]
    fn should_reject_backward_transition() {
        let mut order = order();
        order
            .apply_status(OrderStatus::Cancelled, None, Utc::now())
            .unwrap();
        let result = order.apply_status(OrderStatus::Pending, None, Utc::now());
        assert!(matches!(
            result.unwrap_err(),
            OrderError::InvalidStatusTransition {
                from: OrderStatus::Cancelled,
                to: OrderStatus::Pending
            }
        ));
    }

    #[test]
    fn should_allow_payment_retry_after_failure() {
        assert!(OrderStatus::PaymentFailed.can_transition_to(OrderStatus::PaymentConfirmed));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Returned.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn should_parse_status_names() {
        assert_eq!(
            "payment_failed".parse::<OrderStatus>().unwrap(),
            OrderStatus::PaymentFailed
        );
        assert!("lost".parse::<OrderStatus>().is_err());
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        const ALL: [OrderStatus; 8] = [
            OrderStatus::Pending,
            OrderStatus::Processing,
            OrderStatus::PaymentConfirmed,
            OrderStatus::PaymentFailed,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
            OrderStatus::Returned,
        ];

        fn status() -> impl Strategy<Value = OrderStatus> {
            prop::sample::select(ALL.to_vec())
        }

        proptest! {
            #[test]
            fn should_never_return_to_pending(from in status()) {
                prop_assert!(!from.can_transition_to(OrderStatus::Pending));
            }

            #[test]
            fn should_keep_terminal_states_closed(to in status()) {
                prop_assert!(!OrderStatus::Cancelled.can_transition_to(to));
                prop_assert!(!OrderStatus::Returned.can_transition_to(to));
            }
        }
    }
}
