use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::cart::activity::CartAction;
use crate::domain::cart::lifecycle::{CartEvent, CartExpiryPolicy, next_status};
use crate::domain::cart::repository::{CartActivityRepository, CartItemRepository, CartRepository};
use crate::domain::cart::store::{clear_items, ensure_mutable, load_cart};
use crate::domain::catalog::repository::{CustomerRepository, ProductRepository};
use crate::domain::errors::RepositoryError;
use crate::domain::inventory::ledger::record_movement;
use crate::domain::inventory::model::{MovementRequest, MovementType};
use crate::domain::inventory::repository::StockMovementRepository;
use crate::domain::shared::value_objects::Actor;

use super::errors::OrderError;
use super::model::{NewOrderProps, Order, PricedLine};
use super::number::next_order_number;
use super::repository::OrderRepository;
use super::value_objects::{ShippingAddress, clean_notes};

/// Everything an order touches. Blanket-implemented so any unit of work
/// qualifies.
pub trait OrderStore:
    CustomerRepository
    + ProductRepository
    + StockMovementRepository
    + OrderRepository
    + CartRepository
    + CartItemRepository
    + CartActivityRepository
{
}

impl<T> OrderStore for T where
    T: CustomerRepository
        + ProductRepository
        + StockMovementRepository
        + OrderRepository
        + CartRepository
        + CartItemRepository
        + CartActivityRepository
        + ?Sized
{
}

#[derive(Debug, Clone)]
pub struct OrderLineRequest {
    pub product_id: Uuid,
    pub quantity: i32,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub customer_id: Uuid,
    pub lines: Vec<OrderLineRequest>,
    pub shipping: ShippingAddress,
    pub notes: Option<String>,
}

/// A cart line whose add-time price differs from the price the order used.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChange {
    pub product_id: Uuid,
    pub cart_price: BigDecimal,
    pub order_price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct CartConversion {
    pub order: Order,
    pub price_changes: Vec<PriceChange>,
}

/// Validates the draft, prices it at current product prices, reserves stock
/// through OUT movements and persists the order.
///
/// Checks run in order: customer, then each product (exists, active, stock),
/// then shipping fields. Nothing is written before every check has passed.
pub async fn assemble<S>(store: &mut S, draft: OrderDraft, actor: &Actor) -> Result<Order, OrderError>
where
    S: OrderStore + ?Sized,
{
    if draft.lines.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    if draft.lines.iter().any(|l| l.quantity <= 0) {
        return Err(OrderError::InvalidQuantity);
    }

    if !store.customer_exists(draft.customer_id).await? {
        return Err(OrderError::CustomerNotFound);
    }

    let mut priced = Vec::with_capacity(draft.lines.len());
    for line in draft.lines {
        let product = store.find_product(line.product_id).await.map_err(|e| match e {
            RepositoryError::NotFound => OrderError::ProductNotFound(line.product_id),
            other => OrderError::Repository(other),
        })?;
        if !product.is_active {
            return Err(OrderError::ProductInactive(product.id));
        }
        if !product.has_stock_for(line.quantity) {
            return Err(OrderError::InsufficientStock {
                product_id: product.id,
                requested: line.quantity,
                available: product.stock_quantity,
            });
        }
        priced.push(PricedLine {
            product_id: product.id,
            quantity: line.quantity,
            unit_price: product.price,
            notes: clean_notes(line.notes),
        });
    }

    let shipping = draft.shipping.normalized()?;

    let now = Utc::now();
    let order_number = next_order_number(store, now).await?;
    let order = Order::new(NewOrderProps {
        customer_id: draft.customer_id,
        order_number,
        shipping,
        notes: clean_notes(draft.notes),
        lines: priced,
        now,
    });

    store.insert_order(&order).await?;

    let actor_id = actor.user_id_or(order.customer_id);
    for item in &order.items {
        record_movement(
            store,
            MovementRequest {
                product_id: item.product_id,
                quantity: item.quantity,
                movement_type: MovementType::Out,
                actor_id,
                reference_id: Some(order.id),
                notes: None,
            },
        )
        .await?;
    }

    Ok(order)
}

/// Turns an active, non-empty cart into an order and clears the cart.
pub async fn convert_cart<S>(
    store: &mut S,
    cart_id: Uuid,
    shipping: ShippingAddress,
    notes: Option<String>,
    actor: &Actor,
    policy: &CartExpiryPolicy,
    now: DateTime<Utc>,
) -> Result<CartConversion, OrderError>
where
    S: OrderStore + ?Sized,
{
    let mut cart = load_cart(store, cart_id).await?;
    ensure_mutable(&cart, policy, now)?;

    let items = store.cart_items(cart.id).await?;
    if items.is_empty() {
        return Err(OrderError::CartEmpty);
    }

    let draft = OrderDraft {
        customer_id: cart.customer_id,
        lines: items
            .iter()
            .map(|item| OrderLineRequest {
                product_id: item.product_id,
                quantity: item.quantity,
                notes: None,
            })
            .collect(),
        shipping,
        notes,
    };
    let order = assemble(store, draft, actor).await?;

    let price_changes = items
        .iter()
        .zip(order.items.iter())
        .filter(|(cart_item, order_item)| cart_item.unit_price != order_item.unit_price)
        .map(|(cart_item, order_item)| PriceChange {
            product_id: cart_item.product_id,
            cart_price: cart_item.unit_price.clone(),
            order_price: order_item.unit_price.clone(),
        })
        .collect();

    clear_items(store, &cart, CartAction::Remove, actor).await?;
    cart.status = next_status(cart.status, cart.updated_at, CartEvent::Converted, policy);
    cart.updated_at = now;
    store.update_cart(&cart).await?;

    Ok(CartConversion {
        order,
        price_changes,
    })
}
