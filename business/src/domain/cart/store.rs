use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::catalog::repository::ProductRepository;
use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::Actor;

use super::activity::{CartAction, log_activity};
use super::errors::CartError;
use super::lifecycle::{CartEvent, CartExpiryPolicy, CartStatus, next_status};
use super::model::{Cart, CartItem, CartLine, CartView};
use super::repository::{CartActivityRepository, CartItemRepository, CartRepository};

pub async fn load_cart<S>(store: &mut S, cart_id: Uuid) -> Result<Cart, CartError>
where
    S: CartRepository + ?Sized,
{
    store.find_cart(cart_id).await.map_err(|e| match e {
        RepositoryError::NotFound => CartError::CartNotFound,
        other => CartError::Repository(other),
    })
}

pub async fn load_item<S>(store: &mut S, item_id: Uuid) -> Result<CartItem, CartError>
where
    S: CartItemRepository + ?Sized,
{
    store.find_cart_item(item_id).await.map_err(|e| match e {
        RepositoryError::NotFound => CartError::CartItemNotFound,
        other => CartError::Repository(other),
    })
}

/// Rejects mutations on carts that are terminal or idle past the policy.
///
/// An idle cart is not expired here: the caller's scope is about to roll back
/// anyway, so the transition is left to the next read or sweep.
pub fn ensure_mutable(
    cart: &Cart,
    policy: &CartExpiryPolicy,
    now: DateTime<Utc>,
) -> Result<(), CartError> {
    if next_status(cart.status, cart.updated_at, CartEvent::Observed(now), policy)
        != CartStatus::Active
    {
        return Err(CartError::CartInactive);
    }
    Ok(())
}

/// Deletes every line of the cart, logging one entry per removed line.
pub async fn clear_items<S>(
    store: &mut S,
    cart: &Cart,
    action: CartAction,
    actor: &Actor,
) -> Result<Vec<CartItem>, RepositoryError>
where
    S: CartItemRepository + CartActivityRepository + ?Sized,
{
    let items = store.cart_items(cart.id).await?;
    for item in &items {
        store.delete_cart_item(item.id).await?;
        log_activity(
            store,
            cart,
            Some(item.product_id),
            action,
            (Some(0), Some(item.quantity)),
            actor,
        )
        .await?;
    }
    Ok(items)
}

/// Applies lazy expiry. Returns the cart as it stands afterwards.
pub async fn expire_if_idle<S>(
    store: &mut S,
    mut cart: Cart,
    policy: &CartExpiryPolicy,
    now: DateTime<Utc>,
    actor: &Actor,
) -> Result<Cart, RepositoryError>
where
    S: CartRepository + CartItemRepository + CartActivityRepository + ?Sized,
{
    let next = next_status(cart.status, cart.updated_at, CartEvent::Observed(now), policy);
    if next != CartStatus::Expired || cart.status == CartStatus::Expired {
        return Ok(cart);
    }

    clear_items(store, &cart, CartAction::Expire, actor).await?;
    cart.status = CartStatus::Expired;
    cart.updated_at = now;
    store.update_cart(&cart).await?;
    Ok(cart)
}

/// Prices every line at the product's current price.
pub async fn build_view<S>(store: &mut S, cart: Cart) -> Result<CartView, CartError>
where
    S: CartItemRepository + ProductRepository + ?Sized,
{
    let items = store.cart_items(cart.id).await?;
    let mut lines = Vec::with_capacity(items.len());
    for item in items {
        let product = store.find_product(item.product_id).await.map_err(|e| match e {
            RepositoryError::NotFound => CartError::ProductNotFound(item.product_id),
            other => CartError::Repository(other),
        })?;
        let line_total = &product.price * bigdecimal::BigDecimal::from(item.quantity);
        lines.push(CartLine {
            model_name: product.model_name,
            current_unit_price: product.price,
            line_total,
            item,
        });
    }
    Ok(CartView::new(cart, lines))
}
