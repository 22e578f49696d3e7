use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::Actor;

use super::model::Cart;
use super::repository::CartActivityRepository;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CartAction {
    Create,
    Add,
    Update,
    Remove,
    Expire,
}

impl std::fmt::Display for CartAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartAction::Create => write!(f, "CREATE"),
            CartAction::Add => write!(f, "ADD"),
            CartAction::Update => write!(f, "UPDATE"),
            CartAction::Remove => write!(f, "REMOVE"),
            CartAction::Expire => write!(f, "EXPIRE"),
        }
    }
}

impl std::str::FromStr for CartAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(CartAction::Create),
            "ADD" => Ok(CartAction::Add),
            "UPDATE" => Ok(CartAction::Update),
            "REMOVE" => Ok(CartAction::Remove),
            "EXPIRE" => Ok(CartAction::Expire),
            _ => Err(format!("Invalid cart action: {}", s)),
        }
    }
}

/// One audit row. `quantity` is the line quantity after the action,
/// `previous_quantity` the one before it.
#[derive(Debug, Clone)]
pub struct CartActivity {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub customer_id: Uuid,
    pub product_id: Option<Uuid>,
    pub action: CartAction,
    pub quantity: Option<i32>,
    pub previous_quantity: Option<i32>,
    pub actor_id: Option<Uuid>,
    pub ip_address: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CartActivity {
    pub fn new(
        cart: &Cart,
        product_id: Option<Uuid>,
        action: CartAction,
        quantity: Option<i32>,
        previous_quantity: Option<i32>,
        actor: &Actor,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            cart_id: cart.id,
            customer_id: cart.customer_id,
            product_id,
            action,
            quantity,
            previous_quantity,
            actor_id: actor.user_id,
            ip_address: actor.ip_address.clone(),
            notes: None,
            created_at: Utc::now(),
        }
    }

    /// Constructor for data already persisted in the repository (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn from_repository(
        id: Uuid,
        cart_id: Uuid,
        customer_id: Uuid,
        product_id: Option<Uuid>,
        action: CartAction,
        quantity: Option<i32>,
        previous_quantity: Option<i32>,
        actor_id: Option<Uuid>,
        ip_address: Option<String>,
        notes: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            cart_id,
            customer_id,
            product_id,
            action,
            quantity,
            previous_quantity,
            actor_id,
            ip_address,
            notes,
            created_at,
        }
    }
}

/// Appends an audit entry for a cart mutation.
pub async fn log_activity<S>(
    store: &mut S,
    cart: &Cart,
    product_id: Option<Uuid>,
    action: CartAction,
    quantities: (Option<i32>, Option<i32>),
    actor: &Actor,
) -> Result<(), RepositoryError>
where
    S: CartActivityRepository + ?Sized,
{
    let (quantity, previous_quantity) = quantities;
    let entry = CartActivity::new(cart, product_id, action, quantity, previous_quantity, actor);
    store.append_activity(&entry).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_capture_actor_and_cart_owner() {
        let cart = Cart::new(Uuid::new_v4(), None);
        let user = Uuid::new_v4();
        let actor = Actor::new(Some(user), Some("192.168.1.4".to_string()));

        let entry = CartActivity::new(&cart, None, CartAction::Add, Some(3), Some(1), &actor);

        assert_eq!(entry.customer_id, cart.customer_id);
        assert_eq!(entry.actor_id, Some(user));
        assert_eq!(entry.ip_address.as_deref(), Some("192.168.1.4"));
        assert_eq!(entry.quantity, Some(3));
        assert_eq!(entry.previous_quantity, Some(1));
    }

    #[test]
    fn should_parse_action_names() {
        assert_eq!("EXPIRE".parse::<CartAction>().unwrap(), CartAction::Expire);
        assert_eq!(CartAction::Remove.to_string(), "REMOVE");
        assert!("VIEW".parse::<CartAction>().is_err());
    }
}
