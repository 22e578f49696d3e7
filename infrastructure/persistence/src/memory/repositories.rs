use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use business::domain::cart::activity::CartActivity;
use business::domain::cart::lifecycle::CartStatus;
use business::domain::cart::model::{Cart, CartItem};
use business::domain::cart::repository::{
    CartActivityRepository, CartItemRepository, CartRepository,
};
use business::domain::catalog::model::Product;
use business::domain::catalog::repository::{CustomerRepository, ProductRepository};
use business::domain::errors::RepositoryError;
use business::domain::inventory::model::StockMovement;
use business::domain::inventory::repository::StockMovementRepository;
use business::domain::order::model::Order;
use business::domain::order::query::OrderQuery;
use business::domain::order::repository::OrderRepository;

use super::store::MemoryUnitOfWork;

impl MemoryUnitOfWork {
    fn product_mut(&mut self, id: Uuid) -> Result<&mut Product, RepositoryError> {
        self.state()?
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl ProductRepository for MemoryUnitOfWork {
    async fn find_product(&mut self, id: Uuid) -> Result<Product, RepositoryError> {
        self.product_mut(id).map(|p| p.clone())
    }

    // The scope already holds the store lock.
    async fn find_product_for_update(&mut self, id: Uuid) -> Result<Product, RepositoryError> {
        self.find_product(id).await
    }

    async fn try_decrement_stock(
        &mut self,
        id: Uuid,
        quantity: i32,
    ) -> Result<Option<i32>, RepositoryError> {
        let product = self.product_mut(id)?;
        if product.stock_quantity < quantity {
            return Ok(None);
        }
        product.stock_quantity -= quantity;
        product.updated_at = Utc::now();
        Ok(Some(product.stock_quantity))
    }

    async fn increment_stock(&mut self, id: Uuid, quantity: i32) -> Result<i32, RepositoryError> {
        let product = self.product_mut(id)?;
        product.stock_quantity = product
            .stock_quantity
            .checked_add(quantity)
            .ok_or(RepositoryError::Persistence)?;
        product.updated_at = Utc::now();
        Ok(product.stock_quantity)
    }

    async fn set_stock(&mut self, id: Uuid, quantity: i32) -> Result<(), RepositoryError> {
        if quantity < 0 {
            return Err(RepositoryError::Persistence);
        }
        let product = self.product_mut(id)?;
        product.stock_quantity = quantity;
        product.updated_at = Utc::now();
        Ok(())
    }
}

#[async_trait]
impl CustomerRepository for MemoryUnitOfWork {
    async fn customer_exists(&mut self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.state()?.customers.contains(&id))
    }
}

#[async_trait]
impl StockMovementRepository for MemoryUnitOfWork {
    async fn insert_movement(&mut self, movement: &StockMovement) -> Result<(), RepositoryError> {
        self.state()?.movements.push(movement.clone());
        Ok(())
    }

    async fn movements_for_product(
        &mut self,
        product_id: Uuid,
    ) -> Result<Vec<StockMovement>, RepositoryError> {
        Ok(self
            .state()?
            .movements
            .iter()
            .rev()
            .filter(|m| m.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn net_movement(&mut self, product_id: Uuid) -> Result<i64, RepositoryError> {
        Ok(self
            .state()?
            .movements
            .iter()
            .filter(|m| m.product_id == product_id)
            .map(|m| i64::from(m.quantity))
            .sum())
    }
}

#[async_trait]
impl CartRepository for MemoryUnitOfWork {
    async fn insert_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError> {
        let carts = &mut self.state()?.carts;
        if carts.contains_key(&cart.id) {
            return Err(RepositoryError::Duplicated);
        }
        carts.insert(cart.id, cart.clone());
        Ok(())
    }

    async fn find_cart(&mut self, id: Uuid) -> Result<Cart, RepositoryError> {
        self.state()?
            .carts
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_active_cart_for_customer(
        &mut self,
        customer_id: Uuid,
    ) -> Result<Option<Cart>, RepositoryError> {
        Ok(self
            .state()?
            .carts
            .values()
            .filter(|c| c.customer_id == customer_id && c.status == CartStatus::Active)
            .max_by_key(|c| c.updated_at)
            .cloned())
    }

    async fn update_cart(&mut self, cart: &Cart) -> Result<(), RepositoryError> {
        let stored = self
            .state()?
            .carts
            .get_mut(&cart.id)
            .ok_or(RepositoryError::NotFound)?;
        *stored = cart.clone();
        Ok(())
    }

    async fn active_carts(&mut self) -> Result<Vec<Cart>, RepositoryError> {
        let mut carts: Vec<Cart> = self
            .state()?
            .carts
            .values()
            .filter(|c| c.status == CartStatus::Active)
            .cloned()
            .collect();
        carts.sort_by_key(|c| c.updated_at);
        Ok(carts)
    }
}

#[async_trait]
impl CartItemRepository for MemoryUnitOfWork {
    async fn find_cart_item(&mut self, id: Uuid) -> Result<CartItem, RepositoryError> {
        self.state()?
            .cart_items
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_cart_item_by_product(
        &mut self,
        cart_id: Uuid,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self
            .state()?
            .cart_items
            .values()
            .find(|i| i.cart_id == cart_id && i.product_id == product_id)
            .cloned())
    }

    async fn cart_items(&mut self, cart_id: Uuid) -> Result<Vec<CartItem>, RepositoryError> {
        let mut items: Vec<CartItem> = self
            .state()?
            .cart_items
            .values()
            .filter(|i| i.cart_id == cart_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.added_at);
        Ok(items)
    }

    async fn save_cart_item(&mut self, item: &CartItem) -> Result<(), RepositoryError> {
        let items = &mut self.state()?.cart_items;
        let clashes = items.values().any(|i| {
            i.id != item.id && i.cart_id == item.cart_id && i.product_id == item.product_id
        });
        if clashes {
            return Err(RepositoryError::Duplicated);
        }
        items.insert(item.id, item.clone());
        Ok(())
    }

    async fn delete_cart_item(&mut self, id: Uuid) -> Result<(), RepositoryError> {
        self.state()?
            .cart_items
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl CartActivityRepository for MemoryUnitOfWork {
    async fn append_activity(&mut self, activity: &CartActivity) -> Result<(), RepositoryError> {
        self.state()?.activity.push(activity.clone());
        Ok(())
    }

    async fn activity_for_cart(
        &mut self,
        cart_id: Uuid,
    ) -> Result<Vec<CartActivity>, RepositoryError> {
        Ok(self
            .state()?
            .activity
            .iter()
            .filter(|a| a.cart_id == cart_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OrderRepository for MemoryUnitOfWork {
    async fn insert_order(&mut self, order: &Order) -> Result<(), RepositoryError> {
        let orders = &mut self.state()?.orders;
        let clashes = orders
            .values()
            .any(|o| o.id == order.id || o.order_number == order.order_number);
        if clashes {
            return Err(RepositoryError::Duplicated);
        }
        orders.insert(order.id, order.clone());
        Ok(())
    }

    async fn find_order(&mut self, id: Uuid) -> Result<Order, RepositoryError> {
        self.state()?
            .orders
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_order_by_number(
        &mut self,
        order_number: &str,
    ) -> Result<Order, RepositoryError> {
        self.state()?
            .orders
            .values()
            .find(|o| o.order_number == order_number)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn order_number_exists(&mut self, order_number: &str) -> Result<bool, RepositoryError> {
        Ok(self
            .state()?
            .orders
            .values()
            .any(|o| o.order_number == order_number))
    }

    async fn orders_for_customer(
        &mut self,
        customer_id: Uuid,
    ) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .state()?
            .orders
            .values()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        Ok(orders)
    }

    async fn find_orders(
        &mut self,
        query: &OrderQuery,
    ) -> Result<(Vec<Order>, u64), RepositoryError> {
        let mut matching: Vec<Order> = self
            .state()?
            .orders
            .values()
            .filter(|o| query.status.is_none_or(|s| o.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.order_date.cmp(&a.order_date).then(a.id.cmp(&b.id)));
        let total = matching.len() as u64;
        let skip = usize::try_from(query.offset()).unwrap_or(usize::MAX);
        let page = matching
            .into_iter()
            .skip(skip)
            .take(query.page_size as usize)
            .collect();
        Ok((page, total))
    }

    async fn update_order(&mut self, order: &Order) -> Result<(), RepositoryError> {
        let stored = self
            .state()?
            .orders
            .get_mut(&order.id)
            .ok_or(RepositoryError::NotFound)?;
        let items = std::mem::take(&mut stored.items);
        *stored = Order {
            items,
            ..order.clone()
        };
        Ok(())
    }
}
