//! In-memory store implementing every repository port over plain collections.
//!
//! Intended for tests and local runs. A scope holds the store's lock from
//! `begin` until commit/rollback/drop and works on a private copy of the
//! state, so scopes are serialisable and a rollback simply discards the copy.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use business::domain::cart::activity::CartActivity;
use business::domain::cart::model::{Cart, CartItem};
use business::domain::catalog::model::Product;
use business::domain::errors::RepositoryError;
use business::domain::inventory::model::StockMovement;
use business::domain::order::model::Order;
use business::domain::transaction::{TransactionCoordinator, UnitOfWork};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub customers: HashSet<Uuid>,
    pub products: HashMap<Uuid, Product>,
    pub movements: Vec<StockMovement>,
    pub carts: HashMap<Uuid, Cart>,
    pub cart_items: HashMap<Uuid, CartItem>,
    pub activity: Vec<CartActivity>,
    pub orders: HashMap<Uuid, Order>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_customer(&self, id: Uuid) {
        self.state.lock().await.customers.insert(id);
    }

    pub async fn add_product(&self, product: Product) {
        self.state.lock().await.products.insert(product.id, product);
    }

    /// Overwrites a cart as stored, bypassing the domain (for seeding old carts).
    pub async fn put_cart(&self, cart: Cart) {
        self.state.lock().await.carts.insert(cart.id, cart);
    }

    /// Copy of the committed state.
    pub async fn snapshot(&self) -> MemoryState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl TransactionCoordinator for InMemoryStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepositoryError> {
        let guard = self.state.clone().lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(MemoryUnitOfWork {
            guard: Some(guard),
            working,
        }))
    }
}

pub struct MemoryUnitOfWork {
    guard: Option<OwnedMutexGuard<MemoryState>>,
    working: MemoryState,
}

impl MemoryUnitOfWork {
    pub(super) fn state(&mut self) -> Result<&mut MemoryState, RepositoryError> {
        match self.guard {
            Some(_) => Ok(&mut self.working),
            None => Err(RepositoryError::TransactionClosed),
        }
    }
}

#[async_trait]
impl UnitOfWork for MemoryUnitOfWork {
    async fn commit(&mut self) -> Result<(), RepositoryError> {
        let mut guard = self.guard.take().ok_or(RepositoryError::TransactionClosed)?;
        *guard = std::mem::take(&mut self.working);
        Ok(())
    }

    async fn rollback(&mut self) -> Result<(), RepositoryError> {
        self.guard.take().ok_or(RepositoryError::TransactionClosed)?;
        self.working = MemoryState::default();
        Ok(())
    }
}
