use super::errors::OrderError;
use super::model::{Order, OrderStatus};

pub const DEFAULT_PAGE_SIZE: u32 = 50;
pub const MAX_PAGE_SIZE: u32 = 200;

/// Back-office order listing: optional status filter, 1-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderQuery {
    pub status: Option<OrderStatus>,
    pub page: u32,
    pub page_size: u32,
}

impl OrderQuery {
    pub fn new(
        status: Option<OrderStatus>,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Self, OrderError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page == 0 || page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(OrderError::InvalidPage);
        }
        Ok(Self {
            status,
            page,
            page_size,
        })
    }

    /// Rows to skip before this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size)
    }
}

#[derive(Debug, Clone)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    /// Orders matching the filter across all pages.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}
