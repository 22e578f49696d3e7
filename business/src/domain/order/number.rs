use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use rand::Rng;
use regex::Regex;

use super::errors::OrderError;
use super::repository::OrderRepository;

const MAX_ATTEMPTS: usize = 5;

static ORDER_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ORD-\d{8}-[0-9A-F]{8}$").expect("order number pattern is valid")
});

/// `ORD-yyyyMMdd-XXXXXXXX`, the suffix being 8 uppercase hex digits.
pub fn generate_order_number(now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::rng().random();
    format!("ORD-{}-{:08X}", now.format("%Y%m%d"), suffix)
}

pub fn is_order_number(candidate: &str) -> bool {
    ORDER_NUMBER.is_match(candidate)
}

/// Draws numbers until one is unused in the store.
pub async fn next_order_number<S>(store: &mut S, now: DateTime<Utc>) -> Result<String, OrderError>
where
    S: OrderRepository + ?Sized,
{
    for _ in 0..MAX_ATTEMPTS {
        let candidate = generate_order_number(now);
        if !store.order_number_exists(&candidate).await? {
            return Ok(candidate);
        }
    }
    Err(OrderError::OrderNumberExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockUow;
    use chrono::TimeZone;

    #[test]
    fn should_format_date_and_hex_suffix() {
        let now = Utc.with_ymd_and_hms(2026, 3, 9, 10, 0, 0).unwrap();
        let number = generate_order_number(now);

        assert!(number.starts_with("ORD-20260309-"));
        assert!(is_order_number(&number));
    }

    #[test]
    fn should_reject_lowercase_or_short_suffix() {
        assert!(!is_order_number("ORD-20260309-0a1b2c3d"));
        assert!(!is_order_number("ORD-20260309-0A1B"));
        assert!(!is_order_number("INV-20260309-0A1B2C3D"));
    }

    #[tokio::test]
    async fn should_retry_on_collision() {
        let mut store = MockUow::new();
        let mut calls = 0;
        store.expect_order_number_exists().times(2).returning(move |_| {
            calls += 1;
            Ok(calls == 1)
        });

        let number = next_order_number(&mut store, Utc::now()).await.unwrap();

        assert!(number.starts_with("ORD-"));
    }

    #[tokio::test]
    async fn should_give_up_after_repeated_collisions() {
        let mut store = MockUow::new();
        store
            .expect_order_number_exists()
            .times(MAX_ATTEMPTS)
            .returning(|_| Ok(true));

        let result = next_order_number(&mut store, Utc::now()).await;

        assert!(matches!(result.unwrap_err(), OrderError::OrderNumberExhausted));
    }
}
