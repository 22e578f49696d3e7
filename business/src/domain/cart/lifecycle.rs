use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    Active,
    Expired,
    Cleared,
}

impl std::fmt::Display for CartStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CartStatus::Active => write!(f, "active"),
            CartStatus::Expired => write!(f, "expired"),
            CartStatus::Cleared => write!(f, "cleared"),
        }
    }
}

impl std::str::FromStr for CartStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(CartStatus::Active),
            "expired" => Ok(CartStatus::Expired),
            "cleared" => Ok(CartStatus::Cleared),
            _ => Err(format!("Invalid cart status: {}", s)),
        }
    }
}

/// How long an untouched cart stays usable.
#[derive(Debug, Clone, Copy)]
pub struct CartExpiryPolicy {
    pub idle_timeout: Duration,
}

impl CartExpiryPolicy {
    /// `None` when `hours` is not positive or does not fit a `Duration`.
    pub fn try_from_hours(hours: i64) -> Option<Self> {
        Duration::try_hours(hours)
            .filter(|timeout| *timeout > Duration::zero())
            .map(|idle_timeout| Self { idle_timeout })
    }

    /// True once `updated_at` is strictly older than the idle timeout.
    pub fn is_idle(&self, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - updated_at > self.idle_timeout
    }
}

impl Default for CartExpiryPolicy {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::hours(24),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum CartEvent {
    /// The cart was read or swept at the given instant.
    Observed(DateTime<Utc>),
    /// The cart's contents became an order.
    Converted,
}

/// Pure transition function of the cart lifecycle.
///
/// Active -> Expired when observed idle, Active -> Cleared on conversion.
/// Expired and Cleared are terminal.
pub fn next_status(
    status: CartStatus,
    updated_at: DateTime<Utc>,
    event: CartEvent,
    policy: &CartExpiryPolicy,
) -> CartStatus {
    match (status, event) {
        (CartStatus::Active, CartEvent::Observed(now)) if policy.is_idle(updated_at, now) => {
            CartStatus::Expired
        }
        (CartStatus::Active, CartEvent::Converted) => CartStatus::Cleared,
        (current, _) => current,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expire_active_cart_idle_for_25_hours() {
        let now = Utc::now();
        let status = next_status(
            CartStatus::Active,
            now - Duration::hours(25),
            CartEvent::Observed(now),
            &CartExpiryPolicy::default(),
        );
        assert_eq!(status, CartStatus::Expired);
    }

    #[test]
    fn should_keep_recent_cart_active() {
        let now = Utc::now();
        let status = next_status(
            CartStatus::Active,
            now - Duration::hours(23),
            CartEvent::Observed(now),
            &CartExpiryPolicy::default(),
        );
        assert_eq!(status, CartStatus::Active);
    }

    #[test]
    fn should_not_expire_at_exact_boundary() {
        let now = Utc::now();
        let policy = CartExpiryPolicy::default();
        assert!(!policy.is_idle(now - Duration::hours(24), now));
    }

    #[test]
    fn should_clear_active_cart_on_conversion() {
        let status = next_status(
            CartStatus::Active,
            Utc::now(),
            CartEvent::Converted,
            &CartExpiryPolicy::default(),
        );
        assert_eq!(status, CartStatus::Cleared);
    }

    #[test]
    fn should_treat_terminal_states_as_final() {
        let now = Utc::now();
        let policy = CartExpiryPolicy::default();
        let old = now - Duration::hours(48);
        assert_eq!(
            next_status(CartStatus::Cleared, old, CartEvent::Observed(now), &policy),
            CartStatus::Cleared
        );
        assert_eq!(
            next_status(CartStatus::Expired, old, CartEvent::Converted, &policy),
            CartStatus::Expired
        );
    }

    #[test]
    fn should_refuse_expiry_hours_out_of_range() {
        assert!(CartExpiryPolicy::try_from_hours(0).is_none());
        assert!(CartExpiryPolicy::try_from_hours(i64::MAX).is_none());
        assert_eq!(
            CartExpiryPolicy::try_from_hours(48).map(|p| p.idle_timeout),
            Some(Duration::hours(48))
        );
    }

    #[test]
    fn should_parse_cart_status() {
        assert_eq!("cleared".parse::<CartStatus>().unwrap(), CartStatus::Cleared);
        assert!("gone".parse::<CartStatus>().is_err());
    }

    mod properties {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn should_expire_exactly_past_the_timeout(minutes in 0i64..4000) {
                let now = Utc::now();
                let policy = CartExpiryPolicy::default();
                let status = next_status(
                    CartStatus::Active,
                    now - Duration::minutes(minutes),
                    CartEvent::Observed(now),
                    &policy,
                );
                let expected = if minutes > 24 * 60 {
                    CartStatus::Expired
                } else {
                    CartStatus::Active
                };
                prop_assert_eq!(status, expected);
            }
        }
    }
}
