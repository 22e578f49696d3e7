use std::env;
use std::time::Duration;

use anyhow::Context;
use business::domain::cart::lifecycle::CartExpiryPolicy;

const DEFAULT_EXPIRY_HOURS: i64 = 24;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 900;

/// Cart lifecycle settings owned by the host.
///
/// Environment variables:
/// - CART_EXPIRY_HOURS: idle time before a cart expires (default: 24)
/// - CART_SWEEP_INTERVAL_SECS: period of the expiry sweep, 0 disables it (default: 900)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartConfig {
    pub expiry_hours: i64,
    pub sweep_interval_secs: u64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            expiry_hours: DEFAULT_EXPIRY_HOURS,
            sweep_interval_secs: DEFAULT_SWEEP_INTERVAL_SECS,
        }
    }
}

impl CartConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::parse(
            env::var("CART_EXPIRY_HOURS").ok(),
            env::var("CART_SWEEP_INTERVAL_SECS").ok(),
        )
    }

    fn parse(expiry_hours: Option<String>, sweep_secs: Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let expiry_hours = match expiry_hours {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .with_context(|| format!("CART_EXPIRY_HOURS is not a number: {raw}"))?,
            None => defaults.expiry_hours,
        };
        let sweep_interval_secs = match sweep_secs {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("CART_SWEEP_INTERVAL_SECS is not a number: {raw}"))?,
            None => defaults.sweep_interval_secs,
        };

        let config = Self {
            expiry_hours,
            sweep_interval_secs,
        };
        config.expiry_policy()?;
        Ok(config)
    }

    pub fn expiry_policy(&self) -> anyhow::Result<CartExpiryPolicy> {
        CartExpiryPolicy::try_from_hours(self.expiry_hours).with_context(|| {
            format!(
                "CART_EXPIRY_HOURS must be a positive number of hours within range: {}",
                self.expiry_hours
            )
        })
    }

    /// `None` when the sweep is disabled.
    pub fn sweep_interval(&self) -> Option<Duration> {
        (self.sweep_interval_secs > 0).then(|| Duration::from_secs(self.sweep_interval_secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_fall_back_to_defaults() {
        let config = CartConfig::parse(None, None).unwrap();

        assert_eq!(config, CartConfig::default());
        assert_eq!(config.sweep_interval(), Some(Duration::from_secs(900)));
    }

    #[test]
    fn should_disable_sweep_with_zero_interval() {
        let config = CartConfig::parse(None, Some("0".to_string())).unwrap();

        assert!(config.sweep_interval().is_none());
    }

    #[test]
    fn should_reject_non_positive_expiry() {
        assert!(CartConfig::parse(Some("0".to_string()), None).is_err());
        assert!(CartConfig::parse(Some("soon".to_string()), None).is_err());
    }

    #[test]
    fn should_reject_expiry_too_large_for_a_duration() {
        let result = CartConfig::parse(Some(i64::MAX.to_string()), None);

        assert!(result.is_err());
    }

    #[test]
    fn should_read_custom_expiry() {
        let config = CartConfig::parse(Some(" 48 ".to_string()), None).unwrap();

        assert_eq!(config.expiry_hours, 48);
    }
}
