use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who triggered a mutation, as seen by the audit trail and the stock ledger.
///
/// Both parts are optional: background work (the expiry sweep) runs without a
/// user and without a remote address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: Option<Uuid>,
    pub ip_address: Option<String>,
}

impl Actor {
    pub fn new(user_id: Option<Uuid>, ip_address: Option<String>) -> Self {
        Self {
            user_id,
            ip_address: ip_address.filter(|ip| !ip.trim().is_empty()),
        }
    }

    /// Actor used by host-scheduled jobs.
    pub fn system() -> Self {
        Self::default()
    }

    /// The user id, or `fallback` when the request was anonymous.
    pub fn user_id_or(&self, fallback: Uuid) -> Uuid {
        self.user_id.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_drop_blank_ip_address() {
        let actor = Actor::new(None, Some("  ".to_string()));
        assert!(actor.ip_address.is_none());
    }

    #[test]
    fn should_keep_ip_address() {
        let actor = Actor::new(None, Some("10.0.0.7".to_string()));
        assert_eq!(actor.ip_address.as_deref(), Some("10.0.0.7"));
    }

    #[test]
    fn should_fall_back_when_anonymous() {
        let fallback = Uuid::new_v4();
        assert_eq!(Actor::system().user_id_or(fallback), fallback);
    }

    #[test]
    fn should_prefer_user_id_over_fallback() {
        let user = Uuid::new_v4();
        let actor = Actor::new(Some(user), None);
        assert_eq!(actor.user_id_or(Uuid::new_v4()), user);
    }
}
