use business::domain::logger::Logger;
use tracing::{debug, error, info, warn};

/// `Logger` port over `tracing`. Every event carries the component that
/// emitted it so one subscriber can filter carts, orders and stock apart.
pub struct TracingLogger {
    component: &'static str,
}

impl TracingLogger {
    pub fn new(component: &'static str) -> Self {
        Self { component }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new("fulfillment")
    }
}

impl Logger for TracingLogger {
    fn info(&self, message: &str) {
        info!(target: "fulfillment", component = self.component, "{}", message);
    }
    fn warn(&self, message: &str) {
        warn!(target: "fulfillment", component = self.component, "{}", message);
    }
    fn error(&self, message: &str) {
        error!(target: "fulfillment", component = self.component, "{}", message);
    }
    fn debug(&self, message: &str) {
        debug!(target: "fulfillment", component = self.component, "{}", message);
    }
}
