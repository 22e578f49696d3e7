use async_trait::async_trait;

use crate::domain::cart::errors::CartError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub examined: usize,
    pub expired: usize,
    pub failed: usize,
}

#[async_trait]
pub trait SweepExpiredCartsUseCase: Send + Sync {
    async fn execute(&self) -> Result<SweepReport, CartError>;
}
