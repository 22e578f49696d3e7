use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use business::domain::cart::use_cases::sweep_expired::SweepExpiredCartsUseCase;

/// Runs the cart expiry sweep every `period` until the task is aborted.
/// The first sweep happens one full period after startup.
pub fn spawn(sweep: Arc<dyn SweepExpiredCartsUseCase>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        tracing::info!(period_secs = period.as_secs(), "Cart expiry sweep scheduled");

        let mut interval = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            match sweep.execute().await {
                Ok(report) if report.expired > 0 || report.failed > 0 => tracing::info!(
                    examined = report.examined,
                    expired = report.expired,
                    failed = report.failed,
                    "Cart expiry sweep finished"
                ),
                Ok(_) => tracing::debug!("Cart expiry sweep found nothing to expire"),
                Err(e) => tracing::error!(error = %e, "Cart expiry sweep failed"),
            }
        }
    })
}
