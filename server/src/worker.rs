use application::service::ReturnAlertService;
use application::transfer::ScanReturnAlertsDto;
use time::OffsetDateTime;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::handler::AppModule;

/// Periodically flags active reservations whose return is near.
/// A failed scan is logged and retried on the next tick.
pub fn spawn_return_alert_worker(module: AppModule) -> JoinHandle<()> {
    tokio::spawn(async move {
        let config = module.config().return_alert().clone();
        let mut ticker = tokio::time::interval(*config.scan_interval());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tracing::info!(
            interval = ?config.scan_interval(),
            lookahead = %config.lookahead(),
            "Return alert worker started"
        );

        loop {
            ticker.tick().await;
            let dto = ScanReturnAlertsDto {
                now: OffsetDateTime::now_utc(),
                lookahead: *config.lookahead(),
            };
            match module.scan_return_alerts(dto).await {
                Ok(flagged) if !flagged.is_empty() => {
                    tracing::info!(count = flagged.len(), "Raised return alerts");
                }
                Ok(_) => {}
                Err(report) => {
                    tracing::error!("Return alert scan failed: {report:?}");
                }
            }
        }
    })
}
