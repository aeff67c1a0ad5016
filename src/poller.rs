use std::future::Future;

use log::{error, info};
use tokio::time::{self, MissedTickBehavior};

use crate::{fetcher::PriceFetcher, sensor::PriceSensor};

/// Polls the price page on the configured interval until `shutdown` resolves.
///
/// Shutdown also cancels a fetch that is still in flight.
pub async fn poll_prices<F>(fetcher: &PriceFetcher, sensor: &mut PriceSensor, shutdown: F)
where
    F: Future,
{
    let mut interval = time::interval(fetcher.config().poll_interval);
    // A slow fetch delays the next tick instead of stacking requests.
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    tokio::pin!(shutdown);
    loop {
        let reading = tokio::select! {
            reading = async {
                interval.tick().await;
                fetcher.fetch().await
            } => reading,
            _ = &mut shutdown => {
                info!("Shutting down price polling");
                return;
            }
        };
        if sensor.apply(reading) {
            match serde_json::to_string(&sensor.snapshot()) {
                Ok(state) => info!("{state}"),
                Err(e) => error!("Could not serialize sensor state: {e}"),
            }
        }
    }
}
