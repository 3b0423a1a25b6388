// Background collector: fetch current weather on a fixed interval and append it
// to the reading store. A failed cycle is logged and skipped; there is no retry.

use crate::reading_repo::ReadingRepo;
use crate::weather_client::WeatherClient;
use std::sync::Arc;
use tokio::time::{Duration, interval};
use tracing::Instrument;

pub struct WorkerDeps {
    pub client: WeatherClient,
    pub readings: Arc<ReadingRepo>,
    pub shutdown_rx: tokio::sync::oneshot::Receiver<()>,
}

pub struct WorkerConfig {
    pub interval_secs: u64,
}

/// Runs one fetch-and-store cycle. Used by the worker loop.
pub async fn collect_once(client: &WeatherClient, readings: &ReadingRepo) -> anyhow::Result<i64> {
    let values = client.fetch_current().await?;
    let id = readings.save_reading(&values).await?;
    tracing::info!(
        operation = "collect",
        city = %values.city,
        temperature = values.temperature,
        id,
        "reading stored"
    );
    Ok(id)
}

pub fn spawn(deps: WorkerDeps, config: WorkerConfig) -> tokio::task::JoinHandle<()> {
    let WorkerDeps {
        client,
        readings,
        mut shutdown_rx,
    } = deps;

    let worker_span =
        tracing::span!(tracing::Level::DEBUG, "collector", interval_secs = config.interval_secs);

    let task = async move {
        let mut tick = interval(Duration::from_secs(config.interval_secs));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut failures_total: u64 = 0;
        loop {
            tokio::select! {
                _ = tick.tick() => {
                    if let Err(e) = collect_once(&client, &readings).await {
                        failures_total += 1;
                        tracing::warn!(
                            error = %e,
                            operation = "collect",
                            failures_total,
                            "collection cycle failed"
                        );
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Collector shutting down");
                    break;
                }
            }
        }
    };
    tokio::spawn(task.instrument(worker_span))
}
