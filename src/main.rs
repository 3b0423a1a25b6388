use anyhow::Result;
use std::sync::Arc;
use weather_dashboard::*;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();

    let app_config = config::AppConfig::load()?;
    tracing::info!(name = version::NAME, version = version::VERSION, "starting");

    let readings = Arc::new(
        reading_repo::ReadingRepo::connect(
            &app_config.database.path,
            app_config.database.max_pool_size,
        )
        .await?,
    );
    readings.init().await?;

    let artifacts = Arc::new(artifact_repo::ArtifactRepo::new(&app_config.artifacts));
    if app_config.artifacts.signing_key.is_none() {
        tracing::warn!(
            "no artifact signing key configured ({}); /temperature-trend will fail",
            config::SIGNING_KEY_ENV
        );
    }
    let dashboard = Arc::new(dashboard::DashboardService::new(
        readings.clone(),
        artifacts.clone(),
        &app_config.artifacts.stem,
    )?);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let collector_handle = match weather_client::WeatherClient::from_config(&app_config.collector)? {
        Some(client) if app_config.collector.enabled => Some(worker::spawn(
            worker::WorkerDeps {
                client,
                readings: readings.clone(),
                shutdown_rx,
            },
            worker::WorkerConfig {
                interval_secs: app_config.collector.interval_secs,
            },
        )),
        Some(_) => {
            tracing::info!("collector disabled by config");
            None
        }
        None => {
            tracing::warn!(
                "no weather API key configured ({}); collector not started",
                config::API_KEY_ENV
            );
            None
        }
    };

    let app = routes::app(dashboard, artifacts);
    let addr = format!("{}:{}", app_config.server.host, app_config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    let _ = shutdown_tx.send(());
    if let Some(handle) = collector_handle {
        let _ = handle.await;
    }
    readings.close().await;
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
