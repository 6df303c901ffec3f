//! TTL Cache - process host
//!
//! Owns the single cache instance for the lifetime of the process.

use std::time::Duration;

use anyhow::{ensure, Context};
use serde_json::{json, Value};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ttl_cache::{spawn_reaper_task, Config, TtlCache};

const PROBE_KEY: &str = "__startup_probe";

/// Main entry point for the cache host process.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the cache instance
/// 4. Start the background reaper when enabled
/// 5. Verify the instance with a startup probe
/// 6. Wait for SIGINT/SIGTERM, then clear the cache and stop the reaper
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ttl_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TTL cache service");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        reaper_interval_ms = config.reaper_interval_ms,
        "Configuration loaded"
    );

    let cache: TtlCache<Value> = TtlCache::new();
    info!("Cache initialized");

    let reaper = config
        .reaper_interval()
        .map(|interval| spawn_reaper_task(cache.clone(), interval));
    if reaper.is_none() {
        info!("Reaper disabled, relying on per-entry timers only");
    }

    startup_probe(&cache).await?;
    info!("Startup probe passed, cache ready");

    shutdown_signal().await;

    if let Some(handle) = reaper {
        handle.abort();
        warn!("Reaper task aborted");
    }
    let removed = cache.clear().await;
    info!(removed, "Cache cleared, shutdown complete");

    Ok(())
}

/// Round-trips a probe entry through the cache and removes it again.
async fn startup_probe(cache: &TtlCache<Value>) -> anyhow::Result<()> {
    let probe = json!({ "pid": std::process::id() });
    cache
        .set(PROBE_KEY, probe.clone(), Duration::from_secs(5))
        .await;

    ensure!(
        cache.get(PROBE_KEY).await.as_ref() == Some(&probe),
        "startup probe value was not readable"
    );

    cache.delete(PROBE_KEY).await;
    ensure!(
        !cache.has(PROBE_KEY).await,
        "startup probe survived delete"
    );

    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
