//! Gameshow spectator binary: watches the shared store and re-renders on foreign updates.

use std::sync::Arc;

use anyhow::Context;
use gameshow_store::{
    config::AppConfig,
    dao::kv_store::{KeyValueStore, file::FileStore},
    services::sync_service::{SyncMonitor, sync_gameshow},
    state::{
        Gameshow,
        presentation::{PresentationEvent, PresentationHub},
    },
};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let store: Arc<dyn KeyValueStore> =
        Arc::new(FileStore::open(config.store_dir()).context("opening gameshow store")?);
    let presentation = Arc::new(PresentationHub::default());
    let mut events = presentation.subscribe();

    let mut gameshow = Gameshow::open(store.clone(), presentation.clone(), config.settings())
        .context("loading gameshow state")?;
    sync_gameshow(&mut gameshow).context("initial sync")?;

    let monitor = SyncMonitor::start(store, presentation, config.poll_interval());

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(PresentationEvent::UpdateAvailable) => {
                    if let Err(err) = sync_gameshow(&mut gameshow) {
                        warn!(error = %err, "failed to synchronize gameshow");
                    }
                }
                Ok(PresentationEvent::Render(data)) => {
                    let rendered =
                        serde_json::to_string(&data).context("serializing display data")?;
                    info!(display = %rendered, "render");
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "presentation events dropped"),
                Err(RecvError::Closed) => break,
            },
            _ = &mut shutdown => break,
        }
    }

    monitor.stop().await;
    info!("gameshow spectator stopped");
    Ok(())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
