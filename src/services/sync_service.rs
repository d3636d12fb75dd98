//! Detection and reconciliation of changes made by other writers of the shared store.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, info, warn};

use crate::{
    dao::{kv_store::KeyValueStore, snapshot::SnapshotRepository, storage::StorageResult},
    error::GameshowResult,
    services::display_service::get_gameshow_display_data,
    state::{Gameshow, now_millis, presentation::PresentationHub},
};

/// Default delay between two update checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Whether the store was written after this process last reconciled.
///
/// A process that never reconciled has no baseline and reports no update.
pub fn check_for_updates(repository: &SnapshotRepository) -> StorageResult<bool> {
    let last_update = repository.last_update()?;
    let last_check = repository.last_check()?;
    Ok(matches!((last_update, last_check), (Some(update), Some(check)) if update > check))
}

/// Reload the persisted state, record the reconcile, and ask the presentation layer to redraw.
pub fn sync_gameshow(gs: &mut Gameshow) -> GameshowResult<()> {
    gs.reload()?;
    gs.repository().mark_checked(now_millis())?;
    gs.presentation().render(get_gameshow_display_data(gs));
    info!(
        questions = gs.snapshot().questions.len(),
        teams = gs.snapshot().teams.len(),
        "gameshow synchronized"
    );
    Ok(())
}

/// Background task polling the store for foreign writes.
///
/// Only reads the markers; domain state is never touched.
pub struct SyncMonitor {
    cancel_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl SyncMonitor {
    /// Spawn the polling task on the current Tokio runtime.
    pub fn start(
        store: Arc<dyn KeyValueStore>,
        presentation: Arc<PresentationHub>,
        every: Duration,
    ) -> Self {
        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        let repository = SnapshotRepository::new(store);

        info!(interval_ms = every.as_millis() as u64, "starting sync monitor");
        let task = tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => match check_for_updates(&repository) {
                        Ok(true) => {
                            debug!("foreign update detected");
                            presentation.signal_update_available();
                        }
                        Ok(false) => {}
                        Err(err) => warn!(error = %err, "update check failed"),
                    },
                    _ = wait_for_cancellation(&mut cancel_rx) => break,
                }
            }
        });

        Self {
            cancel_tx,
            task: Some(task),
        }
    }

    /// Cancel the polling task and wait for it to finish.
    pub async fn stop(mut self) {
        info!("stopping sync monitor");
        let _ = self.cancel_tx.send(true);
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                warn!(error = %err, "sync monitor task failed");
            }
        }
    }

    /// Whether the polling task is still alive.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for SyncMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn wait_for_cancellation(rx: &mut watch::Receiver<bool>) {
    while rx.changed().await.is_ok() {
        if *rx.borrow() {
            return;
        }
    }
    // Sender dropped: nobody can cancel anymore, so never resolve.
    std::future::pending::<()>().await
}
