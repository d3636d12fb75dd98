/// Domain entities and the root snapshot.
pub mod game;
/// Notifications towards the presentation layer.
pub mod presentation;
/// Round phase model.
pub mod round;

use std::sync::Arc;

use time::OffsetDateTime;
use tracing::error;

use crate::{
    dao::{kv_store::KeyValueStore, snapshot::SnapshotRepository, storage::StorageResult},
    error::GameshowResult,
    state::{game::GameshowSnapshot, presentation::PresentationHub},
};

/// Points awarded by a question created without an explicit value.
pub const DEFAULT_QUESTION_POINTS: u32 = 100;

/// Tunables applied by the services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    /// Points given to questions created without an explicit value.
    pub default_points: u32,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            default_points: DEFAULT_QUESTION_POINTS,
        }
    }
}

/// Handle owning one gameshow's in-memory snapshot and its persistence.
///
/// Every mutation goes through [`Gameshow::mutate`], which writes the whole snapshot back
/// before returning. Several handles may share one store; the last writer wins.
pub struct Gameshow {
    repository: SnapshotRepository,
    snapshot: GameshowSnapshot,
    presentation: Arc<PresentationHub>,
    settings: GameSettings,
}

impl Gameshow {
    /// Open a gameshow on `store`, loading whatever snapshot is already persisted.
    pub fn open(
        store: Arc<dyn KeyValueStore>,
        presentation: Arc<PresentationHub>,
        settings: GameSettings,
    ) -> StorageResult<Self> {
        let repository = SnapshotRepository::new(store);
        let snapshot = repository.load()?;
        Ok(Self {
            repository,
            snapshot,
            presentation,
            settings,
        })
    }

    /// Read-only view of the current state.
    pub fn snapshot(&self) -> &GameshowSnapshot {
        &self.snapshot
    }

    /// Tunables the gameshow was opened with.
    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    /// Hub used to notify the presentation layer.
    pub fn presentation(&self) -> &Arc<PresentationHub> {
        &self.presentation
    }

    pub(crate) fn repository(&self) -> &SnapshotRepository {
        &self.repository
    }

    /// Replace the in-memory snapshot with the persisted one.
    pub(crate) fn reload(&mut self) -> StorageResult<()> {
        self.snapshot = self.repository.load()?;
        Ok(())
    }

    /// Apply `change` to the snapshot and persist it.
    ///
    /// `change` must validate before it mutates: an `Err` skips persistence and the snapshot is
    /// expected to be untouched.
    pub(crate) fn mutate<T, F>(&mut self, change: F) -> GameshowResult<T>
    where
        F: FnOnce(&mut GameshowSnapshot) -> GameshowResult<T>,
    {
        let value = change(&mut self.snapshot)?;
        if let Err(err) = self.repository.save(&self.snapshot, now_millis()) {
            error!(error = %err, "failed to persist gameshow snapshot");
            return Err(err.into());
        }
        Ok(value)
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    (OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}
