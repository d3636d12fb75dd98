use tokio::sync::{broadcast, watch};

use crate::dto::display::GameshowDisplayData;

/// Notifications delivered to the presentation layer.
#[derive(Debug, Clone)]
pub enum PresentationEvent {
    /// Another writer changed the shared state; the view is stale until reconciled.
    UpdateAvailable,
    /// State was reconciled; redraw from this data.
    Render(Box<GameshowDisplayData>),
}

/// Fan-out point between the gameshow and whatever renders it.
///
/// Publishing without subscribers is not an error: no hook is registered.
pub struct PresentationHub {
    update_available: watch::Sender<bool>,
    events: broadcast::Sender<PresentationEvent>,
}

impl PresentationHub {
    /// Construct a hub whose event channel buffers `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (update_available, _rx) = watch::channel(false);
        let (events, _rx) = broadcast::channel(capacity);
        Self {
            update_available,
            events,
        }
    }

    /// Register a new subscriber that will receive subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<PresentationEvent> {
        self.events.subscribe()
    }

    /// Watch the update-available flag.
    pub fn update_watcher(&self) -> watch::Receiver<bool> {
        self.update_available.subscribe()
    }

    /// Current value of the update-available flag.
    pub fn is_update_available(&self) -> bool {
        *self.update_available.borrow()
    }

    /// Raise the update-available flag, notifying subscribers only when it flips.
    pub fn signal_update_available(&self) {
        let raised = self.update_available.send_if_modified(|flag| {
            let changed = !*flag;
            *flag = true;
            changed
        });
        if raised {
            let _ = self.events.send(PresentationEvent::UpdateAvailable);
        }
    }

    /// Lower the flag and ask subscribers to redraw.
    pub fn render(&self, data: GameshowDisplayData) {
        self.update_available.send_replace(false);
        let _ = self.events.send(PresentationEvent::Render(Box::new(data)));
    }
}

impl Default for PresentationHub {
    fn default() -> Self {
        Self::new(16)
    }
}
