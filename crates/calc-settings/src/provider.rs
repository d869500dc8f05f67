//! Latest-snapshot provider.

use std::sync::Arc;

use tokio::sync::watch;

use crate::snapshot::SettingsSnapshot;

/// Anything that can hand out the current settings snapshot.
pub trait SettingsProvider {
    /// The latest complete snapshot. Never a partially updated one.
    fn current_settings(&self) -> Arc<SettingsSnapshot>;
}

impl SettingsProvider for Arc<SettingsSnapshot> {
    fn current_settings(&self) -> Arc<SettingsSnapshot> {
        Arc::clone(self)
    }
}

/// Shared, swappable snapshot.
///
/// Cloning yields another handle to the same snapshot. Writers replace the
/// whole snapshot; readers either see the old one or the new one.
#[derive(Debug, Clone)]
pub struct SharedSettings {
    sender: Arc<watch::Sender<Arc<SettingsSnapshot>>>,
}

impl Default for SharedSettings {
    fn default() -> Self {
        Self::new(SettingsSnapshot::default())
    }
}

impl SharedSettings {
    #[must_use]
    pub fn new(initial: SettingsSnapshot) -> Self {
        let (sender, _) = watch::channel(Arc::new(initial));
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Swap in `snapshot`. Returns `false` and notifies nobody when it equals
    /// the current one.
    pub fn replace(&self, snapshot: SettingsSnapshot) -> bool {
        self.sender.send_if_modified(|current| {
            if **current == snapshot {
                return false;
            }
            *current = Arc::new(snapshot);
            true
        })
    }

    /// Receiver that is notified after every effective replacement.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Arc<SettingsSnapshot>> {
        self.sender.subscribe()
    }
}

impl SettingsProvider for SharedSettings {
    fn current_settings(&self) -> Arc<SettingsSnapshot> {
        Arc::clone(&self.sender.borrow())
    }
}
