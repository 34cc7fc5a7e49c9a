//! Language change notifications.

use tokio::sync::broadcast;

use crate::types::LanguageCode;

/// Broadcast after every effective language switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    pub language: LanguageCode,
    pub previous: LanguageCode,
}

/// Fan-out of [`LanguageChanged`] to any number of independent listeners.
///
/// Listeners that fall more than the channel capacity behind lose the oldest
/// notifications; only the latest language matters to them.
#[derive(Debug, Clone)]
pub struct LanguageEvents {
    sender: broadcast::Sender<LanguageChanged>,
}

impl LanguageEvents {
    const CAPACITY: usize = 16;

    /// Channel without listeners.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(Self::CAPACITY);
        Self { sender }
    }

    /// New listener; it only sees changes sent after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.sender.subscribe()
    }

    /// Receivers currently subscribed.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Returns the number of listeners reached.
    pub(crate) fn publish(&self, event: LanguageChanged) -> usize {
        if let Ok(reached) = self.sender.send(event) {
            reached
        } else {
            tracing::debug!("Language changed with no listeners");
            0
        }
    }
}

impl Default for LanguageEvents {
    fn default() -> Self {
        Self::new()
    }
}
