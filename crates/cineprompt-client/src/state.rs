//! Application state shared by every client workflow.

use cineprompt_store::{LocalStore, PromptHistoryItem};

/// Central application state.
///
/// Owns the [`LocalStore`] for the lifetime of the process, plus UI-level
/// scratch state that is never persisted.
pub struct AppState {
    /// The single authority over persisted data.
    pub store: LocalStore,

    /// A history entry the user picked for another run through the
    /// generator.  Consumed once by [`AppState::take_item_to_reuse`].
    item_to_reuse: Option<PromptHistoryItem>,
}

impl AppState {
    pub fn new(store: LocalStore) -> Self {
        Self {
            store,
            item_to_reuse: None,
        }
    }

    /// Queue `item` so the generator opens pre-filled with its fields.
    pub fn reuse_history_item(&mut self, item: PromptHistoryItem) {
        tracing::debug!(id = %item.id, "history item queued for reuse");
        self.item_to_reuse = Some(item);
    }

    /// Hand out the queued item, leaving the slot empty.
    pub fn take_item_to_reuse(&mut self) -> Option<PromptHistoryItem> {
        self.item_to_reuse.take()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LocalStore::detached())
    }
}
