//! Per-user prompt and image history, including the cascading delete.

use cineprompt_shared::constants::{
    favorites_key, image_history_key, prompt_history_key, KEY_GLOBAL_VOTES, KEY_PUBLISHED_IMAGES,
};
use tracing::{debug, info};

use crate::models::{ImageHistoryItem, PromptHistoryItem};
use crate::store::{Batch, LocalStore};

impl LocalStore {
    /// Newest-first prompt history of the active user.
    pub fn prompt_history(&self) -> &[PromptHistoryItem] {
        self.session_email()
            .and_then(|email| self.prompt_histories.get(email))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Newest-first image history of the active user.
    pub fn image_history(&self) -> &[ImageHistoryItem] {
        self.session_email()
            .and_then(|email| self.image_histories.get(email))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Prepend a prompt, dropping the oldest entries beyond the cap.
    pub fn add_prompt_history(&mut self, item: PromptHistoryItem) {
        let Some(email) = self.acting_email("add_prompt_history") else {
            return;
        };
        let mut history = Vec::with_capacity(self.limits.max_prompt_history);
        history.push(item);
        history.extend(self.prompt_history().iter().cloned());
        history.truncate(self.limits.max_prompt_history);

        self.commit(Batch::new().put(prompt_history_key(&email), &history));
        self.prompt_histories.insert(email, history);
    }

    /// Prepend a generated image, dropping the oldest entries beyond the cap.
    pub fn add_image_history(&mut self, item: ImageHistoryItem) {
        let Some(email) = self.acting_email("add_image_history") else {
            return;
        };
        debug!(id = %item.id, "image added to history");
        let mut history = Vec::with_capacity(self.limits.max_image_history);
        history.push(item);
        history.extend(self.image_history().iter().cloned());
        history.truncate(self.limits.max_image_history);

        self.commit(Batch::new().put(image_history_key(&email), &history));
        self.image_histories.insert(email, history);
    }

    /// Delete an image from the active user's history and every record that
    /// references it: the published list, all votes and tallies, and every
    /// user's favorites.
    pub fn delete_image_history(&mut self, id: &str) {
        let Some(email) = self.acting_email("delete_image_history") else {
            return;
        };

        let history: Vec<ImageHistoryItem> = self
            .image_history()
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        let mut batch = Batch::new().put(image_history_key(&email), &history);

        let published_before = self.published.len();
        let published: Vec<_> = self
            .published
            .iter()
            .filter(|p| p.id() != id)
            .cloned()
            .collect();
        if published.len() != published_before {
            batch = batch.put(KEY_PUBLISHED_IMAGES, &published);
        }

        let mut votes = self.votes.clone();
        votes.vote_data.remove(id);
        for ledger in votes.user_votes.values_mut() {
            ledger.remove(id);
        }
        batch = batch.put(KEY_GLOBAL_VOTES, &votes);

        let mut favorites = self.favorites.clone();
        for (owner, ids) in favorites.iter_mut() {
            let before = ids.len();
            ids.retain(|fav| fav != id);
            if ids.len() != before {
                batch = batch.put(favorites_key(owner), &*ids);
            }
        }

        self.commit(batch);
        self.image_histories.insert(email, history);
        self.published = published;
        self.votes = votes;
        self.favorites = favorites;

        info!(id, "image deleted with cascade");
    }

    /// Empty the prompt history and drop every image that is not currently
    /// published.  Votes and favorites of kept images are left alone.
    pub fn clear_prompt_and_image_history(&mut self) {
        let Some(email) = self.acting_email("clear_prompt_and_image_history") else {
            return;
        };

        let kept: Vec<ImageHistoryItem> = self
            .image_history()
            .iter()
            .filter(|item| self.is_published(&item.id))
            .cloned()
            .collect();

        self.commit(
            Batch::new()
                .remove(prompt_history_key(&email))
                .put(image_history_key(&email), &kept),
        );
        self.prompt_histories.remove(&email);
        info!(kept = kept.len(), "history cleared");
        self.image_histories.insert(email, kept);
    }
}
