//! Favorites, publishing and the community feed.

use std::collections::HashMap;

use cineprompt_shared::constants::{favorites_key, KEY_PUBLISHED_IMAGES};
use cineprompt_shared::curated::{curated_image, CURATED_GALLERY};
use cineprompt_shared::types::normalize_email;
use tracing::{debug, info};

use crate::models::{FeedOrder, ImageHistoryItem, PublishedImage};
use crate::store::{Batch, LocalStore};

impl LocalStore {
    // ------------------------------------------------------------------
    // Favorites
    // ------------------------------------------------------------------

    /// Favorite ids of the active user, in the order they were added.
    pub fn favorites(&self) -> &[String] {
        self.session_email()
            .and_then(|email| self.favorites.get(email))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_favorite(&self, image_id: &str) -> bool {
        self.favorites().iter().any(|id| id == image_id)
    }

    /// Add or remove `image_id` from the active user's favorites.
    /// Returns `true` when the image is a favorite afterwards.
    pub fn toggle_favorite(&mut self, image_id: &str) -> bool {
        let Some(email) = self.acting_email("toggle_favorite") else {
            return false;
        };

        let mut ids = self.favorites().to_vec();
        let favorited = match ids.iter().position(|id| id == image_id) {
            Some(pos) => {
                ids.remove(pos);
                false
            }
            None => {
                ids.push(image_id.to_string());
                true
            }
        };

        self.commit(Batch::new().put(favorites_key(&email), &ids));
        self.favorites.insert(email, ids);
        debug!(image_id, favorited, "favorite toggled");
        favorited
    }

    /// Favorites resolved to images, looking in the active user's history
    /// first, then the published list, then the curated gallery.  Unknown ids
    /// are skipped.
    pub fn favorite_images(&self) -> Vec<ImageHistoryItem> {
        self.favorites()
            .iter()
            .filter_map(|id| {
                self.image_history()
                    .iter()
                    .find(|item| &item.id == id)
                    .or_else(|| {
                        self.published
                            .iter()
                            .find(|p| p.id() == id)
                            .map(|p| &p.image)
                    })
                    .cloned()
                    .or_else(|| curated_image(id).map(|c| PublishedImage::from(c).image))
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Publishing
    // ------------------------------------------------------------------

    /// Share `item` to the community gallery, or withdraw it if it is already
    /// there.  Returns `true` when the image is published afterwards.
    pub fn publish_toggle(&mut self, item: &ImageHistoryItem) -> bool {
        let Some(user) = self.current_user().cloned() else {
            debug!(op = "publish_toggle", "no active session, ignoring");
            return false;
        };

        let mut published = self.published.clone();
        let before = published.len();
        published.retain(|p| p.id() != item.id);
        let now_published = published.len() == before;
        if now_published {
            published.insert(
                0,
                PublishedImage {
                    image: item.clone(),
                    creator_email: user.email,
                    creator_nickname: user.nickname,
                },
            );
        }

        self.commit(Batch::new().put(KEY_PUBLISHED_IMAGES, &published));
        self.published = published;
        info!(id = %item.id, published = now_published, "publish toggled");
        now_published
    }

    /// Every published image, most recent first.
    pub fn published_images(&self) -> &[PublishedImage] {
        &self.published
    }

    pub fn is_published(&self, image_id: &str) -> bool {
        self.published.iter().any(|p| p.id() == image_id)
    }

    /// Published images followed by the curated gallery, in the requested
    /// order.  A repeated id keeps the position of its first occurrence and
    /// the record of its last.
    pub fn community_feed(&self, order: FeedOrder) -> Vec<PublishedImage> {
        let combined = self
            .published
            .iter()
            .cloned()
            .chain(CURATED_GALLERY.iter().map(PublishedImage::from));

        let mut slots: HashMap<String, usize> = HashMap::new();
        let mut feed: Vec<PublishedImage> = Vec::new();
        for image in combined {
            match slots.get(image.id()) {
                Some(&slot) => feed[slot] = image,
                None => {
                    slots.insert(image.id().to_string(), feed.len());
                    feed.push(image);
                }
            }
        }

        if order == FeedOrder::MostLiked {
            // Stable, so equal counts keep publication order.
            feed.sort_by_key(|p| std::cmp::Reverse(self.tally(p.id()).likes));
        }
        feed
    }

    /// Images published by `email`, ignoring case.
    pub fn published_by(&self, email: &str) -> Vec<PublishedImage> {
        let wanted = normalize_email(email);
        self.published
            .iter()
            .filter(|p| normalize_email(&p.creator_email) == wanted)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use cineprompt_shared::curated::CURATED_GALLERY;
    use cineprompt_shared::VoteKind;

    use crate::models::{FeedOrder, ImageHistoryItem, PublishedImage};
    use crate::test_support::{act_as, email, store_on};

    fn image(id: &str) -> ImageHistoryItem {
        ImageHistoryItem {
            id: id.to_string(),
            image_url: format!("https://cdn.example.com/{id}.png"),
            prompt: format!("prompt for {id}"),
        }
    }

    fn ids(feed: &[PublishedImage]) -> Vec<&str> {
        feed.iter().map(PublishedImage::id).collect()
    }

    #[test]
    fn favorite_toggle_is_an_involution() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");

        assert!(store.toggle_favorite("img1"));
        assert!(store.is_favorite("img1"));
        assert!(!store.toggle_favorite("img1"));
        assert!(store.favorites().is_empty());
    }

    #[test]
    fn favorites_keep_insertion_order() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");

        store.toggle_favorite("first");
        store.toggle_favorite("second");
        assert_eq!(store.favorites(), &["first".to_string(), "second".to_string()]);

        // Re-adding moves an id to the end.
        store.toggle_favorite("first");
        store.toggle_favorite("first");
        assert_eq!(store.favorites(), &["second".to_string(), "first".to_string()]);
    }

    #[test]
    fn favorites_are_per_user() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.toggle_favorite("img1");

        act_as(&mut store, "bo");
        assert!(!store.is_favorite("img1"));
    }

    #[test]
    fn favorites_without_session_do_nothing() {
        let mut store = store_on(17);
        assert!(!store.toggle_favorite("img1"));
        assert!(store.favorites.is_empty());
    }

    #[test]
    fn publish_stamps_creator_and_prepends() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");

        assert!(store.publish_toggle(&image("img1")));
        assert!(store.publish_toggle(&image("img2")));

        let published = store.published_images();
        assert_eq!(ids(published), vec!["img2", "img1"]);
        assert_eq!(published[0].creator_email, email("ana"));
        assert_eq!(published[0].creator_nickname, "ana");
    }

    #[test]
    fn publish_twice_withdraws() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");

        store.publish_toggle(&image("img1"));
        assert!(!store.publish_toggle(&image("img1")));
        assert!(!store.is_published("img1"));
        assert!(store.published_images().is_empty());
    }

    #[test]
    fn feed_orders_by_likes_with_stable_ties() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        for id in ["a", "b", "c"] {
            store.publish_toggle(&image(id));
        }
        // Published order is now c, b, a.
        act_as(&mut store, "bo");
        store.vote("a", VoteKind::Like);
        act_as(&mut store, "cy");
        store.vote("a", VoteKind::Like);
        store.vote("b", VoteKind::Like);

        let latest = store.community_feed(FeedOrder::Latest);
        assert_eq!(ids(&latest[..3]), vec!["c", "b", "a"]);
        assert_eq!(ids(&latest[3..4]), vec!["static-1"]);

        // Unvoted curated images tie at zero and stay behind "c".
        let liked = store.community_feed(FeedOrder::MostLiked);
        assert_eq!(ids(&liked[..4]), vec!["a", "b", "c", "static-1"]);
    }

    #[test]
    fn feed_keeps_first_position_and_last_record_of_duplicates() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.publish_toggle(&image("a"));
        store.publish_toggle(&image("b"));
        let mut dup = store.published[0].clone();
        dup.creator_nickname = "someone else".into();
        store.published.push(dup);

        let feed = store.community_feed(FeedOrder::Latest);
        assert_eq!(feed.len(), 2 + CURATED_GALLERY.len());
        assert_eq!(ids(&feed[..2]), vec!["b", "a"]);
        assert_eq!(feed[0].creator_nickname, "someone else");
    }

    #[test]
    fn feed_appends_curated_gallery() {
        let store = store_on(17);
        let feed = store.community_feed(FeedOrder::Latest);

        assert_eq!(feed.len(), CURATED_GALLERY.len());
        assert_eq!(feed[0].id(), "static-1");
        assert_eq!(feed[7].id(), "static-8");
        assert!(feed.iter().all(|p| p.creator_email == "system@cinematic.ai"));
        assert!(feed.iter().all(|p| p.creator_nickname == "CinematicAI"));
    }

    #[test]
    fn curated_images_can_be_liked_and_lead_the_ranking() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.publish_toggle(&image("mine"));
        store.vote("static-5", VoteKind::Like);

        let feed = store.community_feed(FeedOrder::MostLiked);
        assert_eq!(ids(&feed[..2]), vec!["static-5", "mine"]);
    }

    #[test]
    fn favorite_images_resolve_from_history_then_gallery() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.publish_toggle(&image("shared"));

        act_as(&mut store, "bo");
        store.add_image_history(image("mine"));
        store.toggle_favorite("shared");
        store.toggle_favorite("mine");
        store.toggle_favorite("gone");

        let resolved: Vec<String> = store.favorite_images().into_iter().map(|i| i.id).collect();
        assert_eq!(resolved, vec!["shared".to_string(), "mine".to_string()]);
    }

    #[test]
    fn favorite_images_fall_back_to_curated_gallery() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.toggle_favorite("static-2");

        let resolved = store.favorite_images();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id, "static-2");
        assert!(resolved[0].prompt.contains("wooden cabin"));
    }

    #[test]
    fn own_history_shadows_a_curated_id() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.add_image_history(image("static-3"));
        store.toggle_favorite("static-3");

        assert_eq!(store.favorite_images()[0].prompt, "prompt for static-3");
    }

    #[test]
    fn published_by_filters_creator() {
        let mut store = store_on(17);
        act_as(&mut store, "ana");
        store.publish_toggle(&image("a1"));
        act_as(&mut store, "bo");
        store.publish_toggle(&image("b1"));

        assert_eq!(ids(&store.published_by("ANA@example.com")), vec!["a1"]);
        assert!(store.published_by("nobody@example.com").is_empty());
    }
}
