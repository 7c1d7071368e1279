//! Like / dislike reactions on published images.

use std::collections::BTreeMap;

use cineprompt_shared::constants::KEY_GLOBAL_VOTES;
use cineprompt_shared::VoteKind;
use tracing::debug;

use crate::models::VoteTally;
use crate::store::{Batch, LocalStore};

impl LocalStore {
    /// Cast, switch or retract the active user's vote on `image_id`.
    ///
    /// Voting the same kind twice retracts it; voting the other kind moves the
    /// vote.  Returns the user's vote after the call.
    pub fn vote(&mut self, image_id: &str, kind: VoteKind) -> Option<VoteKind> {
        let email = self.acting_email("vote")?;

        let mut votes = self.votes.clone();
        let ledger = votes.user_votes.entry(email).or_default();
        let previous = ledger.get(image_id).copied();
        let tally = votes.vote_data.entry(image_id.to_string()).or_default();

        let current = match previous {
            Some(prev) if prev == kind => {
                tally.retract(kind);
                ledger.remove(image_id);
                None
            }
            Some(prev) => {
                tally.retract(prev);
                tally.cast(kind);
                ledger.insert(image_id.to_string(), kind);
                Some(kind)
            }
            None => {
                tally.cast(kind);
                ledger.insert(image_id.to_string(), kind);
                Some(kind)
            }
        };

        self.commit(Batch::new().put(KEY_GLOBAL_VOTES, &votes));
        self.votes = votes;
        debug!(image_id, ?previous, ?current, "vote recorded");
        current
    }

    /// Likes and dislikes recorded for `image_id`.
    pub fn tally(&self, image_id: &str) -> VoteTally {
        self.votes
            .vote_data
            .get(image_id)
            .copied()
            .unwrap_or_default()
    }

    /// The active user's vote on `image_id`.
    pub fn vote_of(&self, image_id: &str) -> Option<VoteKind> {
        self.session_email()
            .and_then(|email| self.votes.user_votes.get(email))
            .and_then(|ledger| ledger.get(image_id))
            .copied()
    }

    /// Every vote the active user has cast, keyed by image id.
    pub fn user_votes(&self) -> BTreeMap<String, VoteKind> {
        self.session_email()
            .and_then(|email| self.votes.user_votes.get(email))
            .cloned()
            .unwrap_or_default()
    }
}
