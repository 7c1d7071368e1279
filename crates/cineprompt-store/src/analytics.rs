//! Profile figures: likes and dislikes received on published images,
//! votes given, followers and following.

use cineprompt_shared::VoteKind;

use crate::models::ProfileAnalytics;
use crate::store::LocalStore;

impl LocalStore {
    /// Profile figures for the active user, or `None` without a session.
    pub fn profile_analytics(&self) -> Option<ProfileAnalytics> {
        let user = self.current_user()?;

        let (likes_received, dislikes_received) = self
            .published_by(&user.email)
            .iter()
            .map(|p| self.tally(p.id()))
            .fold((0u32, 0u32), |(l, d), t| {
                (l.saturating_add(t.likes), d.saturating_add(t.dislikes))
            });

        let given = self.user_votes();
        let count = |kind: VoteKind| given.values().filter(|&&v| v == kind).count();

        Some(ProfileAnalytics {
            last_login: user.last_login_date,
            creations: self.image_history().len(),
            likes_received,
            dislikes_received,
            likes_given: count(VoteKind::Like),
            dislikes_given: count(VoteKind::Dislike),
            followers: self.followers_of(&user.email),
            following: self.social_of(&user.email).following.len(),
        })
    }
}
