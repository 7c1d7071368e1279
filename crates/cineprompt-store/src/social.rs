//! Follow and block edges between users.

use cineprompt_shared::constants::KEY_SOCIAL_DATA;
use cineprompt_shared::types::normalize_email;
use tracing::info;

use crate::models::SocialEdges;
use crate::store::{Batch, LocalStore};

/// Which list of [`SocialEdges`] an operation toggles.
#[derive(Clone, Copy)]
enum Edge {
    Follow,
    Block,
}

impl LocalStore {
    /// Toggle following `target`.  Returns `true` when the active user
    /// follows `target` afterwards.
    pub fn follow(&mut self, target: &str) -> bool {
        self.toggle_edge(target, Edge::Follow)
    }

    /// Toggle blocking `target`.  Blocking also unfollows.  Returns `true`
    /// when `target` is blocked afterwards.
    pub fn block(&mut self, target: &str) -> bool {
        self.toggle_edge(target, Edge::Block)
    }

    /// Outgoing edges of `email`.
    pub fn social_of(&self, email: &str) -> SocialEdges {
        self.edges_of(email).cloned().unwrap_or_default()
    }

    pub fn is_following(&self, target: &str) -> bool {
        self.session_email()
            .and_then(|me| self.edges_of(me))
            .is_some_and(|edges| contains(&edges.following, target))
    }

    pub fn is_blocked(&self, target: &str) -> bool {
        self.session_email()
            .and_then(|me| self.edges_of(me))
            .is_some_and(|edges| contains(&edges.blocked, target))
    }

    /// Number of users whose `following` list contains `email`.
    pub fn followers_of(&self, email: &str) -> usize {
        self.social
            .values()
            .filter(|edges| contains(&edges.following, email))
            .count()
    }

    fn edges_of(&self, email: &str) -> Option<&SocialEdges> {
        let wanted = normalize_email(email);
        self.social
            .iter()
            .find(|(owner, _)| normalize_email(owner) == wanted)
            .map(|(_, edges)| edges)
    }

    fn toggle_edge(&mut self, target: &str, edge: Edge) -> bool {
        let op = match edge {
            Edge::Follow => "follow",
            Edge::Block => "block",
        };
        let Some(me) = self.acting_email(op) else {
            return false;
        };
        let target = target.trim();
        if normalize_email(target) == normalize_email(&me) {
            tracing::debug!(op, "ignoring edge to self");
            return false;
        }

        let mut social = self.social.clone();
        let edges = social.entry(me).or_default();
        let list = match edge {
            Edge::Follow => &mut edges.following,
            Edge::Block => &mut edges.blocked,
        };
        let before = list.len();
        list.retain(|e| normalize_email(e) != normalize_email(target));
        let active = list.len() == before;
        if active {
            list.push(target.to_string());
            if let Edge::Block = edge {
                edges
                    .following
                    .retain(|e| normalize_email(e) != normalize_email(target));
            }
        }

        self.commit(Batch::new().put(KEY_SOCIAL_DATA, &social));
        self.social = social;
        info!(op, peer = target, active, "social edge toggled");
        active
    }
}

fn contains(list: &[String], email: &str) -> bool {
    let wanted = normalize_email(email);
    list.iter().any(|e| normalize_email(e) == wanted)
}
