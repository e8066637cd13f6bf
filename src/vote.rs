//! The vote state machine shared by the listing and detail views.
//!
//! A user holds at most one vote per meme. Repeating a vote clears it and
//! voting the other way switches it. The counters move so that each counter
//! includes exactly one contribution from the user when `UserVote` says so.

use serde::{Deserialize, Serialize};

/// The acting user's current vote on a meme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserVote {
    #[default]
    None,
    Up,
    Down,
}

/// A vote the user asks to cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Up,
    Down,
}

impl From<VoteDirection> for UserVote {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => UserVote::Up,
            VoteDirection::Down => UserVote::Down,
        }
    }
}

/// New vote state plus the signed counter deltas to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteTransition {
    pub next: UserVote,
    pub upvotes_delta: i64,
    pub downvotes_delta: i64,
}

pub fn transition(current: UserVote, requested: VoteDirection) -> VoteTransition {
    use UserVote as V;
    use VoteDirection as D;

    let (next, upvotes_delta, downvotes_delta) = match (current, requested) {
        (V::None, D::Up) => (V::Up, 1, 0),
        (V::None, D::Down) => (V::Down, 0, 1),
        (V::Up, D::Up) => (V::None, -1, 0),
        (V::Down, D::Down) => (V::None, 0, -1),
        (V::Up, D::Down) => (V::Down, -1, 1),
        (V::Down, D::Up) => (V::Up, 1, -1),
    };

    VoteTransition { next, upvotes_delta, downvotes_delta }
}
