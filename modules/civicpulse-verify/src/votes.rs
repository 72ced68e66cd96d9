//! Vote-casting state machine.
//!
//! Each (issue, user) pair is in one of three states: no vote, upvoted,
//! downvoted. Casting the same type again retracts ("toggle off"); casting
//! the other type flips. The transition function is pure — the service
//! layer turns the result into vote-row writes and count updates.

use civicpulse_common::VoteType;

/// What happened to the (issue, user) vote pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteTransition {
    /// First vote by this user on this issue — create the vote row.
    Cast,
    /// Same type resubmitted — delete the vote row.
    Retracted,
    /// Opposite type resubmitted — update the vote row's type.
    Flipped,
}

/// Next counts plus the resulting per-user vote state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoteUpdate {
    pub transition: VoteTransition,
    pub upvotes: u32,
    pub downvotes: u32,
    /// The pair's vote after the transition; `None` after a retraction.
    pub vote: Option<VoteType>,
}

/// Apply one vote cast to the current state. Decrements saturate at zero
/// so a stale counter can never underflow.
pub fn apply_vote(
    existing: Option<VoteType>,
    cast: VoteType,
    upvotes: u32,
    downvotes: u32,
) -> VoteUpdate {
    match existing {
        None => match cast {
            VoteType::Upvote => VoteUpdate {
                transition: VoteTransition::Cast,
                upvotes: upvotes + 1,
                downvotes,
                vote: Some(VoteType::Upvote),
            },
            VoteType::Downvote => VoteUpdate {
                transition: VoteTransition::Cast,
                upvotes,
                downvotes: downvotes + 1,
                vote: Some(VoteType::Downvote),
            },
        },
        Some(current) if current == cast => match cast {
            VoteType::Upvote => VoteUpdate {
                transition: VoteTransition::Retracted,
                upvotes: upvotes.saturating_sub(1),
                downvotes,
                vote: None,
            },
            VoteType::Downvote => VoteUpdate {
                transition: VoteTransition::Retracted,
                upvotes,
                downvotes: downvotes.saturating_sub(1),
                vote: None,
            },
        },
        Some(_) => match cast {
            VoteType::Upvote => VoteUpdate {
                transition: VoteTransition::Flipped,
                upvotes: upvotes + 1,
                downvotes: downvotes.saturating_sub(1),
                vote: Some(VoteType::Upvote),
            },
            VoteType::Downvote => VoteUpdate {
                transition: VoteTransition::Flipped,
                upvotes: upvotes.saturating_sub(1),
                downvotes: downvotes + 1,
                vote: Some(VoteType::Downvote),
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_upvote_creates() {
        let u = apply_vote(None, VoteType::Upvote, 2, 1);
        assert_eq!(u.transition, VoteTransition::Cast);
        assert_eq!((u.upvotes, u.downvotes), (3, 1));
        assert_eq!(u.vote, Some(VoteType::Upvote));
    }

    #[test]
    fn first_downvote_creates() {
        let u = apply_vote(None, VoteType::Downvote, 2, 1);
        assert_eq!(u.transition, VoteTransition::Cast);
        assert_eq!((u.upvotes, u.downvotes), (2, 2));
    }

    #[test]
    fn repeat_upvote_retracts() {
        let u = apply_vote(Some(VoteType::Upvote), VoteType::Upvote, 3, 1);
        assert_eq!(u.transition, VoteTransition::Retracted);
        assert_eq!((u.upvotes, u.downvotes), (2, 1));
        assert_eq!(u.vote, None);
    }

    #[test]
    fn repeat_downvote_retracts() {
        let u = apply_vote(Some(VoteType::Downvote), VoteType::Downvote, 3, 1);
        assert_eq!(u.transition, VoteTransition::Retracted);
        assert_eq!((u.upvotes, u.downvotes), (3, 0));
    }

    #[test]
    fn upvote_to_downvote_flips() {
        let u = apply_vote(Some(VoteType::Upvote), VoteType::Downvote, 3, 1);
        assert_eq!(u.transition, VoteTransition::Flipped);
        assert_eq!((u.upvotes, u.downvotes), (2, 2));
        assert_eq!(u.vote, Some(VoteType::Downvote));
    }

    #[test]
    fn downvote_to_upvote_flips() {
        let u = apply_vote(Some(VoteType::Downvote), VoteType::Upvote, 3, 1);
        assert_eq!(u.transition, VoteTransition::Flipped);
        assert_eq!((u.upvotes, u.downvotes), (4, 0));
    }

    #[test]
    fn toggle_cycle_returns_to_start() {
        // up, up (off), up again — counts end one above start, state upvoted
        let a = apply_vote(None, VoteType::Upvote, 5, 2);
        let b = apply_vote(a.vote, VoteType::Upvote, a.upvotes, a.downvotes);
        assert_eq!((b.upvotes, b.downvotes), (5, 2));
        assert_eq!(b.vote, None);
        let c = apply_vote(b.vote, VoteType::Upvote, b.upvotes, b.downvotes);
        assert_eq!((c.upvotes, c.downvotes), (6, 2));
        assert_eq!(c.vote, Some(VoteType::Upvote));
    }

    #[test]
    fn stale_zero_counter_never_underflows() {
        let u = apply_vote(Some(VoteType::Upvote), VoteType::Upvote, 0, 0);
        assert_eq!((u.upvotes, u.downvotes), (0, 0));
        let f = apply_vote(Some(VoteType::Downvote), VoteType::Upvote, 0, 0);
        assert_eq!((f.upvotes, f.downvotes), (1, 0));
    }
}
