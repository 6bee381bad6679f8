//! Domain Entities
//!
//! Core business entities for the poll domain.

use chrono::{DateTime, Utc};
use kernel::id::{PollId, PollOptionId, UserId, VoteId};

use crate::domain::value_objects::{NewPoll, OptionText, Question};

/// Poll entity - a question with a fixed option set and an expiry instant
#[derive(Debug, Clone)]
pub struct Poll {
    pub id: PollId,
    pub owner_id: UserId,
    pub question: Question,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Ordered by position
    pub options: Vec<PollOption>,
}

impl Poll {
    /// Build a poll with fresh IDs; option positions come from validation
    pub fn new(new_poll: NewPoll, created_at: DateTime<Utc>) -> Self {
        let id = PollId::new();
        let options = new_poll
            .options
            .into_iter()
            .map(|(position, text)| PollOption {
                id: PollOptionId::new(),
                poll_id: id,
                text,
                position,
            })
            .collect();

        Self {
            id,
            owner_id: new_poll.owner_id,
            question: new_poll.question,
            created_at,
            expires_at: new_poll.expires_at.instant(),
            options,
        }
    }

    /// A poll stops accepting votes at its expiry instant, inclusive
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn has_option(&self, option_id: PollOptionId) -> bool {
        self.options.iter().any(|option| option.id == option_id)
    }
}

/// PollOption entity - one fixed choice of a poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOption {
    pub id: PollOptionId,
    pub poll_id: PollId,
    pub text: OptionText,
    /// Zero-based, contiguous per poll
    pub position: i16,
}

/// Vote entity - immutable record of one cast vote
#[derive(Debug, Clone)]
pub struct Vote {
    pub id: VoteId,
    pub poll_id: PollId,
    pub option_id: PollOptionId,
    pub voted_at: DateTime<Utc>,
}

impl Vote {
    /// Each attempt gets its own ID, so a retried attempt can never collide
    /// with a committed one.
    pub fn new(poll_id: PollId, option_id: PollOptionId, now: DateTime<Utc>) -> Self {
        Self {
            id: VoteId::new(),
            poll_id,
            option_id,
            voted_at: now,
        }
    }
}

/// Owner view of a poll with per-option vote counts
#[derive(Debug, Clone)]
pub struct PollTally {
    pub id: PollId,
    pub owner_id: UserId,
    pub question: Question,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Ordered by position
    pub options: Vec<OptionTally>,
}

impl PollTally {
    pub fn total_votes(&self) -> i64 {
        self.options.iter().map(|option| option.vote_count).sum()
    }

    pub fn count_for(&self, option_id: PollOptionId) -> Option<i64> {
        self.options
            .iter()
            .find(|option| option.id == option_id)
            .map(|option| option.vote_count)
    }
}

/// One option of a [`PollTally`] with its aggregated count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionTally {
    pub id: PollOptionId,
    pub poll_id: PollId,
    pub text: OptionText,
    pub position: i16,
    pub vote_count: i64,
}
