//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Every method is one atomic unit against the store: implementations must
//! not split a method into several independently committed steps.

use crate::domain::entities::{Poll, PollTally, Vote};
use crate::domain::services::{PollDeletion, VoteAdmission};
use crate::error::PollResult;
use chrono::{DateTime, Utc};
use kernel::id::{PollId, UserId};

/// Poll repository trait
#[trait_variant::make(PollRepository: Send)]
pub trait LocalPollRepository {
    /// Persist a poll and all of its options, all or nothing
    async fn create_with_options(&self, poll: &Poll) -> PollResult<()>;

    /// Delete the poll only if `requester` owns it, reporting what was seen
    async fn delete_owned(&self, poll_id: PollId, requester: UserId) -> PollResult<PollDeletion>;

    /// Get a poll with its options ordered by position
    async fn find_with_options(&self, poll_id: PollId) -> PollResult<Option<Poll>>;

    /// All polls of an owner, newest first, with per-option vote counts
    async fn find_by_owner_with_tally(&self, owner_id: UserId) -> PollResult<Vec<PollTally>>;
}

/// Vote repository trait
#[trait_variant::make(VoteRepository: Send)]
pub trait LocalVoteRepository {
    /// Insert `vote` only if its poll exists, is active at `now` and owns
    /// the option, reporting what was seen
    async fn record(&self, vote: &Vote, now: DateTime<Utc>) -> PollResult<VoteAdmission>;
}
