//! Record Vote Use Case

use crate::domain::entities::Vote;
use crate::domain::repository::VoteRepository;
use crate::domain::services::admit_vote;
use crate::error::PollResult;
use chrono::{DateTime, Utc};
use kernel::id::{PollId, PollOptionId, VoteId};
use std::sync::Arc;

/// Input DTO for record vote
#[derive(Debug, Clone, Copy)]
pub struct RecordVoteInput {
    pub poll_id: PollId,
    pub option_id: PollOptionId,
}

/// Record Vote Use Case
///
/// Single-shot: no internal retry. A transient store error is returned
/// as is and the caller decides whether to try again.
pub struct RecordVoteUseCase<V>
where
    V: VoteRepository,
{
    vote_repo: Arc<V>,
}

impl<V> RecordVoteUseCase<V>
where
    V: VoteRepository,
{
    pub fn new(vote_repo: Arc<V>) -> Self {
        Self { vote_repo }
    }

    pub async fn execute(&self, input: RecordVoteInput) -> PollResult<VoteId> {
        self.execute_at(input, Utc::now()).await
    }

    /// Vote as of `now`; the poll must expire strictly after it
    pub async fn execute_at(&self, input: RecordVoteInput, now: DateTime<Utc>) -> PollResult<VoteId> {
        let vote = Vote::new(input.poll_id, input.option_id, now);
        let admission = self.vote_repo.record(&vote, now).await?;

        if let Err(e) = admit_vote(admission) {
            tracing::warn!(
                poll_id = %input.poll_id,
                option_id = %input.option_id,
                error = %e,
                "Vote rejected"
            );
            return Err(e);
        }

        tracing::info!(
            poll_id = %vote.poll_id,
            option_id = %vote.option_id,
            vote_id = %vote.id,
            "Vote recorded"
        );

        Ok(vote.id)
    }
}
