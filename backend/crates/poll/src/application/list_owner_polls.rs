//! List Owner Polls Use Case

use crate::domain::entities::PollTally;
use crate::domain::repository::PollRepository;
use crate::error::PollResult;
use kernel::id::UserId;
use std::sync::Arc;

/// List Owner Polls Use Case (owner dashboard with vote counts)
pub struct ListOwnerPollsUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> ListOwnerPollsUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    /// Point-in-time snapshot, newest poll first
    pub async fn execute(&self, owner_id: UserId) -> PollResult<Vec<PollTally>> {
        let polls = self.poll_repo.find_by_owner_with_tally(owner_id).await?;
        tracing::debug!(owner_id = %owner_id, polls = polls.len(), "Listed owner polls");
        Ok(polls)
    }
}
