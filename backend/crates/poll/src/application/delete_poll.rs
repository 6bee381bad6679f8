//! Delete Poll Use Case

use crate::domain::repository::PollRepository;
use crate::domain::services::resolve_deletion;
use crate::error::PollResult;
use kernel::id::{PollId, UserId};
use std::sync::Arc;

/// Delete Poll Use Case
pub struct DeletePollUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> DeletePollUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    /// Delete a poll owned by `requester`; options and votes cascade
    pub async fn execute(&self, poll_id: PollId, requester: UserId) -> PollResult<()> {
        let deletion = self.poll_repo.delete_owned(poll_id, requester).await?;

        if let Err(e) = resolve_deletion(deletion) {
            tracing::warn!(poll_id = %poll_id, requester = %requester, error = %e, "Poll delete rejected");
            return Err(e);
        }

        tracing::info!(poll_id = %poll_id, "Poll deleted");
        Ok(())
    }
}
