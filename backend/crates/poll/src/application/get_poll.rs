//! Get Poll Use Case

use crate::domain::entities::Poll;
use crate::domain::repository::PollRepository;
use crate::error::{PollError, PollResult};
use kernel::id::PollId;
use std::sync::Arc;

/// Get Poll Use Case (public read, no counts)
pub struct GetPollUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
}

impl<P> GetPollUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>) -> Self {
        Self { poll_repo }
    }

    pub async fn execute(&self, poll_id: PollId) -> PollResult<Poll> {
        self.poll_repo
            .find_with_options(poll_id)
            .await?
            .ok_or(PollError::PollNotFound)
    }
}
