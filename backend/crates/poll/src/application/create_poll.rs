//! Create Poll Use Case

use crate::application::config::PollConfig;
use crate::domain::entities::Poll;
use crate::domain::repository::PollRepository;
use crate::domain::value_objects::NewPoll;
use crate::error::PollResult;
use chrono::{DateTime, Utc};
use kernel::id::UserId;
use std::sync::Arc;

/// Input DTO for create poll
#[derive(Debug, Clone)]
pub struct CreatePollInput {
    pub owner_id: UserId,
    pub question: String,
    pub expires_at: DateTime<Utc>,
    pub options: Vec<String>,
}

/// Create Poll Use Case
pub struct CreatePollUseCase<P>
where
    P: PollRepository,
{
    poll_repo: Arc<P>,
    config: Arc<PollConfig>,
}

impl<P> CreatePollUseCase<P>
where
    P: PollRepository,
{
    pub fn new(poll_repo: Arc<P>, config: Arc<PollConfig>) -> Self {
        Self { poll_repo, config }
    }

    pub async fn execute(&self, input: CreatePollInput) -> PollResult<Poll> {
        self.execute_at(input, Utc::now()).await
    }

    /// Create with an explicit creation instant
    pub async fn execute_at(&self, input: CreatePollInput, now: DateTime<Utc>) -> PollResult<Poll> {
        let new_poll = NewPoll::parse(
            input.owner_id,
            input.question,
            input.options,
            input.expires_at,
            now,
            &self.config.limits,
        )?;

        let poll = Poll::new(new_poll, now);
        self.poll_repo.create_with_options(&poll).await?;

        tracing::info!(
            poll_id = %poll.id,
            owner_id = %poll.owner_id,
            options = poll.options.len(),
            expires_at = %poll.expires_at,
            "Poll created"
        );

        Ok(poll)
    }
}
