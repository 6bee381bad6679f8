//! In-Memory Repository Implementation
//!
//! Same contracts as the PostgreSQL repository, with every method running
//! inside one write (or read) section of a single lock. Used by tests and
//! local runs without a database.

use crate::domain::entities::{OptionTally, Poll, PollTally, Vote};
use crate::domain::repository::{PollRepository, VoteRepository};
use crate::domain::services::{PollDeletion, VoteAdmission};
use crate::error::PollResult;
use chrono::{DateTime, Utc};
use kernel::id::{PollId, PollOptionId, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct MemoryState {
    polls: HashMap<PollId, Poll>,
    votes: Vec<Vote>,
}

/// In-memory repository, cheap to clone (shared state)
#[derive(Clone, Default)]
pub struct InMemoryPollRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryPollRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored vote rows, across all polls
    pub async fn vote_count(&self) -> usize {
        self.state.read().await.votes.len()
    }

    /// Number of stored vote rows for one option
    pub async fn votes_for(&self, option_id: PollOptionId) -> usize {
        self.state
            .read()
            .await
            .votes
            .iter()
            .filter(|vote| vote.option_id == option_id)
            .count()
    }
}

impl PollRepository for InMemoryPollRepository {
    async fn create_with_options(&self, poll: &Poll) -> PollResult<()> {
        let mut state = self.state.write().await;
        state.polls.insert(poll.id, poll.clone());
        Ok(())
    }

    async fn delete_owned(&self, poll_id: PollId, requester: UserId) -> PollResult<PollDeletion> {
        let mut state = self.state.write().await;

        let Some(poll) = state.polls.get(&poll_id) else {
            return Ok(PollDeletion::default());
        };

        if poll.owner_id != requester {
            return Ok(PollDeletion {
                poll_exists: true,
                is_owner: false,
                deleted: false,
            });
        }

        state.polls.remove(&poll_id);
        state.votes.retain(|vote| vote.poll_id != poll_id);

        Ok(PollDeletion {
            poll_exists: true,
            is_owner: true,
            deleted: true,
        })
    }

    async fn find_with_options(&self, poll_id: PollId) -> PollResult<Option<Poll>> {
        let state = self.state.read().await;
        Ok(state.polls.get(&poll_id).map(|poll| {
            let mut poll = poll.clone();
            poll.options.sort_by_key(|option| option.position);
            poll
        }))
    }

    async fn find_by_owner_with_tally(&self, owner_id: UserId) -> PollResult<Vec<PollTally>> {
        let state = self.state.read().await;

        let mut counts: HashMap<PollOptionId, i64> = HashMap::new();
        for vote in &state.votes {
            *counts.entry(vote.option_id).or_default() += 1;
        }

        let mut polls: Vec<PollTally> = state
            .polls
            .values()
            .filter(|poll| poll.owner_id == owner_id)
            .map(|poll| {
                let mut options: Vec<OptionTally> = poll
                    .options
                    .iter()
                    .map(|option| OptionTally {
                        id: option.id,
                        poll_id: option.poll_id,
                        text: option.text.clone(),
                        position: option.position,
                        vote_count: counts.get(&option.id).copied().unwrap_or(0),
                    })
                    .collect();
                options.sort_by_key(|option| option.position);

                PollTally {
                    id: poll.id,
                    owner_id: poll.owner_id,
                    question: poll.question.clone(),
                    created_at: poll.created_at,
                    expires_at: poll.expires_at,
                    options,
                }
            })
            .collect();

        polls.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });

        Ok(polls)
    }
}

impl VoteRepository for InMemoryPollRepository {
    async fn record(&self, vote: &Vote, now: DateTime<Utc>) -> PollResult<VoteAdmission> {
        let mut state = self.state.write().await;

        let Some(poll) = state.polls.get(&vote.poll_id) else {
            return Ok(VoteAdmission::default());
        };

        let poll_active = !poll.is_expired_at(now);
        let option_valid = poll.has_option(vote.option_id);
        let inserted = poll_active && option_valid;

        if inserted {
            state.votes.push(vote.clone());
        }

        Ok(VoteAdmission {
            poll_exists: true,
            poll_active,
            option_valid,
            inserted,
        })
    }
}
