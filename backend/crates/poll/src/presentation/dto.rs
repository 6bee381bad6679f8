//! API DTOs (Data Transfer Objects)

use crate::domain::entities::{OptionTally, Poll, PollOption, PollTally};
use chrono::{DateTime, Utc};
use kernel::id::{PollId, PollOptionId};
use serde::{Deserialize, Serialize};

/// Request for POST /api/polls
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePollRequest {
    pub question: String,
    pub options: Vec<String>,
    pub expires_at: DateTime<Utc>,
}

/// Request for POST /api/polls/{poll_id}/vote
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub option_id: PollOptionId,
}

/// Public poll view: options in position order, no counts, no owner
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollResponse {
    pub id: PollId,
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub options: Vec<PollOptionResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PollOptionResponse {
    pub id: PollOptionId,
    pub text: String,
    pub position: i16,
}

/// Owner dashboard view with vote counts
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerPollResponse {
    pub id: PollId,
    pub question: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub total_votes: i64,
    pub options: Vec<OptionTallyResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionTallyResponse {
    pub id: PollOptionId,
    pub text: String,
    pub position: i16,
    pub vote_count: i64,
}

impl From<PollOption> for PollOptionResponse {
    fn from(option: PollOption) -> Self {
        Self {
            id: option.id,
            text: option.text.as_str().to_string(),
            position: option.position,
        }
    }
}

impl From<Poll> for PollResponse {
    fn from(poll: Poll) -> Self {
        Self {
            id: poll.id,
            question: poll.question.as_str().to_string(),
            created_at: poll.created_at,
            expires_at: poll.expires_at,
            options: poll.options.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<OptionTally> for OptionTallyResponse {
    fn from(option: OptionTally) -> Self {
        Self {
            id: option.id,
            text: option.text.as_str().to_string(),
            position: option.position,
            vote_count: option.vote_count,
        }
    }
}

impl From<PollTally> for OwnerPollResponse {
    fn from(poll: PollTally) -> Self {
        Self {
            id: poll.id,
            question: poll.question.as_str().to_string(),
            created_at: poll.created_at,
            expires_at: poll.expires_at,
            total_votes: poll.total_votes(),
            options: poll.options.into_iter().map(Into::into).collect(),
        }
    }
}
