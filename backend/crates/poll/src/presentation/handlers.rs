//! HTTP Handlers

use crate::application::config::PollConfig;
use crate::application::{
    CreatePollInput, CreatePollUseCase, DeletePollUseCase, GetPollUseCase, ListOwnerPollsUseCase,
    RecordVoteInput, RecordVoteUseCase,
};
use crate::domain::repository::{PollRepository, VoteRepository};
use crate::error::PollResult;
use crate::presentation::dto::{CreatePollRequest, OwnerPollResponse, PollResponse, VoteRequest};
use crate::presentation::middleware::Requester;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::id::PollId;
use std::sync::Arc;
use uuid::Uuid;

/// Shared state for poll handlers
#[derive(Clone)]
pub struct PollAppState<R>
where
    R: PollRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<PollConfig>,
}

/// POST /api/polls
pub async fn create_poll<R>(
    State(state): State<PollAppState<R>>,
    Requester(owner_id): Requester,
    Json(req): Json<CreatePollRequest>,
) -> PollResult<impl IntoResponse>
where
    R: PollRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreatePollUseCase::new(state.repo.clone(), state.config.clone());

    let input = CreatePollInput {
        owner_id,
        question: req.question,
        expires_at: req.expires_at,
        options: req.options,
    };

    let poll = use_case.execute(input).await?;

    Ok((StatusCode::CREATED, Json(PollResponse::from(poll))))
}

/// GET /api/polls
pub async fn list_owner_polls<R>(
    State(state): State<PollAppState<R>>,
    Requester(owner_id): Requester,
) -> PollResult<Json<Vec<OwnerPollResponse>>>
where
    R: PollRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListOwnerPollsUseCase::new(state.repo.clone());

    let polls = use_case.execute(owner_id).await?;

    Ok(Json(polls.into_iter().map(Into::into).collect()))
}

/// GET /api/polls/{poll_id}
pub async fn get_poll<R>(
    State(state): State<PollAppState<R>>,
    Path(poll_id): Path<Uuid>,
) -> PollResult<Json<PollResponse>>
where
    R: PollRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = GetPollUseCase::new(state.repo.clone());

    let poll = use_case.execute(PollId::from_uuid(poll_id)).await?;

    Ok(Json(PollResponse::from(poll)))
}

/// DELETE /api/polls/{poll_id}
pub async fn delete_poll<R>(
    State(state): State<PollAppState<R>>,
    Requester(requester): Requester,
    Path(poll_id): Path<Uuid>,
) -> PollResult<StatusCode>
where
    R: PollRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeletePollUseCase::new(state.repo.clone());

    use_case
        .execute(PollId::from_uuid(poll_id), requester)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/polls/{poll_id}/vote
pub async fn record_vote<R>(
    State(state): State<PollAppState<R>>,
    Path(poll_id): Path<Uuid>,
    Json(req): Json<VoteRequest>,
) -> PollResult<StatusCode>
where
    R: PollRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let use_case = RecordVoteUseCase::new(state.repo.clone());

    let input = RecordVoteInput {
        poll_id: PollId::from_uuid(poll_id),
        option_id: req.option_id,
    };

    use_case.execute(input).await?;

    Ok(StatusCode::NO_CONTENT)
}
