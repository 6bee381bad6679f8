//! Poll Router

use crate::application::config::PollConfig;
use crate::domain::repository::{PollRepository, VoteRepository};
use crate::infra::postgres::PgPollRepository;
use crate::presentation::handlers::{self, PollAppState};
use crate::presentation::middleware::resolve_requester;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

/// Create the poll router with PostgreSQL repository
pub fn poll_router(repo: PgPollRepository, config: PollConfig) -> Router {
    poll_router_generic(repo, config)
}

/// Create a generic poll router for any repository implementation
pub fn poll_router_generic<R>(repo: R, config: PollConfig) -> Router
where
    R: PollRepository + VoteRepository + Clone + Send + Sync + 'static,
{
    let config = Arc::new(config);
    let state = PollAppState {
        repo: Arc::new(repo),
        config: config.clone(),
    };

    Router::new()
        .route(
            "/",
            post(handlers::create_poll::<R>).get(handlers::list_owner_polls::<R>),
        )
        .route(
            "/{poll_id}",
            get(handlers::get_poll::<R>).delete(handlers::delete_poll::<R>),
        )
        .route("/{poll_id}/vote", post(handlers::record_vote::<R>))
        .layer(middleware::from_fn_with_state(config, resolve_requester))
        .with_state(state)
}
