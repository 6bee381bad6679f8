//! Requester Middleware
//!
//! The poll engine does not authenticate anyone. An upstream gateway
//! authenticates the caller and forwards the user ID in a trusted header;
//! the gateway must strip that header from client requests.

use crate::application::config::PollConfig;
use crate::error::PollError;
use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use std::sync::Arc;
use uuid::Uuid;

/// Authenticated requester, stored in request extensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requester(pub UserId);

impl<S> FromRequestParts<S> for Requester
where
    S: Send + Sync,
{
    type Rejection = PollError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Requester>()
            .copied()
            .ok_or(PollError::Unauthenticated)
    }
}

/// Copy the requester from the trusted header into request extensions.
/// Never rejects: owner-only handlers reject through the extractor.
pub async fn resolve_requester(
    State(config): State<Arc<PollConfig>>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let requester = req
        .headers()
        .get(config.requester_header.as_str())
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value.trim()).ok())
        .filter(|id| !id.is_nil())
        .map(|id| Requester(UserId::from_uuid(id)));

    match requester {
        Some(requester) => {
            req.extensions_mut().insert(requester);
        }
        None => {
            tracing::debug!("No authenticated requester on request");
        }
    }

    next.run(req).await
}
