//! Poll Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, admission decoding, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers
//!
//! ## Consistency Model
//! - Poll creation writes the poll and all options in one transaction
//! - Vote admission (exists, active, option belongs) and the insert are one statement
//! - Ownership-checked deletion is one statement; options and votes cascade
//! - Owner tallies are read by one statement (single snapshot)
//! - No in-process locks or shared state between requests

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::PollConfig;
pub use error::{PollError, PollResult};
pub use infra::memory::InMemoryPollRepository;
pub use infra::postgres::PgPollRepository;
pub use presentation::router::{poll_router, poll_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod store {
    pub use crate::infra::postgres::PgPollRepository as PollStore;
}
