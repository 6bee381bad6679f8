//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! - Lifecycle: `create_poll`, `delete_poll`
//! - Voting: `record_vote`
//! - Tallies: `get_poll`, `list_owner_polls`

pub mod config;
pub mod create_poll;
pub mod delete_poll;
pub mod get_poll;
pub mod list_owner_polls;
pub mod record_vote;

// Re-exports
pub use config::PollConfig;
pub use create_poll::{CreatePollInput, CreatePollUseCase};
pub use delete_poll::DeletePollUseCase;
pub use get_poll::GetPollUseCase;
pub use list_owner_polls::ListOwnerPollsUseCase;
pub use record_vote::{RecordVoteInput, RecordVoteUseCase};
