//! Application Configuration
//!
//! Configuration for the poll application layer.

use crate::domain::value_objects::PollLimits;

/// Poll application configuration
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Option count and text length limits
    pub limits: PollLimits,
    /// Header carrying the authenticated user ID, set by the upstream
    /// authentication gateway
    pub requester_header: String,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            limits: PollLimits::default(),
            requester_header: "x-authenticated-user".to_string(),
        }
    }
}

impl PollConfig {
    /// Override the requester header name
    pub fn with_requester_header(self, header: impl Into<String>) -> Self {
        Self {
            requester_header: header.into().to_ascii_lowercase(),
            ..self
        }
    }
}
