//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Poll, PollOption, Vote, PollTally)
//! - Domain value objects (Question, OptionTexts, Expiry, NewPoll)
//! - Domain services (decoding of conditional round trips)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
