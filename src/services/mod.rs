//! Business logic services.
//!
//! Each operation opens its own transaction on the [`DbPool`](crate::db::DbPool)
//! and commits only once every write has succeeded.

pub mod pull_requests;
pub mod selector;
pub mod stats;
pub mod teams;
pub mod users;

pub use pull_requests::REVIEWERS_PER_PULL_REQUEST;
pub use selector::{FirstCandidates, RandomSource, ReviewerSelector, SeededRandom, ThreadRandom};
