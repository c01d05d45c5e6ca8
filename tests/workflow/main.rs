//! Reviewer workflow test suite.
//!
//! Each test runs against its own in-memory SQLite database with all
//! migrations applied, so no external services are needed.
//!
//! Run with: cargo test --test workflow

mod test_helpers;

mod test_pull_requests;
mod test_teams_users;
