//! Domain models and request/response DTOs.

pub mod pull_request;
pub mod stats;
pub mod team;
pub mod user;

// Re-export commonly used types
pub use pull_request::{
    CreatePullRequestRequest, MergePullRequestRequest, PrStatus, PullRequest,
    PullRequestEnvelope, PullRequestResponse, PullRequestShort, ReassignRequest,
    ReassignResponse,
};
pub use stats::{PrReviewerStats, ReviewStats, UserReviewStats};
pub use team::{
    AddTeamRequest, BulkDeactivateRequest, DeactivationReport, ReviewerReplacement, Team,
    TeamEnvelope, TeamMember, TeamMemberInput, TeamQuery, TeamUpsert,
};
pub use user::{SetActiveRequest, User, UserEnvelope, UserQuery, UserReviewsResponse};

/// Column widths of the identifiers stored by the migrations.
pub const MAX_USER_ID_LEN: usize = 50;
pub const MAX_USERNAME_LEN: usize = 100;
pub const MAX_TEAM_NAME_LEN: usize = 100;
pub const MAX_PULL_REQUEST_ID_LEN: usize = 100;
pub const MAX_PULL_REQUEST_NAME_LEN: usize = 200;

/// Reject blank identifiers before they reach the store.
pub(crate) fn require_non_empty(field: &str, value: &str) -> crate::error::AppResult<()> {
    if value.trim().is_empty() {
        return Err(crate::error::AppError::InvalidInput(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

/// Reject blank values and values wider than their column.
pub(crate) fn require_field(
    field: &str,
    value: &str,
    max_len: usize,
) -> crate::error::AppResult<()> {
    require_non_empty(field, value)?;
    if value.chars().count() > max_len {
        return Err(crate::error::AppError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max_len
        )));
    }
    Ok(())
}
