//! Review statistics rollups.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use super::PrStatus;

/// Reviewer load of one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserReviewStats {
    pub id: String,
    pub username: String,
    pub prs_reviewed: i64,
    pub open_prs_reviewed: i64,
    pub merged_prs_reviewed: i64,
}

/// Reviewer count and ownership of one pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PrReviewerStats {
    pub id: String,
    pub name: String,
    pub status: PrStatus,
    pub team_name: Option<String>,
    pub reviewers_count: i64,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

/// Response of GET /statistic.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewStats {
    pub user_review_stats: Vec<UserReviewStats>,
    pub pr_reviewer_stats: Vec<PrReviewerStats>,
}
