//! User domain models and DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::PullRequestShort;

/// User as stored, with its team back-reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: Option<String>,
    pub is_active: bool,
}

/// Wrapper used by POST /users/setIsActive.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: User,
}

/// Request body for POST /users/setIsActive.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetActiveRequest {
    pub user_id: String,
    pub is_active: bool,
}

/// Query string for GET /users/getReview.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UserQuery {
    pub user_id: String,
}

/// Pull requests a user is assigned to review.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserReviewsResponse {
    pub user_id: String,
    pub pull_requests: Vec<PullRequestShort>,
}
