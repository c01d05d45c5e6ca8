//! Pull request domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;

use super::{
    MAX_PULL_REQUEST_ID_LEN, MAX_PULL_REQUEST_NAME_LEN, MAX_USER_ID_LEN, require_field,
    require_non_empty,
};

/// Pull request status.
///
/// The only transition is OPEN -> MERGED.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PrStatus {
    Open,
    Merged,
}

impl PrStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "OPEN" => Some(Self::Open),
            "MERGED" => Some(Self::Merged),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Merged)
    }
}

impl std::fmt::Display for PrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Pull request with its reviewer ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PrStatus,
    /// Sorted reviewer ids.
    pub reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.reviewers.iter().any(|r| r == user_id)
    }
}

/// Full pull request representation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PullRequestResponse {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
    pub assigned_reviewers: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "mergedAt")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<PullRequest> for PullRequestResponse {
    fn from(pr: PullRequest) -> Self {
        Self {
            pull_request_id: pr.id,
            pull_request_name: pr.name,
            author_id: pr.author_id,
            status: pr.status,
            assigned_reviewers: pr.reviewers,
            created_at: pr.created_at,
            merged_at: pr.merged_at,
        }
    }
}

/// Short pull request representation used in review listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PullRequestShort {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
    pub status: PrStatus,
}

/// Wrapper used by create and merge responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct PullRequestEnvelope {
    pub pr: PullRequestResponse,
}

/// Response of POST /pullRequest/reassign.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReassignResponse {
    pub pr: PullRequestResponse,
    pub replaced_by: String,
}

/// Request body for POST /pullRequest/create.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: String,
    pub pull_request_name: String,
    pub author_id: String,
}

impl CreatePullRequestRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_field("pull_request_id", &self.pull_request_id, MAX_PULL_REQUEST_ID_LEN)?;
        require_field(
            "pull_request_name",
            &self.pull_request_name,
            MAX_PULL_REQUEST_NAME_LEN,
        )?;
        require_field("author_id", &self.author_id, MAX_USER_ID_LEN)
    }
}

/// Request body for POST /pullRequest/merge.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct MergePullRequestRequest {
    pub pull_request_id: String,
}

/// Request body for POST /pullRequest/reassign.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ReassignRequest {
    pub pull_request_id: String,
    pub old_user_id: String,
}

impl ReassignRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_non_empty("pull_request_id", &self.pull_request_id)?;
        require_non_empty("old_user_id", &self.old_user_id)
    }
}
