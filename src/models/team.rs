//! Team domain models and DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::AppResult;

use super::{MAX_TEAM_NAME_LEN, MAX_USER_ID_LEN, MAX_USERNAME_LEN, require_field};

/// Team member as exposed on the team resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

/// Team with its current member set.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}

/// Result of a team upsert.
#[derive(Debug, Clone)]
pub struct TeamUpsert {
    pub team: Team,
    /// True when the team already existed and nothing was written.
    pub is_existing: bool,
}

/// Wrapper used by POST /team/add.
#[derive(Debug, Serialize, ToSchema)]
pub struct TeamEnvelope {
    pub team: Team,
}

/// Member entry of a team upsert.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeamMemberInput {
    pub user_id: String,
    pub username: String,
    pub is_active: bool,
}

/// Request body for POST /team/add.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddTeamRequest {
    pub team_name: String,
    #[serde(default)]
    pub members: Vec<TeamMemberInput>,
}

impl AddTeamRequest {
    pub fn validate(&self) -> AppResult<()> {
        require_field("team_name", &self.team_name, MAX_TEAM_NAME_LEN)?;
        for (i, member) in self.members.iter().enumerate() {
            require_field(
                &format!("members[{}].user_id", i),
                &member.user_id,
                MAX_USER_ID_LEN,
            )?;
            require_field(
                &format!("members[{}].username", i),
                &member.username,
                MAX_USERNAME_LEN,
            )?;
        }
        Ok(())
    }
}

/// Query string for GET /team/get.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TeamQuery {
    pub team_name: String,
}

/// Request body for POST /team/bulkDeactivate.
///
/// Omitting `user_ids`, or sending an empty list, targets every member of the team.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BulkDeactivateRequest {
    pub team_name: String,
    #[serde(default)]
    pub user_ids: Option<Vec<String>>,
}

/// One reviewer slot touched by a bulk deactivation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReviewerReplacement {
    pub pull_request_id: String,
    pub old_reviewer_id: String,
    /// None when no candidate was left and the slot was dropped.
    pub new_reviewer_id: Option<String>,
}

/// Outcome of a bulk deactivation.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DeactivationReport {
    pub team_name: String,
    pub deactivated_user_ids: Vec<String>,
    pub replacements: Vec<ReviewerReplacement>,
}

impl DeactivationReport {
    pub fn empty(team_name: &str) -> Self {
        Self {
            team_name: team_name.to_string(),
            deactivated_user_ids: Vec::new(),
            replacements: Vec::new(),
        }
    }

    /// Number of slots left without a reviewer.
    pub fn dropped_slots(&self) -> usize {
        self.replacements
            .iter()
            .filter(|r| r.new_reviewer_id.is_none())
            .count()
    }
}
