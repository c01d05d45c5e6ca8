//! OpenAPI documentation configuration.

use utoipa::OpenApi;

use crate::{api, error, models};

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "PR Reviewer Assignment Service",
        version = "0.1.0",
        description = "Assigns reviewers to pull requests from the author's team and keeps assignments consistent as membership changes"
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    paths(
        // Health endpoints
        api::health::health,
        api::health::ready,
        // Team endpoints
        api::teams::add_team,
        api::teams::get_team,
        api::teams::bulk_deactivate,
        // User endpoints
        api::users::set_is_active,
        api::users::get_review,
        // Pull request endpoints
        api::pull_requests::create_pull_request,
        api::pull_requests::merge_pull_request,
        api::pull_requests::reassign_reviewer,
        // Statistics
        api::stats::get_statistic,
    ),
    components(
        schemas(
            // Common
            error::ErrorResponse,
            error::ErrorBody,
            // Health
            api::health::HealthResponse,
            api::health::ReadyResponse,
            // Teams
            models::Team,
            models::TeamMember,
            models::TeamMemberInput,
            models::TeamEnvelope,
            models::AddTeamRequest,
            models::BulkDeactivateRequest,
            models::DeactivationReport,
            models::ReviewerReplacement,
            // Users
            models::User,
            models::UserEnvelope,
            models::SetActiveRequest,
            models::UserReviewsResponse,
            // Pull requests
            models::PrStatus,
            models::PullRequestResponse,
            models::PullRequestShort,
            models::PullRequestEnvelope,
            models::CreatePullRequestRequest,
            models::MergePullRequestRequest,
            models::ReassignRequest,
            models::ReassignResponse,
            // Statistics
            models::ReviewStats,
            models::UserReviewStats,
            models::PrReviewerStats,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Teams", description = "Team membership management"),
        (name = "Users", description = "User activity and review assignments"),
        (name = "Pull Requests", description = "Pull request lifecycle and reviewer assignment"),
        (name = "Statistics", description = "Reviewer load rollups")
    )
)]
pub struct ApiDoc;
