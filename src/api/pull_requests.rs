//! Pull request API handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    CreatePullRequestRequest, MergePullRequestRequest, PullRequestEnvelope, ReassignRequest,
    ReassignResponse, require_non_empty,
};
use crate::services::{ReviewerSelector, pull_requests};

/// Create a pull request and assign up to two reviewers from the author's team.
#[utoipa::path(
    post,
    path = "/pullRequest/create",
    tag = "Pull Requests",
    request_body = CreatePullRequestRequest,
    responses(
        (status = 201, description = "Pull request created", body = PullRequestEnvelope),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Author or team not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Pull request already exists", body = crate::error::ErrorResponse),
    )
)]
pub async fn create_pull_request(
    pool: web::Data<DbPool>,
    selector: web::Data<ReviewerSelector>,
    body: web::Json<CreatePullRequestRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let pr = pull_requests::create(
        &pool,
        &selector,
        &req.pull_request_id,
        &req.pull_request_name,
        &req.author_id,
    )
    .await?;

    Ok(HttpResponse::Created().json(PullRequestEnvelope { pr: pr.into() }))
}

/// Merge a pull request. Merging an already merged pull request is a no-op.
#[utoipa::path(
    post,
    path = "/pullRequest/merge",
    tag = "Pull Requests",
    request_body = MergePullRequestRequest,
    responses(
        (status = 200, description = "Pull request merged", body = PullRequestEnvelope),
        (status = 404, description = "Pull request not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn merge_pull_request(
    pool: web::Data<DbPool>,
    body: web::Json<MergePullRequestRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_non_empty("pull_request_id", &req.pull_request_id)?;

    let pr = pull_requests::merge(&pool, &req.pull_request_id).await?;

    Ok(HttpResponse::Ok().json(PullRequestEnvelope { pr: pr.into() }))
}

/// Replace one reviewer with another active member of that reviewer's team.
#[utoipa::path(
    post,
    path = "/pullRequest/reassign",
    tag = "Pull Requests",
    request_body = ReassignRequest,
    responses(
        (status = 200, description = "Reviewer replaced", body = ReassignResponse),
        (status = 404, description = "Pull request or user not found", body = crate::error::ErrorResponse),
        (status = 409, description = "Merged, not assigned or no candidate", body = crate::error::ErrorResponse),
    )
)]
pub async fn reassign_reviewer(
    pool: web::Data<DbPool>,
    selector: web::Data<ReviewerSelector>,
    body: web::Json<ReassignRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let (pr, replaced_by) =
        pull_requests::reassign_reviewer(&pool, &selector, &req.pull_request_id, &req.old_user_id)
            .await?;

    Ok(HttpResponse::Ok().json(ReassignResponse {
        pr: pr.into(),
        replaced_by,
    }))
}

/// Configure pull request routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/pullRequest/create").route(web::post().to(create_pull_request)))
        .service(web::resource("/pullRequest/merge").route(web::post().to(merge_pull_request)))
        .service(web::resource("/pullRequest/reassign").route(web::post().to(reassign_reviewer)));
}
