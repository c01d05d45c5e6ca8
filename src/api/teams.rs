//! Team API handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{AddTeamRequest, BulkDeactivateRequest, TeamEnvelope, TeamQuery};
use crate::services::{ReviewerSelector, teams};

/// Create a team and upsert its members.
///
/// Re-submitting an existing team with no members returns it unchanged;
/// submitting members for an existing team is rejected.
#[utoipa::path(
    post,
    path = "/team/add",
    tag = "Teams",
    request_body = AddTeamRequest,
    responses(
        (status = 201, description = "Team created", body = TeamEnvelope),
        (status = 200, description = "Team already existed and was returned unchanged", body = TeamEnvelope),
        (status = 400, description = "Team already exists or invalid request", body = crate::error::ErrorResponse),
    )
)]
pub async fn add_team(
    pool: web::Data<DbPool>,
    body: web::Json<AddTeamRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let upsert = teams::create_or_update(&pool, &req.team_name, &req.members).await?;
    let body = TeamEnvelope { team: upsert.team };

    if upsert.is_existing {
        Ok(HttpResponse::Ok().json(body))
    } else {
        Ok(HttpResponse::Created().json(body))
    }
}

/// Get a team with its members.
#[utoipa::path(
    get,
    path = "/team/get",
    tag = "Teams",
    params(
        ("team_name" = String, Query, description = "Team name")
    ),
    responses(
        (status = 200, description = "Team with members", body = crate::models::Team),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_team(
    pool: web::Data<DbPool>,
    query: web::Query<TeamQuery>,
) -> AppResult<HttpResponse> {
    let team = teams::get(&pool, &query.team_name).await?;

    Ok(HttpResponse::Ok().json(team))
}

/// Deactivate team members and move their open reviews to the remaining active members.
#[utoipa::path(
    post,
    path = "/team/bulkDeactivate",
    tag = "Teams",
    request_body = BulkDeactivateRequest,
    responses(
        (status = 200, description = "Members deactivated", body = crate::models::DeactivationReport),
        (status = 400, description = "Invalid request", body = crate::error::ErrorResponse),
        (status = 404, description = "Team not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn bulk_deactivate(
    pool: web::Data<DbPool>,
    selector: web::Data<ReviewerSelector>,
    body: web::Json<BulkDeactivateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    crate::models::require_non_empty("team_name", &req.team_name)?;

    let report =
        teams::bulk_deactivate(&pool, &selector, &req.team_name, req.user_ids.as_deref()).await?;

    Ok(HttpResponse::Ok().json(report))
}

/// Configure team routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/team/add").route(web::post().to(add_team)))
        .service(web::resource("/team/get").route(web::get().to(get_team)))
        .service(web::resource("/team/bulkDeactivate").route(web::post().to(bulk_deactivate)));
}
