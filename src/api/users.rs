//! User API handlers.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::{
    SetActiveRequest, UserEnvelope, UserQuery, UserReviewsResponse, require_non_empty,
};
use crate::services::users;

/// Set a user's activity flag.
#[utoipa::path(
    post,
    path = "/users/setIsActive",
    tag = "Users",
    request_body = SetActiveRequest,
    responses(
        (status = 200, description = "Updated user", body = UserEnvelope),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn set_is_active(
    pool: web::Data<DbPool>,
    body: web::Json<SetActiveRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    require_non_empty("user_id", &req.user_id)?;

    let user = users::set_active(&pool, &req.user_id, req.is_active).await?;

    Ok(HttpResponse::Ok().json(UserEnvelope { user }))
}

/// List pull requests the user is assigned to review.
#[utoipa::path(
    get,
    path = "/users/getReview",
    tag = "Users",
    params(
        ("user_id" = String, Query, description = "User id")
    ),
    responses(
        (status = 200, description = "Review assignments", body = UserReviewsResponse),
        (status = 404, description = "User not found", body = crate::error::ErrorResponse),
    )
)]
pub async fn get_review(
    pool: web::Data<DbPool>,
    query: web::Query<UserQuery>,
) -> AppResult<HttpResponse> {
    let user_id = query.into_inner().user_id;
    let pull_requests = users::review_assignments(&pool, &user_id).await?;

    Ok(HttpResponse::Ok().json(UserReviewsResponse {
        user_id,
        pull_requests,
    }))
}

/// Configure user routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/users/setIsActive").route(web::post().to(set_is_active)))
        .service(web::resource("/users/getReview").route(web::get().to(get_review)));
}
