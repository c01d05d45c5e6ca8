//! Statistics endpoint.

use actix_web::{HttpResponse, web};

use crate::db::DbPool;
use crate::error::AppResult;
use crate::models::ReviewStats;
use crate::services::stats;

/// Reviewer load per user and reviewer count per pull request.
#[utoipa::path(
    get,
    path = "/statistic",
    tag = "Statistics",
    responses(
        (status = 200, description = "Review statistics", body = ReviewStats),
    )
)]
pub async fn get_statistic(pool: web::Data<DbPool>) -> AppResult<HttpResponse> {
    let stats = stats::review_stats(&pool).await?;
    Ok(HttpResponse::Ok().json(stats))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/statistic").route(web::get().to(get_statistic)));
}
