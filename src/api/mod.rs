//! API endpoint modules.

pub mod health;
pub mod openapi;
pub mod pull_requests;
pub mod stats;
pub mod teams;
pub mod users;

use actix_web::web;

use crate::error::AppError;

pub use health::configure_health_routes;
pub use openapi::ApiDoc;
pub use pull_requests::configure_routes as configure_pull_request_routes;
pub use stats::configure_routes as configure_stats_routes;
pub use teams::configure_routes as configure_team_routes;
pub use users::configure_routes as configure_user_routes;

/// Register every route and the extractor configs that turn malformed
/// bodies and query strings into `VALIDATION_ERROR` responses.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidInput(err.to_string()).into()),
    )
    .configure(configure_health_routes)
    .configure(configure_team_routes)
    .configure(configure_user_routes)
    .configure(configure_pull_request_routes)
    .configure(configure_stats_routes);
}
