//! Shared test helpers for workflow tests.

use std::sync::Arc;

use actix_web::{App, dev::ServiceResponse, test, web};
use pr_reviewer_lib::config::DatabaseSettings;
use pr_reviewer_lib::db::DbPool;
use pr_reviewer_lib::models::{Team, TeamMemberInput};
use pr_reviewer_lib::services::{FirstCandidates, ReviewerSelector, teams};
use serde_json::Value;

/// Fresh in-memory database with the schema applied.
///
/// A single connection keeps every query on the same in-memory database.
pub async fn create_test_pool() -> DbPool {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
    };

    let pool = DbPool::connect(&settings)
        .await
        .expect("Failed to open in-memory database");
    pool.run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Selector that always takes the lowest eligible ids.
pub fn first_selector() -> ReviewerSelector {
    ReviewerSelector::new(Arc::new(FirstCandidates))
}

pub fn member(user_id: &str, is_active: bool) -> TeamMemberInput {
    TeamMemberInput {
        user_id: user_id.to_string(),
        username: format!("{}-name", user_id),
        is_active,
    }
}

/// Create a team whose members are all active.
pub async fn seed_team(pool: &DbPool, team_name: &str, user_ids: &[&str]) -> Team {
    let members: Vec<TeamMemberInput> = user_ids.iter().map(|id| member(id, true)).collect();
    teams::create_or_update(pool, team_name, &members)
        .await
        .expect("Failed to seed team")
        .team
}

/// Create a test app with every route registered.
pub async fn create_test_app(
    pool: &DbPool,
    selector: ReviewerSelector,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(selector))
            .configure(pr_reviewer_lib::api::configure),
    )
    .await
}

/// POST a JSON body and return status and parsed response.
pub async fn post_json<S>(app: &S, uri: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}

/// GET a URI and return status and parsed response.
pub async fn get_json<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
