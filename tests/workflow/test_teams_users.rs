//! Team upsert, team lookup and user activity.

use pr_reviewer_lib::error::{AppError, Conflict};
use pr_reviewer_lib::services::{pull_requests, teams, users};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_team_returns_members_in_id_order() {
    let pool = create_test_pool().await;

    let upsert = teams::create_or_update(
        &pool,
        "backend",
        &[member("u2", true), member("u1", false)],
    )
    .await
    .unwrap();
    assert!(!upsert.is_existing);
    let team = upsert.team;

    assert_eq!(team.team_name, "backend");
    let ids: Vec<&str> = team.members.iter().map(|m| m.user_id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2"]);
    assert!(!team.members[0].is_active);
    assert_eq!(team.members[1].username, "u2-name");

    let fetched = teams::get(&pool, "backend").await.unwrap();
    assert_eq!(fetched.members, team.members);
}

#[actix_rt::test]
async fn test_existing_team_with_members_is_a_conflict() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1"]).await;

    let err = teams::create_or_update(&pool, "backend", &[member("u9", true)])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::AlreadyExists {
            kind: Conflict::Team,
            ..
        }
    ));

    // The rejected batch must not have created u9.
    let err = users::set_active(&pool, "u9", false).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn test_existing_team_without_members_is_returned_unchanged() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2"]).await;

    let upsert = teams::create_or_update(&pool, "backend", &[]).await.unwrap();

    assert!(upsert.is_existing);
    assert_eq!(upsert.team.members.len(), 2);
}

#[actix_rt::test]
async fn test_empty_team_can_be_created() {
    let pool = create_test_pool().await;

    let upsert = teams::create_or_update(&pool, "empty", &[]).await.unwrap();

    assert!(!upsert.is_existing);
    assert_eq!(upsert.team.team_name, "empty");
    assert!(upsert.team.members.is_empty());
}

#[actix_rt::test]
async fn test_upsert_moves_user_between_teams() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2"]).await;

    teams::create_or_update(&pool, "frontend", &[member("u2", false)])
        .await
        .unwrap();

    let backend = teams::get(&pool, "backend").await.unwrap();
    let frontend = teams::get(&pool, "frontend").await.unwrap();
    assert_eq!(backend.members.len(), 1);
    assert_eq!(frontend.members.len(), 1);
    assert_eq!(frontend.members[0].user_id, "u2");
    assert!(!frontend.members[0].is_active);
}

#[actix_rt::test]
async fn test_get_unknown_team_is_not_found() {
    let pool = create_test_pool().await;

    let err = teams::get(&pool, "nobody").await.unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn test_set_active_keeps_existing_assignments() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3"]).await;
    pull_requests::create(&pool, &first_selector(), "pr-1", "Fix", "u1")
        .await
        .unwrap();

    let user = users::set_active(&pool, "u2", false).await.unwrap();
    assert!(!user.is_active);
    assert_eq!(user.team_name.as_deref(), Some("backend"));

    let reviews = users::review_assignments(&pool, "u2").await.unwrap();
    assert_eq!(reviews.len(), 1);

    // Toggling is idempotent.
    let user = users::set_active(&pool, "u2", false).await.unwrap();
    assert!(!user.is_active);
}

#[actix_rt::test]
async fn test_review_assignments_include_merged_pull_requests() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3"]).await;
    let selector = first_selector();

    pull_requests::create(&pool, &selector, "pr-2", "Second", "u1")
        .await
        .unwrap();
    pull_requests::create(&pool, &selector, "pr-1", "First", "u1")
        .await
        .unwrap();
    pull_requests::merge(&pool, "pr-1").await.unwrap();

    let reviews = users::review_assignments(&pool, "u2").await.unwrap();
    let ids: Vec<&str> = reviews.iter().map(|p| p.pull_request_id.as_str()).collect();
    assert_eq!(ids, vec!["pr-1", "pr-2"]);

    assert!(users::review_assignments(&pool, "u1").await.unwrap().is_empty());

    let err = users::review_assignments(&pool, "ghost").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
