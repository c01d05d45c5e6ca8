//! Pull request creation, merge and reassignment.

use std::collections::HashSet;

use sea_orm::ConnectionTrait;

use pr_reviewer_lib::error::{AppError, Conflict};
use pr_reviewer_lib::models::PrStatus;
use pr_reviewer_lib::services::{ReviewerSelector, pull_requests, teams, users};

use super::test_helpers::*;

#[actix_rt::test]
async fn test_create_assigns_two_teammates_excluding_author() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3", "u4"]).await;
    let selector = ReviewerSelector::default();

    for i in 0..10 {
        let pr_id = format!("pr-{i}");
        let pr = pull_requests::create(&pool, &selector, &pr_id, "Add search", "u1")
            .await
            .unwrap();

        assert_eq!(pr.status, PrStatus::Open);
        assert_eq!(pr.reviewers.len(), 2);
        assert!(!pr.has_reviewer("u1"));
        assert_ne!(pr.reviewers[0], pr.reviewers[1]);
        assert!(pr.merged_at.is_none());
    }
}

#[actix_rt::test]
async fn test_create_with_first_selector_is_deterministic() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u4", "u3", "u2", "u1"]).await;

    let pr = pull_requests::create(&pool, &first_selector(), "pr-1", "Add search", "u2")
        .await
        .unwrap();

    assert_eq!(pr.reviewers, vec!["u1".to_string(), "u3".to_string()]);
}

#[actix_rt::test]
async fn test_solo_team_gets_no_reviewers() {
    let pool = create_test_pool().await;
    seed_team(&pool, "solo", &["u1"]).await;

    let pr = pull_requests::create(&pool, &first_selector(), "pr-1", "Fix typo", "u1")
        .await
        .unwrap();

    assert!(pr.reviewers.is_empty());
    assert_eq!(pr.status, PrStatus::Open);
}

#[actix_rt::test]
async fn test_inactive_teammates_are_never_assigned() {
    let pool = create_test_pool().await;
    let members = vec![member("u1", true), member("u2", false), member("u3", false)];
    teams::create_or_update(&pool, "backend", &members)
        .await
        .unwrap();

    let pr = pull_requests::create(&pool, &ReviewerSelector::default(), "pr-1", "Fix", "u1")
        .await
        .unwrap();
    assert!(pr.reviewers.is_empty());

    users::set_active(&pool, "u3", true).await.unwrap();
    let pr = pull_requests::create(&pool, &ReviewerSelector::default(), "pr-2", "Fix", "u1")
        .await
        .unwrap();
    assert_eq!(pr.reviewers, vec!["u3".to_string()]);
}

#[actix_rt::test]
async fn test_create_rejects_duplicate_id_without_touching_original() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3"]).await;
    let selector = first_selector();

    let original = pull_requests::create(&pool, &selector, "pr-1", "First", "u1")
        .await
        .unwrap();

    let err = pull_requests::create(&pool, &selector, "pr-1", "Second", "u2")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::AlreadyExists {
            kind: Conflict::PullRequest,
            ..
        }
    ));

    let reviews = users::review_assignments(&pool, "u2").await.unwrap();
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0].pull_request_name, original.name);
}

#[actix_rt::test]
async fn test_create_reports_missing_author_and_missing_team() {
    let pool = create_test_pool().await;
    let selector = first_selector();

    let err = pull_requests::create(&pool, &selector, "pr-1", "Fix", "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "{err:?}");

    // Removing the team row leaves its members without a team.
    seed_team(&pool, "gone", &["u1", "u2"]).await;
    pool.connection()
        .execute_unprepared("DELETE FROM teams WHERE name = 'gone'")
        .await
        .unwrap();

    let err = pull_requests::create(&pool, &selector, "pr-1", "Fix", "u1")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoTeam(_)), "{err:?}");
}

#[actix_rt::test]
async fn test_merge_is_idempotent_and_keeps_first_timestamp() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3"]).await;
    pull_requests::create(&pool, &first_selector(), "pr-1", "Fix", "u1")
        .await
        .unwrap();

    let first = pull_requests::merge(&pool, "pr-1").await.unwrap();
    assert_eq!(first.status, PrStatus::Merged);
    assert!(first.merged_at.is_some());

    let second = pull_requests::merge(&pool, "pr-1").await.unwrap();
    assert_eq!(second.status, PrStatus::Merged);
    assert_eq!(second.merged_at, first.merged_at);
    assert_eq!(second.reviewers, first.reviewers);

    let err = pull_requests::merge(&pool, "pr-404").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[actix_rt::test]
async fn test_reassign_moves_review_to_new_teammate() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3", "u4"]).await;
    let selector = first_selector();

    let pr = pull_requests::create(&pool, &selector, "pr-1", "Fix", "u1")
        .await
        .unwrap();
    assert_eq!(pr.reviewers, vec!["u2".to_string(), "u3".to_string()]);

    let (updated, replaced_by) = pull_requests::reassign_reviewer(&pool, &selector, "pr-1", "u2")
        .await
        .unwrap();

    assert_eq!(replaced_by, "u4");
    assert_eq!(updated.reviewers, vec!["u3".to_string(), "u4".to_string()]);
    assert!(users::review_assignments(&pool, "u2").await.unwrap().is_empty());
    let u4_reviews = users::review_assignments(&pool, "u4").await.unwrap();
    assert_eq!(u4_reviews.len(), 1);
    assert_eq!(u4_reviews[0].pull_request_id, "pr-1");
}

#[actix_rt::test]
async fn test_reassign_never_picks_author_or_current_reviewers() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3", "u4", "u5"]).await;
    let selector = ReviewerSelector::default();

    for i in 0..10 {
        let pr_id = format!("pr-{i}");
        let pr = pull_requests::create(&pool, &selector, &pr_id, "Fix", "u1")
            .await
            .unwrap();
        let old = pr.reviewers[0].clone();

        let (updated, new_id) = pull_requests::reassign_reviewer(&pool, &selector, &pr_id, &old)
            .await
            .unwrap();

        assert_ne!(new_id, "u1");
        assert!(!pr.reviewers.contains(&new_id));
        assert!(!updated.has_reviewer(&old));
        assert_eq!(updated.reviewers.len(), 2);
        let distinct: HashSet<&String> = updated.reviewers.iter().collect();
        assert_eq!(distinct.len(), 2);
    }
}

#[actix_rt::test]
async fn test_reassign_on_merged_pull_request_fails() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3", "u4"]).await;
    let selector = first_selector();

    pull_requests::create(&pool, &selector, "pr-1", "Fix", "u1")
        .await
        .unwrap();
    let merged = pull_requests::merge(&pool, "pr-1").await.unwrap();

    let err = pull_requests::reassign_reviewer(&pool, &selector, "pr-1", "u2")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "{err:?}");

    let again = pull_requests::merge(&pool, "pr-1").await.unwrap();
    assert_eq!(again.merged_at, merged.merged_at);
    assert_eq!(again.reviewers, merged.reviewers);
}

#[actix_rt::test]
async fn test_reassign_rejects_user_who_is_not_a_reviewer() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3", "u4"]).await;
    let selector = first_selector();

    pull_requests::create(&pool, &selector, "pr-1", "Fix", "u1")
        .await
        .unwrap();

    let err = pull_requests::reassign_reviewer(&pool, &selector, "pr-1", "u4")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotAssigned { .. }), "{err:?}");

    let err = pull_requests::reassign_reviewer(&pool, &selector, "pr-1", "ghost")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "{err:?}");

    let err = pull_requests::reassign_reviewer(&pool, &selector, "pr-404", "u2")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)), "{err:?}");
}

#[actix_rt::test]
async fn test_reassign_without_candidate_leaves_pull_request_unchanged() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3"]).await;
    let selector = first_selector();

    let pr = pull_requests::create(&pool, &selector, "pr-1", "Fix", "u1")
        .await
        .unwrap();
    assert_eq!(pr.reviewers.len(), 2);

    let err = pull_requests::reassign_reviewer(&pool, &selector, "pr-1", "u2")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoCandidate(_)), "{err:?}");

    let reviews = users::review_assignments(&pool, "u2").await.unwrap();
    assert_eq!(reviews.len(), 1);
}

#[actix_rt::test]
async fn test_reassign_of_teamless_reviewer_has_no_candidate() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3", "u4"]).await;
    let selector = first_selector();

    let pr = pull_requests::create(&pool, &selector, "pr-1", "Fix", "u1")
        .await
        .unwrap();
    assert_eq!(pr.reviewers, vec!["u2".to_string(), "u3".to_string()]);

    // Removing the team row leaves the assigned reviewers without a team.
    pool.connection()
        .execute_unprepared("DELETE FROM teams WHERE name = 'backend'")
        .await
        .unwrap();

    let err = pull_requests::reassign_reviewer(&pool, &selector, "pr-1", "u2")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NoCandidate(_)), "{err:?}");

    let after = pull_requests::merge(&pool, "pr-1").await.unwrap();
    assert_eq!(after.reviewers, pr.reviewers);
}

#[actix_rt::test]
async fn test_reassign_draws_from_reviewers_current_team() {
    let pool = create_test_pool().await;
    seed_team(&pool, "backend", &["u1", "u2", "u3"]).await;
    let selector = first_selector();

    pull_requests::create(&pool, &selector, "pr-1", "Fix", "u1")
        .await
        .unwrap();

    // u2 moves to another team after being assigned.
    teams::create_or_update(&pool, "frontend", &[member("u2", true), member("f1", true)])
        .await
        .unwrap();

    let (updated, new_id) = pull_requests::reassign_reviewer(&pool, &selector, "pr-1", "u2")
        .await
        .unwrap();

    assert_eq!(new_id, "f1");
    assert_eq!(updated.reviewers, vec!["f1".to_string(), "u3".to_string()]);
}
