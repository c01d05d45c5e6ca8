//! Pull request lifecycle: creation with reviewer assignment, merge and
//! single-reviewer reassignment.
//!
//! Each operation runs in one transaction; returning early with an error drops
//! the transaction and rolls back every write made so far.

use std::collections::HashSet;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::info;

use crate::db::{DbPool, pull_requests as db, users as users_db};
use crate::error::{AppError, AppResult, Conflict};
use crate::models::PullRequest;

use super::selector::ReviewerSelector;

/// Reviewers assigned to a freshly created pull request.
pub const REVIEWERS_PER_PULL_REQUEST: usize = 2;

/// Timestamps are kept at the precision the database stores.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Create an OPEN pull request and assign up to two reviewers from the author's team.
pub async fn create(
    pool: &DbPool,
    selector: &ReviewerSelector,
    pr_id: &str,
    name: &str,
    author_id: &str,
) -> AppResult<PullRequest> {
    let txn = pool.begin().await?;

    if db::find_by_id(&txn, pr_id).await?.is_some() {
        return Err(AppError::AlreadyExists {
            kind: Conflict::PullRequest,
            id: pr_id.to_string(),
        });
    }

    let author = users_db::find_by_id(&txn, author_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Author '{}'", author_id)))?;

    let team_name = author
        .team_name
        .clone()
        .ok_or_else(|| AppError::NoTeam(author_id.to_string()))?;

    let candidates = users_db::list_active_by_team(&txn, &team_name).await?;
    let exclude: HashSet<&str> = [author.id.as_str()].into_iter().collect();
    let reviewers: Vec<String> = selector
        .select(&candidates, &exclude, REVIEWERS_PER_PULL_REQUEST)
        .into_iter()
        .map(|u| u.id.clone())
        .collect();

    let model = db::insert(&txn, pr_id, name, author_id, now()).await?;
    db::add_reviewers(&txn, pr_id, &reviewers).await?;
    let pr = db::load(&txn, model).await?;

    txn.commit().await?;

    info!(
        "Pull request created: pr_id={}, author_id={}, team={}, reviewers={:?}",
        pr.id, pr.author_id, team_name, pr.reviewers
    );

    Ok(pr)
}

/// Mark a pull request MERGED. Merging again returns it unchanged.
pub async fn merge(pool: &DbPool, pr_id: &str) -> AppResult<PullRequest> {
    let txn = pool.begin().await?;

    let model = db::lock_by_id(&txn, pr_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("PR '{}'", pr_id)))?;

    if db::parse_status(&model.status)?.is_terminal() {
        let pr = db::load(&txn, model).await?;
        txn.commit().await?;
        return Ok(pr);
    }

    db::mark_merged(&txn, model, now()).await?;

    // Re-read so repeated merges report the stored timestamp verbatim.
    let merged = db::find_by_id(&txn, pr_id)
        .await?
        .ok_or_else(|| AppError::Database(format!("PR '{}' vanished during merge", pr_id)))?;
    let pr = db::load(&txn, merged).await?;

    txn.commit().await?;

    info!("Pull request merged: pr_id={}", pr.id);

    Ok(pr)
}

/// Replace one reviewer with a random active member of the old reviewer's team.
///
/// Returns the updated pull request and the id of the new reviewer.
pub async fn reassign_reviewer(
    pool: &DbPool,
    selector: &ReviewerSelector,
    pr_id: &str,
    old_reviewer_id: &str,
) -> AppResult<(PullRequest, String)> {
    let txn = pool.begin().await?;

    let model = db::lock_by_id(&txn, pr_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("PR '{}'", pr_id)))?;

    let old_reviewer = users_db::find_by_id(&txn, old_reviewer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}'", old_reviewer_id)))?;

    let pr = db::load(&txn, model).await?;

    if pr.status.is_terminal() {
        return Err(AppError::InvalidState(pr.id));
    }

    if !pr.has_reviewer(old_reviewer_id) {
        return Err(AppError::NotAssigned {
            pr_id: pr.id,
            user_id: old_reviewer_id.to_string(),
        });
    }

    // Team membership may have drifted since creation: draw from the old reviewer's team.
    let team_name = old_reviewer.team_name.clone().ok_or_else(|| {
        AppError::NoCandidate(format!("reviewer '{}' has no team", old_reviewer_id))
    })?;

    let candidates = users_db::list_active_by_team(&txn, &team_name).await?;
    let mut exclude: HashSet<&str> = pr.reviewers.iter().map(String::as_str).collect();
    exclude.insert(pr.author_id.as_str());
    exclude.insert(old_reviewer_id);

    let new_reviewer_id = selector
        .select_one(&candidates, &exclude)
        .map(|u| u.id.clone())
        .ok_or_else(|| AppError::NoCandidate(team_name.clone()))?;

    db::remove_reviewer(&txn, &pr.id, old_reviewer_id).await?;
    db::add_reviewers(&txn, &pr.id, std::slice::from_ref(&new_reviewer_id)).await?;

    let model = db::find_by_id(&txn, &pr.id)
        .await?
        .ok_or_else(|| AppError::Database(format!("PR '{}' vanished during reassign", pr.id)))?;
    let updated = db::load(&txn, model).await?;

    txn.commit().await?;

    info!(
        "Reviewer reassigned: pr_id={}, old={}, new={}, team={}",
        updated.id, old_reviewer_id, new_reviewer_id, team_name
    );

    Ok((updated, new_reviewer_id))
}
