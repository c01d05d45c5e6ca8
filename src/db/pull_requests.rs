//! Database operations for pull requests and their reviewer assignments.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};
use sea_orm::*;

use crate::entity::pull_request::{self as pr, ActiveModel, Entity as PullRequestEntity};
use crate::entity::pull_request_reviewer as reviewer;
use crate::error::{AppError, AppResult, Conflict};
use crate::models::{PrStatus, PullRequest, PullRequestShort};

/// Find a pull request by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> AppResult<Option<pr::Model>> {
    let result = PullRequestEntity::find_by_id(id.to_string()).one(db).await?;
    Ok(result)
}

/// Find a pull request by ID and lock its row until the transaction ends.
pub async fn lock_by_id<C: ConnectionTrait>(db: &C, id: &str) -> AppResult<Option<pr::Model>> {
    let result = PullRequestEntity::find_by_id(id.to_string())
        .lock_exclusive()
        .one(db)
        .await?;
    Ok(result)
}

/// Insert a new OPEN pull request.
pub async fn insert<C: ConnectionTrait>(
    db: &C,
    id: &str,
    name: &str,
    author_id: &str,
    created_at: DateTime<Utc>,
) -> AppResult<pr::Model> {
    let model = ActiveModel {
        id: Set(id.to_string()),
        name: Set(name.to_string()),
        author_id: Set(author_id.to_string()),
        status: Set(PrStatus::Open.as_str().to_string()),
        created_at: Set(created_at),
        merged_at: Set(None),
    };

    model.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::AlreadyExists {
            kind: Conflict::PullRequest,
            id: id.to_string(),
        },
        _ => AppError::Database(format!("Failed to insert pull request: {}", e)),
    })
}

/// Transition to MERGED and stamp `merged_at`.
pub async fn mark_merged<C: ConnectionTrait>(
    db: &C,
    model: pr::Model,
    merged_at: DateTime<Utc>,
) -> AppResult<pr::Model> {
    let mut active: ActiveModel = model.into();
    active.status = Set(PrStatus::Merged.as_str().to_string());
    active.merged_at = Set(Some(merged_at));

    let result = active
        .update(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to merge pull request: {}", e)))?;

    Ok(result)
}

/// Reviewer ids of one pull request, sorted.
pub async fn reviewer_ids<C: ConnectionTrait>(db: &C, pr_id: &str) -> AppResult<Vec<String>> {
    let rows = reviewer::Entity::find()
        .filter(reviewer::Column::PullRequestId.eq(pr_id))
        .order_by_asc(reviewer::Column::UserId)
        .all(db)
        .await?;

    Ok(rows.into_iter().map(|r| r.user_id).collect())
}

/// Reviewer ids for many pull requests at once.
pub async fn reviewer_ids_batch<C: ConnectionTrait>(
    db: &C,
    pr_ids: &[String],
) -> AppResult<HashMap<String, Vec<String>>> {
    if pr_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = reviewer::Entity::find()
        .filter(reviewer::Column::PullRequestId.is_in(pr_ids.iter().map(String::as_str)))
        .order_by_asc(reviewer::Column::PullRequestId)
        .order_by_asc(reviewer::Column::UserId)
        .all(db)
        .await?;

    let mut map: HashMap<String, Vec<String>> = HashMap::new();
    for row in rows {
        map.entry(row.pull_request_id).or_default().push(row.user_id);
    }

    Ok(map)
}

/// Assign reviewers to a pull request.
pub async fn add_reviewers<C: ConnectionTrait>(
    db: &C,
    pr_id: &str,
    user_ids: &[String],
) -> AppResult<()> {
    for user_id in user_ids {
        let model = reviewer::ActiveModel {
            pull_request_id: Set(pr_id.to_string()),
            user_id: Set(user_id.clone()),
        };
        model.insert(db).await?;
    }
    Ok(())
}

/// Unassign one reviewer. Returns whether a row was removed.
pub async fn remove_reviewer<C: ConnectionTrait>(
    db: &C,
    pr_id: &str,
    user_id: &str,
) -> AppResult<bool> {
    let result = reviewer::Entity::delete_many()
        .filter(reviewer::Column::PullRequestId.eq(pr_id))
        .filter(reviewer::Column::UserId.eq(user_id))
        .exec(db)
        .await?;

    Ok(result.rows_affected > 0)
}

/// Pull requests (any status) where the user is a reviewer, ordered by id.
pub async fn list_where_reviewer<C: ConnectionTrait>(
    db: &C,
    user_id: &str,
) -> AppResult<Vec<pr::Model>> {
    let result = PullRequestEntity::find()
        .inner_join(reviewer::Entity)
        .filter(reviewer::Column::UserId.eq(user_id))
        .order_by_asc(pr::Column::Id)
        .all(db)
        .await?;

    Ok(result)
}

/// OPEN pull requests having any of the given users as reviewer, locked, ordered by id.
pub async fn lock_open_with_reviewer_in<C: ConnectionTrait>(
    db: &C,
    user_ids: &[String],
) -> AppResult<Vec<pr::Model>> {
    if user_ids.is_empty() {
        return Ok(Vec::new());
    }

    // Two steps: row locks are not allowed together with DISTINCT.
    let assignments = reviewer::Entity::find()
        .filter(reviewer::Column::UserId.is_in(user_ids.iter().map(String::as_str)))
        .all(db)
        .await?;

    let pr_ids: BTreeSet<String> = assignments
        .into_iter()
        .map(|a| a.pull_request_id)
        .collect();

    if pr_ids.is_empty() {
        return Ok(Vec::new());
    }

    let result = PullRequestEntity::find()
        .filter(pr::Column::Id.is_in(pr_ids))
        .filter(pr::Column::Status.eq(PrStatus::Open.as_str()))
        .order_by_asc(pr::Column::Id)
        .lock_exclusive()
        .all(db)
        .await?;

    Ok(result)
}

/// Build the domain pull request from a row and its reviewers.
pub fn to_domain(m: pr::Model, reviewers: Vec<String>) -> AppResult<PullRequest> {
    let status = parse_status(&m.status)?;
    Ok(PullRequest {
        id: m.id,
        name: m.name,
        author_id: m.author_id,
        status,
        reviewers,
        created_at: m.created_at,
        merged_at: m.merged_at,
    })
}

/// Load a pull request together with its reviewers.
pub async fn load<C: ConnectionTrait>(db: &C, m: pr::Model) -> AppResult<PullRequest> {
    let reviewers = reviewer_ids(db, &m.id).await?;
    to_domain(m, reviewers)
}

pub fn to_short(m: pr::Model) -> AppResult<PullRequestShort> {
    let status = parse_status(&m.status)?;
    Ok(PullRequestShort {
        pull_request_id: m.id,
        pull_request_name: m.name,
        author_id: m.author_id,
        status,
    })
}

pub(crate) fn parse_status(raw: &str) -> AppResult<PrStatus> {
    PrStatus::parse(raw)
        .ok_or_else(|| AppError::Database(format!("Unknown pull request status '{}'", raw)))
}
