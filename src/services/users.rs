//! User activity and review lookups.

use tracing::info;

use crate::db::{DbPool, pull_requests as pr_db, users as db};
use crate::error::{AppError, AppResult};
use crate::models::{PullRequestShort, User};

/// Set a user's activity flag. Existing reviewer assignments are left as they are.
pub async fn set_active(pool: &DbPool, user_id: &str, is_active: bool) -> AppResult<User> {
    let txn = pool.begin().await?;

    let model = db::set_active(&txn, user_id, is_active)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User '{}'", user_id)))?;

    txn.commit().await?;

    info!("User activity updated: user_id={}, is_active={}", user_id, is_active);

    Ok(db::model_to_user(model))
}

/// Pull requests of any status where the user is currently a reviewer.
pub async fn review_assignments(pool: &DbPool, user_id: &str) -> AppResult<Vec<PullRequestShort>> {
    let conn = pool.connection();

    if db::find_by_id(conn, user_id).await?.is_none() {
        return Err(AppError::NotFound(format!("User '{}'", user_id)));
    }

    pr_db::list_where_reviewer(conn, user_id)
        .await?
        .into_iter()
        .map(pr_db::to_short)
        .collect()
}
