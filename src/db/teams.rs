//! Database operations for teams.

use chrono::Utc;
use sea_orm::*;

use crate::entity::team;
use crate::error::AppResult;

/// Find a team by name.
pub async fn find_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> AppResult<Option<team::Model>> {
    let result = team::Entity::find_by_id(name.to_string()).one(db).await?;
    Ok(result)
}

/// Find a team by name and lock its row until the transaction ends.
pub async fn lock_by_name<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> AppResult<Option<team::Model>> {
    let result = team::Entity::find_by_id(name.to_string())
        .lock_exclusive()
        .one(db)
        .await?;
    Ok(result)
}

/// Insert a new team.
pub async fn insert<C: ConnectionTrait>(db: &C, name: &str) -> AppResult<team::Model> {
    let model = team::ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}
