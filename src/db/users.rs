//! Database operations for users.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::entity::user;
use crate::error::AppResult;
use crate::models::{TeamMember, User};

/// Find a user by ID.
pub async fn find_by_id<C: ConnectionTrait>(db: &C, id: &str) -> AppResult<Option<user::Model>> {
    let result = user::Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(result)
}

/// Create the user, or overwrite username, activity and team link of an existing one.
pub async fn upsert<C: ConnectionTrait>(
    db: &C,
    id: &str,
    username: &str,
    is_active: bool,
    team_name: Option<&str>,
) -> AppResult<user::Model> {
    let existing = user::Entity::find_by_id(id.to_string())
        .lock_exclusive()
        .one(db)
        .await?;

    if let Some(m) = existing {
        let mut active: user::ActiveModel = m.into();
        active.username = Set(username.to_string());
        active.is_active = Set(is_active);
        active.team_name = Set(team_name.map(|s| s.to_string()));
        return Ok(active.update(db).await?);
    }

    let model = user::ActiveModel {
        id: Set(id.to_string()),
        username: Set(username.to_string()),
        team_name: Set(team_name.map(|s| s.to_string())),
        is_active: Set(is_active),
        created_at: Set(Utc::now()),
    };

    Ok(model.insert(db).await?)
}

/// All members of a team, ordered by id.
pub async fn list_by_team<C: ConnectionTrait>(
    db: &C,
    team_name: &str,
) -> AppResult<Vec<user::Model>> {
    let result = user::Entity::find()
        .filter(user::Column::TeamName.eq(team_name))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(result)
}

/// Active members of a team, ordered by id.
pub async fn list_active_by_team<C: ConnectionTrait>(
    db: &C,
    team_name: &str,
) -> AppResult<Vec<user::Model>> {
    let result = user::Entity::find()
        .filter(user::Column::TeamName.eq(team_name))
        .filter(user::Column::IsActive.eq(true))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?;
    Ok(result)
}

/// Set the activity flag. Returns None when the user does not exist.
pub async fn set_active<C: ConnectionTrait>(
    db: &C,
    id: &str,
    is_active: bool,
) -> AppResult<Option<user::Model>> {
    let Some(m) = user::Entity::find_by_id(id.to_string())
        .lock_exclusive()
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let mut active: user::ActiveModel = m.into();
    active.is_active = Set(is_active);
    Ok(Some(active.update(db).await?))
}

/// Clear the activity flag of every listed user.
pub async fn deactivate_many<C: ConnectionTrait>(db: &C, ids: &[String]) -> AppResult<u64> {
    if ids.is_empty() {
        return Ok(0);
    }

    let result = user::Entity::update_many()
        .col_expr(user::Column::IsActive, Expr::value(false))
        .filter(user::Column::Id.is_in(ids.iter().map(String::as_str)))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}

pub fn model_to_user(m: user::Model) -> User {
    User {
        user_id: m.id,
        username: m.username,
        team_name: m.team_name,
        is_active: m.is_active,
    }
}

pub fn model_to_member(m: user::Model) -> TeamMember {
    TeamMember {
        user_id: m.id,
        username: m.username,
        is_active: m.is_active,
    }
}
