//! Team membership: team upsert, lookup and bulk deactivation with safe
//! reviewer replacement.

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info, warn};

use crate::db::{DbPool, pull_requests as pr_db, teams as db, users as users_db};
use crate::entity::user;
use crate::error::{AppError, AppResult, Conflict};
use crate::models::{DeactivationReport, ReviewerReplacement, Team, TeamMemberInput, TeamUpsert};

use super::selector::ReviewerSelector;

/// Create a team and upsert its members.
///
/// Calling this for an existing team with an empty member list returns the
/// team unchanged (`is_existing`); calling it with members is a conflict.
pub async fn create_or_update(
    pool: &DbPool,
    team_name: &str,
    members: &[TeamMemberInput],
) -> AppResult<TeamUpsert> {
    let txn = pool.begin().await?;

    let existing = db::lock_by_name(&txn, team_name).await?;
    let is_existing = existing.is_some();
    match existing {
        Some(_) if !members.is_empty() => {
            return Err(AppError::AlreadyExists {
                kind: Conflict::Team,
                id: team_name.to_string(),
            });
        }
        Some(_) => {}
        None => {
            db::insert(&txn, team_name).await?;
        }
    }

    for member in members {
        users_db::upsert(
            &txn,
            &member.user_id,
            &member.username,
            member.is_active,
            Some(team_name),
        )
        .await?;
    }

    let team = load_team(&txn, team_name).await?;

    txn.commit().await?;

    info!(
        "Team upserted: team={}, existing={}, members_submitted={}, members_total={}",
        team.team_name,
        is_existing,
        members.len(),
        team.members.len()
    );

    Ok(TeamUpsert { team, is_existing })
}

/// Get a team with its members.
pub async fn get(pool: &DbPool, team_name: &str) -> AppResult<Team> {
    let conn = pool.connection();

    if db::find_by_name(conn, team_name).await?.is_none() {
        return Err(AppError::NotFound(format!("Team '{}'", team_name)));
    }

    load_team(conn, team_name).await
}

async fn load_team<C: sea_orm::ConnectionTrait>(db: &C, team_name: &str) -> AppResult<Team> {
    let members = users_db::list_by_team(db, team_name)
        .await?
        .into_iter()
        .map(users_db::model_to_member)
        .collect();

    Ok(Team {
        team_name: team_name.to_string(),
        members,
    })
}

/// Deactivate team members, first replacing them on every OPEN pull request they review.
///
/// `user_ids` that is omitted or empty targets the whole team; ids outside the
/// team are ignored.
/// A slot with no remaining candidate is dropped rather than failing the batch.
pub async fn bulk_deactivate(
    pool: &DbPool,
    selector: &ReviewerSelector,
    team_name: &str,
    user_ids: Option<&[String]>,
) -> AppResult<DeactivationReport> {
    let txn = pool.begin().await?;

    db::lock_by_name(&txn, team_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Team '{}'", team_name)))?;

    let members = users_db::list_by_team(&txn, team_name).await?;
    let targets: Vec<String> = match user_ids {
        Some(ids) if !ids.is_empty() => {
            let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
            members
                .iter()
                .filter(|m| wanted.contains(m.id.as_str()))
                .map(|m| m.id.clone())
                .collect()
        }
        _ => members.iter().map(|m| m.id.clone()).collect(),
    };

    if targets.is_empty() {
        txn.commit().await?;
        debug!("Bulk deactivation matched no members: team={}", team_name);
        return Ok(DeactivationReport::empty(team_name));
    }

    let target_set: HashSet<&str> = targets.iter().map(String::as_str).collect();
    let replacement_pool: Vec<user::Model> = members
        .iter()
        .filter(|m| m.is_active && !target_set.contains(m.id.as_str()))
        .cloned()
        .collect();

    let open_prs = pr_db::lock_open_with_reviewer_in(&txn, &targets).await?;
    let pr_ids: Vec<String> = open_prs.iter().map(|p| p.id.clone()).collect();
    let mut reviewers_by_pr = pr_db::reviewer_ids_batch(&txn, &pr_ids).await?;

    let mut replacements = Vec::new();

    for pr in &open_prs {
        let reviewers = reviewers_by_pr.remove(&pr.id).unwrap_or_default();
        let to_replace: BTreeSet<&str> = reviewers
            .iter()
            .map(String::as_str)
            .filter(|r| target_set.contains(r))
            .collect();

        // Grows as replacements land so no candidate is booked twice on this PR.
        let mut taken: HashSet<String> = reviewers.iter().cloned().collect();
        taken.insert(pr.author_id.clone());

        for old_id in to_replace {
            let new_id = {
                let exclude: HashSet<&str> = taken.iter().map(String::as_str).collect();
                selector
                    .select_one(&replacement_pool, &exclude)
                    .map(|u| u.id.clone())
            };

            pr_db::remove_reviewer(&txn, &pr.id, old_id).await?;

            match &new_id {
                Some(new_id) => {
                    pr_db::add_reviewers(&txn, &pr.id, std::slice::from_ref(new_id)).await?;
                    debug!(
                        "Reviewer replaced: pr_id={}, old={}, new={}",
                        pr.id, old_id, new_id
                    );
                    taken.insert(new_id.clone());
                }
                None => {
                    warn!(
                        "No replacement candidate, reviewer slot dropped: pr_id={}, old={}",
                        pr.id, old_id
                    );
                }
            }

            replacements.push(ReviewerReplacement {
                pull_request_id: pr.id.clone(),
                old_reviewer_id: old_id.to_string(),
                new_reviewer_id: new_id,
            });
        }
    }

    users_db::deactivate_many(&txn, &targets).await?;

    txn.commit().await?;

    let report = DeactivationReport {
        team_name: team_name.to_string(),
        deactivated_user_ids: targets,
        replacements,
    };

    info!(
        "Bulk deactivation complete: team={}, deactivated={}, prs_touched={}, slots_replaced={}, slots_dropped={}",
        report.team_name,
        report.deactivated_user_ids.len(),
        open_prs.len(),
        report.replacements.len() - report.dropped_slots(),
        report.dropped_slots()
    );

    Ok(report)
}
