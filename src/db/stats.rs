//! Aggregate queries backing the statistics endpoint.

use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, FromQueryResult, Statement};

use crate::error::{AppError, AppResult};

/// Per-user assignment counts.
#[derive(Debug, FromQueryResult)]
pub struct UserReviewRow {
    pub id: String,
    pub username: String,
    pub prs_reviewed: i64,
    pub open_prs_reviewed: i64,
    pub merged_prs_reviewed: i64,
}

/// Per-pull-request reviewer count.
#[derive(Debug, FromQueryResult)]
pub struct PrReviewerRow {
    pub id: String,
    pub name: String,
    pub status: String,
    pub team_name: Option<String>,
    pub reviewers_count: i64,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

const USER_REVIEW_SQL: &str = r#"
    SELECT u.id AS id,
           u.username AS username,
           COUNT(*) AS prs_reviewed,
           SUM(CASE WHEN p.status = 'OPEN' THEN 1 ELSE 0 END) AS open_prs_reviewed,
           SUM(CASE WHEN p.status = 'MERGED' THEN 1 ELSE 0 END) AS merged_prs_reviewed
    FROM pull_request_reviewers r
    JOIN users u ON u.id = r.user_id
    JOIN pull_requests p ON p.id = r.pull_request_id
    GROUP BY u.id, u.username
    ORDER BY prs_reviewed DESC, u.id ASC
"#;

const PR_REVIEWER_SQL: &str = r#"
    SELECT p.id AS id,
           p.name AS name,
           p.status AS status,
           u.team_name AS team_name,
           COUNT(r.user_id) AS reviewers_count,
           p.created_at AS created_at,
           p.merged_at AS merged_at
    FROM pull_requests p
    JOIN users u ON u.id = p.author_id
    LEFT JOIN pull_request_reviewers r ON r.pull_request_id = p.id
    GROUP BY p.id, p.name, p.status, u.team_name, p.created_at, p.merged_at
    ORDER BY p.created_at DESC, p.id ASC
"#;

/// Users with at least one reviewer assignment, busiest first.
pub async fn user_review_counts<C: ConnectionTrait>(db: &C) -> AppResult<Vec<UserReviewRow>> {
    let stmt = Statement::from_string(db.get_database_backend(), USER_REVIEW_SQL.to_owned());

    UserReviewRow::find_by_statement(stmt)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to aggregate reviewer load: {}", e)))
}

/// Every pull request with its reviewer count, newest first.
pub async fn pr_reviewer_counts<C: ConnectionTrait>(db: &C) -> AppResult<Vec<PrReviewerRow>> {
    let stmt = Statement::from_string(db.get_database_backend(), PR_REVIEWER_SQL.to_owned());

    PrReviewerRow::find_by_statement(stmt)
        .all(db)
        .await
        .map_err(|e| AppError::Database(format!("Failed to aggregate reviewer counts: {}", e)))
}
