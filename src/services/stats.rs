use crate::db::{DbPool, pull_requests::parse_status, stats as db};
use crate::error::AppResult;
use crate::models::{PrReviewerStats, ReviewStats, UserReviewStats};

/// Reviewer load per user and reviewer count per pull request.
pub async fn review_stats(pool: &DbPool) -> AppResult<ReviewStats> {
    let conn = pool.connection();

    let user_review_stats = db::user_review_counts(conn)
        .await?
        .into_iter()
        .map(|row| UserReviewStats {
            id: row.id,
            username: row.username,
            prs_reviewed: row.prs_reviewed,
            open_prs_reviewed: row.open_prs_reviewed,
            merged_prs_reviewed: row.merged_prs_reviewed,
        })
        .collect();

    let pr_reviewer_stats = db::pr_reviewer_counts(conn)
        .await?
        .into_iter()
        .map(|row| -> AppResult<PrReviewerStats> {
            Ok(PrReviewerStats {
                status: parse_status(&row.status)?,
                id: row.id,
                name: row.name,
                team_name: row.team_name,
                reviewers_count: row.reviewers_count,
                created_at: row.created_at,
                merged_at: row.merged_at,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ReviewStats {
        user_review_stats,
        pr_reviewer_stats,
    })
}
