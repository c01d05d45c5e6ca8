//! Domain error types for the reviewer service.
//!
//! Uses thiserror for ergonomic error handling with automatic Display implementations.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use std::fmt;

/// Kind of record whose unique identity collided on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conflict {
    Team,
    PullRequest,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::Team => write!(f, "team_name"),
            Conflict::PullRequest => write!(f, "PR id"),
        }
    }
}

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A create collided with an existing unique identity
    #[error("{kind} '{id}' already exists")]
    AlreadyExists { kind: Conflict, id: String },

    /// Referenced team, user or pull request does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// The author has no team, so no reviewers can be drawn
    #[error("Author '{0}' has no team")]
    NoTeam(String),

    /// Operation forbidden in the pull request's current state
    #[error("cannot reassign on merged PR '{0}'")]
    InvalidState(String),

    /// Reassignment target is not a current reviewer
    #[error("reviewer '{user_id}' is not assigned to PR '{pr_id}'")]
    NotAssigned { pr_id: String, user_id: String },

    /// No eligible replacement reviewer exists
    #[error("no active replacement candidate in team: {0}")]
    NoCandidate(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    /// Stable machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::AlreadyExists {
                kind: Conflict::Team,
                ..
            } => "TEAM_EXISTS",
            AppError::AlreadyExists {
                kind: Conflict::PullRequest,
                ..
            } => "PR_EXISTS",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::NoTeam(_) => "NO_TEAM",
            AppError::InvalidState(_) => "PR_MERGED",
            AppError::NotAssigned { .. } => "NOT_ASSIGNED",
            AppError::NoCandidate(_) => "NO_CANDIDATE",
            AppError::InvalidInput(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
        }
    }

    /// True for infrastructure failures, false for domain outcomes.
    pub fn is_internal(&self) -> bool {
        matches!(self, AppError::Database(_))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::AlreadyExists {
                kind: Conflict::Team,
                ..
            } => StatusCode::BAD_REQUEST,
            AppError::AlreadyExists {
                kind: Conflict::PullRequest,
                ..
            } => StatusCode::CONFLICT,
            AppError::NotFound(_) | AppError::NoTeam(_) => StatusCode::NOT_FOUND,
            AppError::InvalidState(_) | AppError::NotAssigned { .. } | AppError::NoCandidate(_) => {
                StatusCode::CONFLICT
            }
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Database(err_str) => {
                tracing::error!("Database error: {}", err_str);
                "An internal database error occurred".to_string()
            }
            _ => self.to_string(),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message,
            },
        })
    }
}

/// Error response body matching OpenAPI schema.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Code and human-readable message of a failed request.
#[derive(Debug, serde::Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error.code, self.error.message)
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        AppError::Database(err.to_string())
    }
}
