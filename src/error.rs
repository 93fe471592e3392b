use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::sqlx::sqlite::SqliteError;
use sea_orm::{DbErr, RuntimeErr, SqlErr};

use crate::models::ValidationError;

/// Failure kinds of the profile store and query surface.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),
    #[error("Profile already exists. Use PUT /profile to update.")]
    AlreadyExists,
    #[error("Profile not found")]
    NotFound,
    #[error("Profile was created concurrently by another request")]
    Conflict,
    #[error("Storage failure: {0}")]
    Storage(#[from] DbErr),
}

impl ProfileError {
    /// Map a storage failure while creating the profile. A unique violation, or
    /// SQLite refusing the write lock, means another request is creating it.
    pub fn from_profile_create(err: DbErr) -> Self {
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
            || is_write_contention(&err)
        {
            return ProfileError::Conflict;
        }
        ProfileError::Storage(err)
    }
}

/// SQLITE_BUSY (5) or SQLITE_LOCKED (6), including extended codes such as
/// SQLITE_BUSY_SNAPSHOT (517).
fn is_write_contention(err: &DbErr) -> bool {
    let runtime = match err {
        DbErr::Conn(e) | DbErr::Exec(e) | DbErr::Query(e) => e,
        _ => return false,
    };
    let RuntimeErr::SqlxError(sqlx_err) = runtime else {
        return false;
    };

    sqlx_err
        .as_database_error()
        .filter(|e| e.try_downcast_ref::<SqliteError>().is_some())
        .and_then(|e| e.code())
        .and_then(|code| code.parse::<i32>().ok())
        .is_some_and(|code| matches!(code & 0xff, 5 | 6))
}

impl ResponseError for ProfileError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProfileError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProfileError::AlreadyExists => StatusCode::BAD_REQUEST,
            ProfileError::NotFound => StatusCode::NOT_FOUND,
            ProfileError::Conflict => StatusCode::CONFLICT,
            ProfileError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ProfileError::Storage(e) = self {
            tracing::error!("Storage failure: {e}");
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.to_string(),
        }))
    }
}
