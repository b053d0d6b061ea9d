use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Errors reported by the user datastore client.
///
/// The service layer never constructs or rewrites these; it hands back
/// exactly what the repository produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(i32),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Datastore unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<sea_orm::DbErr> for UserError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
            return UserError::DuplicateEmail(detail);
        }

        match err {
            DbErr::Conn(e) => UserError::Unavailable(e.to_string()),
            DbErr::ConnectionAcquire(e) => UserError::Unavailable(e.to_string()),
            other => UserError::Internal(format!("Database error: {}", other)),
        }
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User {} not found", id)),
            UserError::DuplicateEmail(email) => {
                AppError::Conflict(format!("User with email '{}' already exists", email))
            }
            UserError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use sea_orm::{DbErr, RuntimeErr};

    #[test]
    fn test_connection_errors_are_unavailable() {
        let err: UserError = DbErr::Conn(RuntimeErr::Internal("connection refused".into())).into();
        assert!(matches!(err, UserError::Unavailable(_)));
    }

    #[test]
    fn test_other_db_errors_are_internal() {
        let err: UserError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, UserError::Internal(msg) if msg.contains("boom")));
    }

    #[test]
    fn test_http_status_mapping() {
        let cases = [
            (UserError::NotFound(1), StatusCode::NOT_FOUND),
            (
                UserError::DuplicateEmail("test@example.com".into()),
                StatusCode::CONFLICT,
            ),
            (
                UserError::Unavailable("down".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                UserError::Internal("oops".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
