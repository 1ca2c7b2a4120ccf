use std::process::{ExitCode, Termination};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::Report;
use serde::Serialize;

use kernel::KernelError;

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

fn status_of(error: &KernelError) -> (StatusCode, &'static str) {
    match error {
        KernelError::Conflict => (StatusCode::CONFLICT, "conflict"),
        KernelError::InvalidTransition => (StatusCode::CONFLICT, "invalid_transition"),
        KernelError::AlreadyCompleted => (StatusCode::CONFLICT, "already_completed"),
        KernelError::Concurrency => (StatusCode::CONFLICT, "concurrency"),
        KernelError::NotFound => (StatusCode::NOT_FOUND, "not_found"),
        KernelError::InvalidInterval => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_interval"),
        KernelError::InvalidMileage => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_mileage"),
        KernelError::InvalidAmount => (StatusCode::UNPROCESSABLE_ENTITY, "invalid_amount"),
        KernelError::InvalidToken => (StatusCode::FORBIDDEN, "invalid_token"),
        KernelError::Timeout => (StatusCode::REQUEST_TIMEOUT, "timeout"),
        KernelError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let context = self.0.current_context();
        let (status, error) = status_of(context);
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        } else {
            tracing::debug!("{:?}", self.0);
        }
        let body = ErrorBody {
            error,
            message: context.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;

    use kernel::KernelError;

    use super::ErrorStatus;

    #[test]
    fn kernel_errors_map_to_status_codes() {
        let cases = [
            (KernelError::Conflict, StatusCode::CONFLICT),
            (KernelError::InvalidTransition, StatusCode::CONFLICT),
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::InvalidMileage, StatusCode::UNPROCESSABLE_ENTITY),
            (KernelError::InvalidToken, StatusCode::FORBIDDEN),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            let response = ErrorStatus::from(Report::new(error)).into_response();
            assert_eq!(response.status(), status);
        }
    }
}
