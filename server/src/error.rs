use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use error_stack::{AttachmentKind, FrameKind, Report};
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

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

impl ErrorStatus {
    fn rejected(body: String) -> Self {
        ErrorStatus(Report::new(KernelError::Validation).attach_printable(body))
    }
}

impl From<JsonRejection> for ErrorStatus {
    fn from(rejection: JsonRejection) -> Self {
        Self::rejected(rejection.body_text())
    }
}

impl From<QueryRejection> for ErrorStatus {
    fn from(rejection: QueryRejection) -> Self {
        Self::rejected(rejection.body_text())
    }
}

impl From<PathRejection> for ErrorStatus {
    fn from(rejection: PathRejection) -> Self {
        Self::rejected(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl ErrorStatus {
    fn status(&self) -> StatusCode {
        match self.0.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND,
            KernelError::Validation => StatusCode::BAD_REQUEST,
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT,
            KernelError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The most recent printable attachment, falling back to the error kind.
    fn message(&self) -> String {
        self.0
            .frames()
            .find_map(|frame| match frame.kind() {
                FrameKind::Attachment(AttachmentKind::Printable(printable)) => {
                    Some(printable.to_string())
                }
                _ => None,
            })
            .unwrap_or_else(|| self.0.current_context().to_string())
    }
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{:?}", self.0);
        }
        let body = ErrorBody {
            kind: self.0.current_context().kind(),
            message: self.message(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::ErrorStatus;
    use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::KernelError;

    #[test]
    fn kinds_map_to_status() {
        let cases = [
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Validation, StatusCode::BAD_REQUEST),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (kind, status) in cases {
            let response = ErrorStatus::from(Report::new(kind)).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn message_is_latest_attachment() {
        let error = ErrorStatus::from(
            Report::new(KernelError::NotFound)
                .attach_printable("Author not found with id: 1")
                .attach_printable("Author not found with id: 2"),
        );
        assert_eq!(error.message(), "Author not found with id: 2");

        let error = ErrorStatus::from(Report::new(KernelError::Validation));
        assert_eq!(error.message(), KernelError::Validation.to_string());
    }
}
