use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::ErrorResponse;
use crate::error::NotesError;

/// A [`NotesError`] on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub NotesError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            NotesError::MissingId
            | NotesError::InvalidId(_)
            | NotesError::InvalidContent(_)
            | NotesError::UnknownBlockType(_)
            | NotesError::BlockNotFound(_)
            | NotesError::NoEditableText { .. }
            | NotesError::KindMismatch { .. }
            | NotesError::Api(_) => StatusCode::BAD_REQUEST,
            NotesError::NoteNotFound(_) => StatusCode::NOT_FOUND,
            NotesError::StaleRevision { .. }
            | NotesError::RevisionExhausted(_)
            | NotesError::Conflict(_) => StatusCode::CONFLICT,
            NotesError::Remote { .. } => StatusCode::BAD_GATEWAY,
            NotesError::Io(_)
            | NotesError::Serialization(_)
            | NotesError::Http(_)
            | NotesError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<NotesError> for ApiError {
    fn from(err: NotesError) -> Self {
        ApiError(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(NotesError::Api(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(NotesError::Api(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "request rejected");
        }

        let body = ErrorResponse {
            success: false,
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
