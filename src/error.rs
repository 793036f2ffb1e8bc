use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    PayloadTooLarge(String),

    /// The client sees `message` only; the cause is logged where it happened.
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Maps a store failure to an opaque 500, logging the cause and marking the
/// request span.
///
/// ```ignore
/// plant::Entity::find().all(&db).await.map_err(store_failure("Failed to fetch plants"))?;
/// ```
pub fn store_failure<E>(message: &'static str) -> impl FnOnce(E) -> ApiError
where
    E: std::fmt::Display,
{
    move |e| {
        tracing::Span::current().record("error", tracing::field::display(&e));
        tracing::error!("{message}: {e}");
        ApiError::internal(message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ApiResponse::<()>::failure(self.to_string()))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_error_class() {
        assert_eq!(
            ApiError::validation("Image ID is required").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::not_found("Image not found").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::internal("Failed to fetch plants").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn store_failure_hides_the_cause() {
        let err = store_failure("Failed to fetch plants")(sea_orm::DbErr::Custom(
            "relation \"plants\" does not exist".to_string(),
        ));
        assert_eq!(err.to_string(), "Failed to fetch plants");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
