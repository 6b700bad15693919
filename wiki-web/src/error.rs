//! Erros da API e seu mapeamento para respostas HTTP `{"detail": "..."}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;
use wiki_core::AnalysisError;

use crate::store::StoreError;
use crate::wikipedia::WikiError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("{0}")]
    Wikipedia(#[from] WikiError),

    #[error("database error: {0}")]
    Database(sqlx::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Duplicate(String),

    #[error("{0}")]
    Validation(String),

    #[error("analysis timed out after {0} seconds")]
    Timeout(u64),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::Duplicate("Article is already saved".to_string()),
            StoreError::NotFound(_) => ApiError::NotFound("Article not found".to_string()),
            StoreError::Database(e) => ApiError::Database(e),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Duplicate(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Wikipedia(_) => StatusCode::BAD_GATEWAY,
            ApiError::Analysis(_) | ApiError::Database(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{self}");
        }
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Duplicate("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Validation("x".into()).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ApiError::Timeout(30).status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ApiError::Wikipedia(WikiError::Status(500)).status(), StatusCode::BAD_GATEWAY);
        assert_eq!(
            ApiError::from(AnalysisError::unavailable("rules", "down")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_errors_convert() {
        assert!(matches!(ApiError::from(StoreError::Duplicate), ApiError::Duplicate(_)));
        assert!(matches!(ApiError::from(StoreError::NotFound(3)), ApiError::NotFound(_)));
    }
}
