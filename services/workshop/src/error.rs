use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use autofix_domain::validation::ValidationErrors;

/// Workshop service error variants.
#[derive(Debug, thiserror::Error)]
pub enum WorkshopError {
    #[error("access denied")]
    AccessDenied,
    #[error("record not found")]
    NotFound,
    #[error("record is still referenced by other records")]
    ReferentialBlock,
    #[error("validation failed")]
    Validation(#[from] ValidationErrors),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WorkshopError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AccessDenied => "ACCESS_DENIED",
            Self::NotFound => "NOT_FOUND",
            Self::ReferentialBlock => "REFERENTIAL_BLOCK",
            Self::Validation(_) => "VALIDATION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for WorkshopError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::AccessDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ReferentialBlock => StatusCode::CONFLICT,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Self::Validation(errors) = &self {
            body["errors"] = serde_json::to_value(errors).unwrap_or_default();
        }
        (status, axum::Json(body)).into_response()
    }
}
