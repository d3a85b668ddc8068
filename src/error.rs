use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::SectionId;

/// Failures of the catalog stores and the section resolver.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog data unavailable: {0}")]
    DataUnavailable(#[from] sea_orm::DbErr),
    #[error("section {0} not found")]
    NotFound(SectionId),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    source: anyhow::Error,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self { status: StatusCode::BAD_REQUEST, source: anyhow::anyhow!(message.into()) }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.source.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        let status = match &err {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        Self { status, source: anyhow::Error::new(err) }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        CatalogError::from(err).into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status().is_server_error() {
            tracing::error!(status = %self.status, error = %self.source, "request failed");
        }
        let body = Json(serde_json::json!({ "error": self.source.to_string() }));
        (self.status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_http_statuses() {
        let not_found = AppError::from(CatalogError::NotFound(42));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.to_string(), "section 42 not found");

        let unavailable = AppError::from(sea_orm::DbErr::Custom("connection refused".into()));
        assert_eq!(unavailable.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
