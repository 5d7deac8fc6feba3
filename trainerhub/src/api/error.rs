use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use trainerhub_core::error::DocumentStoreError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error_code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error_code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(#[from] ValidationErrors),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Request body does not match the schema: {field}: {reason}")]
    InvalidBody { field: String, reason: String },
    #[error("Invalid query parameters: {0}")]
    InvalidQuery(String),
    #[error("Invalid id format")]
    InvalidId(String),
    #[error("{collection} {id} not found")]
    NotFound { collection: String, id: String },
    #[error("Database not available")]
    StoreUnavailable,
    #[error("Database error: {0}")]
    Store(DocumentStoreError),
}

impl From<DocumentStoreError> for ApiError {
    fn from(error: DocumentStoreError) -> Self {
        match error {
            DocumentStoreError::InvalidId(id) => ApiError::InvalidId(id),
            other => ApiError::Store(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::invalid_body(".", e.body_text()),
            other => ApiError::MalformedBody(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl ApiError {
    /// Schema mismatch at `path` (serde's `a.b[0].c` form, `.` for the root).
    ///
    /// A missing field is reported at the path the field itself would have.
    pub fn invalid_body(path: &str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let missing = reason
            .strip_prefix("missing field `")
            .and_then(|rest| rest.split('`').next());

        let field = match (path, missing) {
            (".", Some(name)) => name.to_string(),
            (parent, Some(name)) => format!("{parent}.{name}"),
            (path, None) => path.to_string(),
        };

        ApiError::InvalidBody { field, reason }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::InvalidBody { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MalformedBody(_) | ApiError::InvalidQuery(_) | ApiError::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ApiError::Validation(errors) => ErrorBody::new("VALIDATION_ERROR", self.to_string())
                .with_details(serde_json::to_value(errors).unwrap_or_default()),
            ApiError::MalformedBody(_) => ErrorBody::new("MALFORMED_BODY", self.to_string()),
            ApiError::InvalidBody { field, reason } => ErrorBody::new("INVALID_BODY", self.to_string())
                .with_details(json!({ "field": field, "reason": reason })),
            ApiError::InvalidQuery(_) => ErrorBody::new("INVALID_QUERY", self.to_string()),
            ApiError::InvalidId(_) => ErrorBody::new("INVALID_ID", self.to_string()),
            ApiError::NotFound { .. } => ErrorBody::new("NOT_FOUND", self.to_string()),
            ApiError::StoreUnavailable => ErrorBody::new("DATABASE_UNAVAILABLE", self.to_string()),
            // Driver messages stay in the logs.
            ApiError::Store(_) => ErrorBody::new("DATABASE_ERROR", "Failed to access the database"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Store(error) = &self {
            tracing::error!(%error, "store operation failed");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn store_invalid_id_maps_to_bad_request() {
        let error = ApiError::from(DocumentStoreError::InvalidId("nope".into()));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_failures_are_internal() {
        let error = ApiError::from(DocumentStoreError::Backend("connection reset".into()));
        let body = error.body();

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("connection reset"));
    }

    #[test]
    fn missing_fields_are_reported_at_their_own_path() {
        let root = ApiError::invalid_body(".", "missing field `email`");
        let nested = ApiError::invalid_body("exercises[0]", "missing field `name`");
        let typed = ApiError::invalid_body("exercises[0].sets", "invalid type: string \"x\", expected i64");

        assert_eq!(root.body().details, Some(json!({ "field": "email", "reason": "missing field `email`" })));
        assert_eq!(nested.body().details.unwrap()["field"], "exercises[0].name");
        assert_eq!(typed.body().details.unwrap()["field"], "exercises[0].sets");
        assert_eq!(typed.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn validation_errors_carry_field_details() {
        let mut errors = ValidationErrors::new();
        errors.add("bodyfat_pct", ValidationError::new("range"));

        let error = ApiError::from(errors);
        let body = error.body();

        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error_code, "VALIDATION_ERROR");
        assert!(body.details.unwrap().get("bodyfat_pct").is_some());
    }
}
