use bookstore_http::error::AppError;
use serde_json::json;
use thiserror::Error;

/// Failures of catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Malformed identifier or numeric field
    #[error("invalid {field}: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// Required fields missing or empty
    #[error("missing required fields: {}", .fields.join(", "))]
    Validation { fields: Vec<&'static str> },

    #[error("book {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field,
            reason: reason.into(),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidArgument { field, reason } => AppError::BadRequest {
                message: format!("invalid {field}: {reason}"),
                code: "invalid_argument".to_string(),
            },
            CatalogError::Validation { fields } => {
                let details = fields
                    .iter()
                    .map(|field| json!({ "field": field, "error": "required" }))
                    .collect();
                AppError::validation(details, "all required fields must be provided")
            }
            err @ CatalogError::NotFound(_) => AppError::not_found(err.to_string()),
            CatalogError::Internal(err) => AppError::Internal(err),
        }
    }
}
