//! Typed error handling for the order service
//!
//! Every failure in the crate resolves to an [`OrderServiceError`], which
//! keeps the error kind intact so callers can branch on it. Each area has
//! its own error enum:
//!
//! - [`OrderError`]: missing orders and failed placements
//! - [`CatalogError`]: product lookup failures, carried by a failed placement
//! - [`ValidationError`]: rejected input
//! - [`ReportError`]: unsupported formats and renderer failures
//! - [`DeliveryError`]: filesystem and email transport failures
//! - [`StorageError`]: order store failures
//!
//! The HTTP surface is coarse: a missing order is a 404 and
//! everything else is a 400. The `code` field of the failure envelope is
//! what distinguishes kinds for API clients.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.get_by_id(42).await {
//!     Ok(order) => println!("Found: {:?}", order),
//!     Err(OrderServiceError::Order(OrderError::NotFound { id })) => {
//!         println!("Order {} not found", id);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::server::response::ApiResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::borrow::Cow;
use thiserror::Error;

/// The main error type for the order service
#[derive(Debug, Error)]
pub enum OrderServiceError {
    /// Order lookups and placement
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Rejected input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Report generation
    #[error(transparent)]
    Report(#[from] ReportError),

    /// Report delivery (filesystem, email)
    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    /// Order store
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl OrderServiceError {
    /// Get the HTTP status code for this error
    ///
    /// Only a missing order maps to 404; every other kind is a 400.
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderServiceError::Order(OrderError::NotFound { .. }) => StatusCode::NOT_FOUND,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderServiceError::Order(e) => e.error_code(),
            OrderServiceError::Validation(_) => "VALIDATION_ERROR",
            OrderServiceError::Report(e) => e.error_code(),
            OrderServiceError::Delivery(e) => e.error_code(),
            OrderServiceError::Storage(_) => "STORAGE_ERROR",
            OrderServiceError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error means the requested order does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, OrderServiceError::Order(OrderError::NotFound { .. }))
    }

    /// Convert to a failure envelope
    pub fn to_response(&self) -> ApiResponse<()> {
        ApiResponse::failure(self.error_code(), self.to_string(), self.details())
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            OrderServiceError::Order(OrderError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            OrderServiceError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            OrderServiceError::Report(ReportError::UnsupportedFormat { format }) => {
                Some(serde_json::json!({ "format": format }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for OrderServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Order Errors
// =============================================================================

/// Errors related to order operations
#[derive(Debug, Error)]
pub enum OrderError {
    /// Order was not found
    #[error("Order with id '{id}' not found")]
    NotFound { id: i32 },

    /// Placement failed; the cause keeps its own kind
    #[error("Failed to place order: {source}")]
    PlacementFailed {
        product_id: i32,
        source: PlacementFailure,
    },
}

impl OrderError {
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::NotFound { .. } => "ORDER_NOT_FOUND",
            OrderError::PlacementFailed { source, .. } => source.error_code(),
        }
    }
}

/// Why an order could not be placed
#[derive(Debug, Error)]
pub enum PlacementFailure {
    /// The catalog answered but has no such product
    #[error("Product with ID {product_id} not found!")]
    ProductNotFound { product_id: i32 },

    /// The catalog could not be reached in time
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The order could not be persisted
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PlacementFailure {
    pub fn error_code(&self) -> &'static str {
        match self {
            PlacementFailure::ProductNotFound { .. } => "PRODUCT_NOT_FOUND",
            PlacementFailure::Catalog(e) => e.error_code(),
            PlacementFailure::Storage(_) => "STORAGE_ERROR",
        }
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors raised by the product lookup client
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The lookup did not finish within the configured timeout
    #[error("Product lookup timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Transport error, unexpected status, or unreadable payload
    #[error("Product catalog unavailable: {message}")]
    Unavailable { message: String },
}

impl CatalogError {
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Timeout { .. } => "UPSTREAM_TIMEOUT",
            CatalogError::Unavailable { .. } => "UPSTREAM_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Single field validation error
    #[error("Validation error for field '{field}': {message}")]
    FieldError { field: String, message: String },

    /// Multiple field validation errors
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body could not be parsed
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = Vec::new();
        collect_field_errors("", &errors, &mut fields);
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

fn collect_field_errors(
    prefix: &str,
    errors: &validator::ValidationErrors,
    out: &mut Vec<FieldValidationError>,
) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(list) => {
                out.extend(list.iter().map(|e| FieldValidationError {
                    field: path.clone(),
                    message: e
                        .message
                        .clone()
                        .unwrap_or_else(|| Cow::Owned(e.code.to_string()))
                        .into_owned(),
                }));
            }
            ValidationErrorsKind::Struct(nested) => collect_field_errors(&path, nested, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_field_errors(&format!("{}[{}]", path, index), nested, out);
                }
            }
        }
    }
}

// =============================================================================
// Report Errors
// =============================================================================

/// Errors related to report generation
#[derive(Debug, Error)]
pub enum ReportError {
    /// Format is not one of EXCEL, PDF, WORD
    #[error("Unsupported format: {format}")]
    UnsupportedFormat { format: String },

    /// The renderer library failed
    #[error("Failed to render {format} report: {message}")]
    Rendering {
        format: &'static str,
        message: String,
    },
}

impl ReportError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ReportError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            ReportError::Rendering { .. } => "REPORT_RENDERING_FAILED",
        }
    }
}

// =============================================================================
// Delivery Errors
// =============================================================================

/// Errors related to delivering a rendered report
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// Writing the report to disk failed
    #[error("Failed to save report to '{path}': {message}")]
    Io { path: String, message: String },

    /// Address could not be parsed by the mail transport
    #[error("Invalid email address '{address}': {message}")]
    InvalidAddress { address: String, message: String },

    /// Building or sending the email failed
    #[error("Failed to email report: {message}")]
    Email { message: String },

    /// The HTML body template failed to render
    #[error("Failed to render email template: {message}")]
    Template { message: String },
}

impl DeliveryError {
    pub fn error_code(&self) -> &'static str {
        match self {
            DeliveryError::Io { .. } => "IO_ERROR",
            DeliveryError::InvalidAddress { .. } => "INVALID_EMAIL_ADDRESS",
            DeliveryError::Email { .. } => "EMAIL_DELIVERY_FAILED",
            DeliveryError::Template { .. } => "EMAIL_TEMPLATE_FAILED",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the order store
#[derive(Debug, Error)]
pub enum StorageError {
    /// Store could not serve the request
    #[error("Order store unavailable: {message}")]
    Unavailable { message: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for OrderServiceError {
    fn from(err: serde_json::Error) -> Self {
        OrderServiceError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for OrderServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        OrderServiceError::Validation(err.into())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for order service operations
pub type OrderServiceResult<T> = Result<T, OrderServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_not_found_display() {
        let err = OrderError::NotFound { id: 7 };
        assert!(err.to_string().contains("7"));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_only_not_found_is_404() {
        let err: OrderServiceError = OrderError::NotFound { id: 1 }.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.is_not_found());

        let err: OrderServiceError = ReportError::UnsupportedFormat {
            format: "CSV".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err: OrderServiceError = StorageError::Unavailable {
            message: "down".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_placement_failure_keeps_cause_code() {
        let err = OrderError::PlacementFailed {
            product_id: 404,
            source: PlacementFailure::ProductNotFound { product_id: 404 },
        };
        assert_eq!(err.error_code(), "PRODUCT_NOT_FOUND");
        assert_eq!(
            err.to_string(),
            "Failed to place order: Product with ID 404 not found!"
        );

        let err = OrderError::PlacementFailed {
            product_id: 1,
            source: CatalogError::Timeout { timeout_ms: 250 }.into(),
        };
        assert_eq!(err.error_code(), "UPSTREAM_TIMEOUT");
        assert!(err.to_string().starts_with("Failed to place order: "));
    }

    #[test]
    fn test_validation_error_multiple_fields() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError {
                field: "quantity".to_string(),
                message: "must be at least 1".to_string(),
            },
            FieldValidationError {
                field: "emailTo".to_string(),
                message: "invalid email".to_string(),
            },
        ]);
        let display = err.to_string();
        assert!(display.contains("quantity: must be at least 1"));
        assert!(display.contains("emailTo"));
    }

    #[test]
    fn test_error_response_serialization() {
        let err = OrderServiceError::Order(OrderError::NotFound { id: 3 });
        let response = err.to_response();
        assert!(!response.success);
        assert_eq!(response.code.as_deref(), Some("ORDER_NOT_FOUND"));
        assert!(response.details.is_some());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: OrderServiceError = json_err.into();
        assert!(matches!(
            err,
            OrderServiceError::Validation(ValidationError::InvalidJson { .. })
        ));
    }
}
