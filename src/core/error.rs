//! Typed error handling for the catalog service
//!
//! Every fault that can leave a handler is a [`CatalogError`]. The variants
//! fall into three kinds, which decide how the fault is rendered:
//!
//! - **Validation** ([`ValidationError`], [`RequestError`]): malformed input,
//!   rejected before any mutation happens
//! - **Not found** ([`EntityError`]): a lookup by id or slug matched nothing,
//!   or the requested page lies past the end of a non-empty result
//! - **Unexpected** ([`StorageError`], [`UploadError`], [`ConfigError`],
//!   `Internal`): passed through to the HTTP boundary as a 500
//!
//! A listing whose filters match nothing is *not* an error: it is a normal
//! empty page.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! async fn brand_by_slug(service: &dyn DataService<Brand>, slug: &str) -> CatalogResult<Brand> {
//!     service
//!         .find_one(&Lookup::slug(slug))
//!         .await?
//!         .ok_or_else(|| EntityError::not_found("brand", slug).into())
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the catalog service
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity lookups and pagination bounds
    #[error(transparent)]
    Entity(#[from] EntityError),

    /// Malformed query parameters or form fields
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Malformed HTTP requests (unreadable bodies, wrong media types)
    #[error(transparent)]
    Request(#[from] RequestError),

    /// Storage backend failures
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Failures writing uploaded files to disk
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Anything else that should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Entity(e) => e.status_code(),
            CatalogError::Validation(e) => e.status_code(),
            CatalogError::Request(e) => e.status_code(),
            CatalogError::Storage(_)
            | CatalogError::Upload(_)
            | CatalogError::Config(_)
            | CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::Entity(e) => e.error_code(),
            CatalogError::Validation(_) => "VALIDATION_ERROR",
            CatalogError::Request(e) => e.error_code(),
            CatalogError::Storage(_) => "STORAGE_ERROR",
            CatalogError::Upload(_) => "UPLOAD_ERROR",
            CatalogError::Config(_) => "CONFIG_ERROR",
            CatalogError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// True for faults the caller caused (4xx)
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            CatalogError::Entity(EntityError::NotFound { entity_type, key }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "key": key
                }))
            }
            CatalogError::Entity(EntityError::PageOutOfRange { page, total }) => {
                Some(serde_json::json!({
                    "page": page,
                    "total": total
                }))
            }
            CatalogError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            CatalogError::Validation(ValidationError::FieldError { field, .. }) => {
                Some(serde_json::json!({ "field": field }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), error = %self, "request rejected");
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug, Error)]
pub enum EntityError {
    /// Lookup by id or slug matched nothing
    #[error("The {entity_type} '{key}' was not found")]
    NotFound { entity_type: String, key: String },

    /// The requested page is past the end of a non-empty result
    #[error("Page {page} is out of range ({total} matching items)")]
    PageOutOfRange { page: usize, total: usize },
}

impl EntityError {
    pub fn not_found(entity_type: impl Into<String>, key: impl ToString) -> Self {
        EntityError::NotFound {
            entity_type: entity_type.into(),
            key: key.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::PageOutOfRange { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::PageOutOfRange { .. } => "PAGE_OUT_OF_RANGE",
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
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
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

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request body could not be read
    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    /// An uploaded part has a media type the endpoint does not accept
    #[error("Unsupported media type '{content_type}' for field '{field}'")]
    UnsupportedMediaType { field: String, content_type: String },
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            RequestError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidBody { .. } => "INVALID_BODY",
            RequestError::UnsupportedMediaType { .. } => "UNSUPPORTED_MEDIA_TYPE",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Stored data could not be mapped to a domain type
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },
}

// =============================================================================
// Upload Errors
// =============================================================================

/// Errors raised while persisting an uploaded file
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Failed to write upload '{path}': {message}")]
    Io { path: String, message: String },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration
    #[error("Failed to parse config{}: {message}", .file.as_ref().map(|f| format!(" file '{f}'")).unwrap_or_default())]
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    #[error("Invalid value '{value}' for field '{field}': {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<validator::ValidationErrors> for CatalogError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CatalogError::Validation(crate::core::validation::field_errors(&errors))
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        }
    }
}

/// Services report failures through `anyhow`; typed errors raised inside a
/// backend are recovered, everything else becomes `Internal`.
impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<CatalogError>() {
            Ok(catalog) => return catalog,
            Err(err) => err,
        };
        match err.downcast::<StorageError>() {
            Ok(storage) => CatalogError::Storage(storage),
            Err(err) => CatalogError::Internal(format!("{err:#}")),
        }
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;
