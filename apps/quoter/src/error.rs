//! # API Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Quoter                             │
//! │                                                                         │
//! │  Shell line ("order Sara | Acme")                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Sheet Error? ──── PriceListError::Io(..) ─────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Domain Error? ─── CoreError::EmptyCart ───────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  text mode:  "error [EMPTY_CART]: Cart is empty"                        │
//! │  --json:     { "code": "EMPTY_CART", "message": "Cart is empty" }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use pacs_core::CoreError;
use pacs_pricelist::PriceListError;
use serde::Serialize;

use crate::state::ConfigError;

/// API error returned from commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown size, model, option or command
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Price sheet could not be read or decoded
    CatalogError,

    /// Price sheet still loading
    CatalogLoading,

    /// Order attempted with an empty cart
    EmptyCart,

    /// quoter.toml or environment is unusable
    ConfigError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    /// The serialized form, for text output.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::CatalogLoading => "CATALOG_LOADING",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// No price sheet path was given.
    pub fn catalog_unconfigured() -> Self {
        ApiError::new(
            ErrorCode::ConfigError,
            "No price list configured (use --catalog or PACS_CATALOG_PATH)",
        )
    }

    /// The catalog has not finished loading.
    pub fn catalog_loading() -> Self {
        ApiError::new(
            ErrorCode::CatalogLoading,
            "Price list is still loading, try again in a moment",
        )
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::new(ErrorCode::EmptyCart, err.to_string()),
            CoreError::UnknownSize(size) => ApiError::not_found("Size", &size),
            CoreError::UnknownModel(model) => ApiError::not_found("PLC model", &model),
            CoreError::UnknownOption { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

/// Converts price sheet errors to API errors.
impl From<PriceListError> for ApiError {
    fn from(err: PriceListError) -> Self {
        match err {
            PriceListError::Io { ref path, ref source } => {
                tracing::error!(path = %path.display(), error = %source, "price sheet read failed");
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
            PriceListError::Parse(ref e) => {
                tracing::error!(error = %e, "price sheet parse failed");
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
            PriceListError::InvalidRow { .. } | PriceListError::UnboundRole { .. } => {
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
        }
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        if let ConfigError::Io { .. } = err {
            tracing::error!(error = %err, "config file read failed");
        }
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for ApiError {}
