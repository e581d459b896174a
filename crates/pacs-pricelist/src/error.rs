//! # Price List Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PriceListError (this module) ← adds the file path                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in quoter) ← serialized for display                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Price sheet loading errors.
#[derive(Debug, Error)]
pub enum PriceListError {
    /// The sheet file could not be read.
    ///
    /// ## When This Occurs
    /// - Path does not exist
    /// - File permissions issue
    #[error("Failed to read price sheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sheet is not a JSON array of rows.
    #[error("Failed to parse price sheet: {0}")]
    Parse(#[from] serde_json::Error),

    /// A row is structurally valid JSON but unusable.
    #[error("Invalid row {index}: {reason}")]
    InvalidRow { index: usize, reason: String },

    /// A required extra role matched no row.
    #[error("Extra role {role} is not bound to any row")]
    UnboundRole { role: String },
}

impl PriceListError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PriceListError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors without a known path (e.g. from `?` on a bare read).
impl From<std::io::Error> for PriceListError {
    fn from(source: std::io::Error) -> Self {
        PriceListError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

/// Result type for price list operations.
pub type PriceListResult<T> = Result<T, PriceListError>;
