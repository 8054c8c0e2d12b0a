//! Error types for coach-tutor
//!
//! Defines module-specific error types using thiserror for clear error propagation.

use thiserror::Error;

use crate::catalog::CatalogReport;

/// Main error type for coach-tutor
#[derive(Error, Debug)]
pub enum Error {
    /// FEN string could not be parsed or describes an impossible position
    #[error("Invalid FEN '{fen}': {reason}")]
    InvalidFen { fen: String, reason: String },

    /// Move text could not be parsed or is not legal in the current position
    #[error("Illegal move '{san}' in position {fen}: {reason}")]
    IllegalMove {
        san: String,
        fen: String,
        reason: String,
    },

    /// Catalog failed load-time validation
    #[error("Invalid tutorial catalog: {0}")]
    InvalidCatalog(CatalogReport),

    /// Catalog has no tutorial to start with
    #[error("Tutorial catalog is empty")]
    EmptyCatalog,

    /// Shared configuration or data model error
    #[error(transparent)]
    Common(#[from] coach_common::Error),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file decoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type using coach-tutor Error
pub type Result<T> = std::result::Result<T, Error>;
