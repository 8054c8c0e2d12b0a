//! Tutorial catalog
//!
//! The catalog is loaded wholesale at startup, either from the built-in
//! content or from a JSON file with the same schema, and is immutable
//! afterwards. [`Catalog::load_validated`] refuses catalogs whose steps do
//! not replay consistently.

mod builtin;
pub mod pieces;
mod validate;

pub use pieces::{find_piece, PieceInfo, PieceValue, PIECES};
pub use validate::{CatalogIssue, CatalogReport, IssueKind};

use coach_common::Tutorial;
use std::path::Path;
use tracing::info;

use crate::error::{Error, Result};

/// Ordered, immutable list of tutorials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    tutorials: Vec<Tutorial>,
}

impl Catalog {
    pub fn new(tutorials: Vec<Tutorial>) -> Self {
        Self { tutorials }
    }

    /// Hand-authored tutorials shipped with the binary
    pub fn builtin() -> Self {
        Self::new(builtin::tutorials())
    }

    /// Decode a JSON array of tutorials
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tutorials: Vec<Tutorial> = serde_json::from_str(json)?;
        Ok(Self::new(tutorials))
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            "Loaded {} tutorials from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    /// Load from `path` (or the built-in content) and fail fast on any
    /// inconsistency
    pub fn load_validated(path: Option<&Path>) -> Result<Self> {
        let catalog = match path {
            Some(path) => Self::from_json_file(path)?,
            None => Self::builtin(),
        };

        let report = catalog.validate();
        if !report.is_clean() {
            return Err(Error::InvalidCatalog(report));
        }
        Ok(catalog)
    }

    /// Replay every tutorial and collect all inconsistencies
    pub fn validate(&self) -> CatalogReport {
        validate::validate(&self.tutorials)
    }

    pub fn get(&self, id: &str) -> Option<&Tutorial> {
        self.tutorials.iter().find(|t| t.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.tutorials.iter().position(|t| t.id == id)
    }

    pub fn first(&self) -> Option<&Tutorial> {
        self.tutorials.first()
    }

    pub fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tutorial> {
        self.tutorials.iter()
    }

    pub fn len(&self) -> usize {
        self.tutorials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tutorials.is_empty()
    }
}
