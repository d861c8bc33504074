//! Catalog source contracts and JSON implementation.
//!
//! # Responsibility
//! - Model the one-shot fetch of the full nested catalog.
//! - Keep payload decoding details out of catalog queries.
//!
//! # Invariants
//! - A fetch returns the whole tree; there is no pagination.
//! - Payload shape is a JSON array of nodes with nested `children`.

use crate::model::category::CategoryNode;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result type used by catalog source operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors from fetching or decoding the catalog.
#[derive(Debug)]
pub enum CatalogError {
    /// Catalog payload could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Catalog payload is not a valid node array.
    InvalidPayload(serde_json::Error),
    /// Source-specific fetch failure.
    Unavailable(String),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read catalog `{}`: {source}", path.display())
            }
            Self::InvalidPayload(err) => write!(f, "invalid catalog payload: {err}"),
            Self::Unavailable(message) => write!(f, "catalog unavailable: {message}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidPayload(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidPayload(value)
    }
}

/// Provider of the full catalog tree.
pub trait CatalogSource {
    /// Fetches all root nodes with nested descendants.
    fn fetch_tree(&self) -> CatalogResult<Vec<CategoryNode>>;
}

impl<S: CatalogSource + ?Sized> CatalogSource for &S {
    fn fetch_tree(&self) -> CatalogResult<Vec<CategoryNode>> {
        (**self).fetch_tree()
    }
}

/// Parses one catalog payload string.
pub fn parse_catalog_json(payload: &str) -> CatalogResult<Vec<CategoryNode>> {
    serde_json::from_str(payload).map_err(Into::into)
}

/// Catalog source backed by a JSON file export of the catalog service.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    path: PathBuf,
}

impl JsonCatalogSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalogSource {
    fn fetch_tree(&self) -> CatalogResult<Vec<CategoryNode>> {
        let started_at = Instant::now();
        let result = std::fs::read_to_string(&self.path)
            .map_err(|source| CatalogError::Io {
                path: self.path.clone(),
                source,
            })
            .and_then(|payload| parse_catalog_json(&payload));

        match &result {
            Ok(roots) => info!(
                "event=catalog_fetch module=catalog status=ok source=json_file roots={} duration_ms={}",
                roots.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=catalog_fetch module=catalog status=error source=json_file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}

/// Catalog source over an already decoded tree.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalogSource {
    roots: Vec<CategoryNode>,
}

impl StaticCatalogSource {
    pub fn new(roots: Vec<CategoryNode>) -> Self {
        Self { roots }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn fetch_tree(&self) -> CatalogResult<Vec<CategoryNode>> {
        Ok(self.roots.clone())
    }
}
