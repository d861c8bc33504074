//! Legal-matter catalog use-case service.
//!
//! # Responsibility
//! - Fetch the catalog once per session and keep the built tree.
//! - Provide display labels for legal-matter ids stored on cases.
//!
//! # Invariants
//! - The tree is rebuilt from scratch on refresh; no incremental update.
//! - Label helpers never fail on unknown ids; they return `UNKNOWN_LABEL`.

use crate::catalog::placeholder::PlaceholderRule;
use crate::catalog::tree::{CatalogTree, BREADCRUMB_SEPARATOR, UNKNOWN_LABEL};
use crate::model::category::CategoryId;
use crate::repo::catalog_source::{CatalogResult, CatalogSource};
use log::info;

/// Catalog service facade.
pub struct CatalogService<S: CatalogSource> {
    source: S,
    placeholder: PlaceholderRule,
    tree: Option<CatalogTree>,
}

impl<S: CatalogSource> CatalogService<S> {
    /// Creates service from a catalog source; nothing is fetched yet.
    pub fn new(source: S) -> Self {
        Self::with_placeholder(source, PlaceholderRule::default())
    }

    pub fn with_placeholder(source: S, placeholder: PlaceholderRule) -> Self {
        Self {
            source,
            placeholder,
            tree: None,
        }
    }

    /// Returns whether a tree has been fetched.
    pub fn is_loaded(&self) -> bool {
        self.tree.is_some()
    }

    /// Returns the cached tree, fetching it on first use.
    pub fn tree(&mut self) -> CatalogResult<&CatalogTree> {
        let tree = match self.tree.take() {
            Some(tree) => tree,
            None => self.build_tree()?,
        };
        Ok(&*self.tree.insert(tree))
    }

    /// Refetches and rebuilds the tree, replacing the cached one.
    ///
    /// On failure the previous tree stays cached.
    pub fn refresh(&mut self) -> CatalogResult<&CatalogTree> {
        let tree = self.build_tree()?;
        Ok(&*self.tree.insert(tree))
    }

    fn build_tree(&self) -> CatalogResult<CatalogTree> {
        let roots = self.source.fetch_tree()?;
        let tree = CatalogTree::with_placeholder(roots, self.placeholder.clone());
        info!(
            "event=catalog_refresh module=catalog status=ok nodes={}",
            tree.len()
        );
        Ok(tree)
    }

    /// Breadcrumb label such as `Civil > Familia > Divorcio`.
    pub fn legal_matter_label(&mut self, id: CategoryId) -> CatalogResult<String> {
        Ok(self
            .tree()?
            .breadcrumb_label(id, BREADCRUMB_SEPARATOR)
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string()))
    }

    /// Root Materia label for a legal-matter id.
    pub fn materia_label(&mut self, id: CategoryId) -> CatalogResult<String> {
        Ok(self.tree()?.root_label_or_unknown(id).to_string())
    }
}
