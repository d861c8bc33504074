//! In-memory legal-matter catalog lookups.
//!
//! # Responsibility
//! - Answer identity and hierarchy questions about one fetched catalog.
//! - Reconstruct display breadcrumbs such as `Civil > Familia > Divorcio`.
//!
//! # Invariants
//! - Roots are kept exactly as supplied; no re-sort, dedup, or validation.
//! - Every search is depth-first pre-order; with duplicate ids the first
//!   match wins across all queries, `flatten` included.
//! - Lookups never fail: a missing id yields `None`.

use crate::catalog::placeholder::PlaceholderRule;
use crate::model::category::{CategoryId, CategoryNode};
use log::debug;
use std::collections::BTreeMap;

/// Fallback label shown when an id is absent from the catalog.
pub const UNKNOWN_LABEL: &str = "Desconocido";
/// Separator used for single-line breadcrumb labels.
pub const BREADCRUMB_SEPARATOR: &str = " > ";

/// Immutable catalog tree built from one catalog fetch.
#[derive(Debug, Clone, Default)]
pub struct CatalogTree {
    roots: Vec<CategoryNode>,
    placeholder: PlaceholderRule,
}

impl CatalogTree {
    /// Builds a tree with the default placeholder rule.
    pub fn build(roots: Vec<CategoryNode>) -> Self {
        Self::with_placeholder(roots, PlaceholderRule::default())
    }

    /// Builds a tree with an explicit placeholder rule.
    pub fn with_placeholder(roots: Vec<CategoryNode>, placeholder: PlaceholderRule) -> Self {
        let tree = Self { roots, placeholder };
        debug!(
            "event=catalog_build module=catalog status=ok roots={} nodes={}",
            tree.roots.len(),
            tree.len()
        );
        tree
    }

    /// Root nodes in display order.
    pub fn roots(&self) -> &[CategoryNode] {
        &self.roots
    }

    /// Total node count, roots and descendants.
    pub fn len(&self) -> usize {
        self.roots.iter().map(CategoryNode::subtree_len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn placeholder_rule(&self) -> &PlaceholderRule {
        &self.placeholder
    }

    /// Finds the first node with `id` in pre-order.
    pub fn find_by_id(&self, id: CategoryId) -> Option<&CategoryNode> {
        find_in(&self.roots, id)
    }

    /// Returns the label of the root whose subtree contains `id`.
    pub fn resolve_root_label(&self, id: CategoryId) -> Option<&str> {
        self.roots
            .iter()
            .find(|root| root.id == id || find_in(&root.children, id).is_some())
            .map(|root| root.label.as_str())
    }

    /// Same as [`Self::resolve_root_label`], falling back to [`UNKNOWN_LABEL`].
    pub fn root_label_or_unknown(&self, id: CategoryId) -> &str {
        self.resolve_root_label(id).unwrap_or(UNKNOWN_LABEL)
    }

    /// Flat id → label mapping for every node in the tree.
    pub fn flatten(&self) -> BTreeMap<CategoryId, String> {
        let mut labels = BTreeMap::new();
        flatten_into(&self.roots, &mut labels);
        labels
    }

    /// Labels from root to the node with `id`, inclusive, minus placeholders.
    ///
    /// Returns `None` when `id` is absent. `Some(vec![])` means the node was
    /// found but every segment on its path is a placeholder.
    pub fn breadcrumb_path(&self, id: CategoryId) -> Option<Vec<String>> {
        let mut path = Vec::new();
        if !breadcrumb_in(&self.roots, id, &mut path, &self.placeholder) {
            return None;
        }
        Some(path.into_iter().map(str::to_owned).collect())
    }

    /// Breadcrumb joined with `separator`.
    pub fn breadcrumb_label(&self, id: CategoryId, separator: &str) -> Option<String> {
        self.breadcrumb_path(id).map(|path| path.join(separator))
    }

    /// Children of `parent`, or the roots when `parent` is `None`.
    ///
    /// Feeds cascading selectors (Materia, then Categoría, and so on).
    pub fn children_of(&self, parent: Option<CategoryId>) -> Option<&[CategoryNode]> {
        match parent {
            None => Some(self.roots.as_slice()),
            Some(id) => self.find_by_id(id).map(|node| node.children.as_slice()),
        }
    }
}

fn find_in(nodes: &[CategoryNode], id: CategoryId) -> Option<&CategoryNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(&node.children, id) {
            return Some(found);
        }
    }
    None
}

fn flatten_into(nodes: &[CategoryNode], labels: &mut BTreeMap<CategoryId, String>) {
    for node in nodes {
        labels
            .entry(node.id)
            .or_insert_with(|| node.label.clone());
        flatten_into(&node.children, labels);
    }
}

fn breadcrumb_in<'a>(
    nodes: &'a [CategoryNode],
    id: CategoryId,
    path: &mut Vec<&'a str>,
    placeholder: &PlaceholderRule,
) -> bool {
    for node in nodes {
        let pushed = !placeholder.is_placeholder(&node.label);
        if pushed {
            path.push(node.label.as_str());
        }
        // Match before descending so a non-leaf hit keeps its own depth.
        if node.id == id || breadcrumb_in(&node.children, id, path, placeholder) {
            return true;
        }
        if pushed {
            path.pop();
        }
    }
    false
}
