//! Legal-matter catalog node model.
//!
//! # Responsibility
//! - Define the nested node shape returned by the catalog service
//!   ("Materia → Categoría → Subcategoría → Ámbito").
//! - Keep JSON field naming compatible with existing catalog payloads.
//!
//! # Invariants
//! - `id` is expected to be unique across one tree. This is a data-quality
//!   assumption; nothing here enforces it.
//! - `children` order is display order and is never re-sorted.
//! - A node without children is a leaf regardless of its declared `kind`.

use serde::{Deserialize, Serialize};

/// Catalog node identifier as issued by the catalog service.
pub type CategoryId = i64;

/// Declared hierarchy level of a catalog node.
///
/// Informational only: tree queries never branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Top-level legal grouping ("Materia"), e.g. Civil or Penal.
    Root,
    /// Second level ("Categoría").
    Category,
    /// Third level ("Subcategoría").
    Subcategory,
    /// Leaf legal matter attached to a case ("Ámbito").
    Leaf,
}

/// One node of the legal-matter catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: CategoryId,
    /// Display label. Older payloads name this field `nombre`.
    #[serde(alias = "nombre", alias = "name")]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,
    #[serde(default)]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Creates a node without declared kind or children.
    pub fn new(id: CategoryId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            kind: None,
            children: Vec::new(),
        }
    }

    /// Sets the declared kind.
    pub fn with_kind(mut self, kind: CategoryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Appends children in the given order.
    pub fn with_children(mut self, children: impl IntoIterator<Item = CategoryNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Counts this node plus all descendants.
    pub fn subtree_len(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(CategoryNode::subtree_len)
            .sum::<usize>()
    }
}
