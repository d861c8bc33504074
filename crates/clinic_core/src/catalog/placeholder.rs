//! Placeholder label detection for breadcrumb rendering.
//!
//! Seed catalogs pad shallow legal matters with filler levels labelled
//! "Sin Categoría" / "Sin Subcategoría" so every Ámbito sits at the same
//! depth. Those levels take part in traversal but are hidden from paths.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

static SPANISH_PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*sin\s+(sub)?categor[ií]a\s*$").expect("valid placeholder regex")
});

/// Predicate deciding which catalog labels are placeholders.
#[derive(Clone, Default)]
pub enum PlaceholderRule {
    /// Case-insensitive "Sin Categoría" / "Sin Subcategoría" (accent optional).
    #[default]
    SpanishDefaults,
    /// No label is a placeholder.
    None,
    /// Caller-supplied predicate.
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl PlaceholderRule {
    pub fn spanish_defaults() -> Self {
        Self::SpanishDefaults
    }

    pub fn none() -> Self {
        Self::None
    }

    pub fn custom(predicate: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(predicate))
    }

    /// Returns whether `label` should be omitted from breadcrumb paths.
    pub fn is_placeholder(&self, label: &str) -> bool {
        match self {
            Self::SpanishDefaults => SPANISH_PLACEHOLDER_RE.is_match(label),
            Self::None => false,
            Self::Custom(predicate) => predicate(label),
        }
    }
}

impl Debug for PlaceholderRule {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SpanishDefaults => f.write_str("PlaceholderRule::SpanishDefaults"),
            Self::None => f.write_str("PlaceholderRule::None"),
            Self::Custom(_) => f.write_str("PlaceholderRule::Custom(..)"),
        }
    }
}
