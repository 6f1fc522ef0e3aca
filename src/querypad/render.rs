//! The transform seam between the playground loop and the formatter.
//!
//! The controller never calls [`query::format`] directly; it goes through a
//! [`Transform`] so tests (and future engines) can substitute their own
//! formatter without touching the loop.

use crate::error::Result;
use crate::query;

/// The opaque formatting capability: text in, canonical text out.
pub trait Transform {
    fn format(&self, source: &str) -> Result<String>;
}

/// What the playground shows for the current source: either its formatted
/// form or the failure that prevented one. Always recomputed whole from the
/// current source, never patched in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    Formatted(String),
    Error(String),
}

/// Wraps a [`Transform`] so that callers always get a [`Rendered`] back, no
/// matter what the transform does.
pub struct Renderer<T: Transform> {
    transform: T,
}

impl<T: Transform> Renderer<T> {
    pub fn new(transform: T) -> Self {
        Self { transform }
    }

    /// Empty input short-circuits: the transform is not obligated to handle
    /// a degenerate document, and an empty source formats to an empty result.
    pub fn render(&self, source: &str) -> Rendered {
        if source.is_empty() {
            return Rendered::Formatted(String::new());
        }
        match self.transform.format(source) {
            Ok(text) => Rendered::Formatted(text),
            Err(e) => Rendered::Error(e.to_string()),
        }
    }
}

/// The production transform: the built-in query formatter at a fixed width.
pub struct QueryFormatter {
    width: usize,
}

impl QueryFormatter {
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl Default for QueryFormatter {
    fn default() -> Self {
        Self::new(query::DEFAULT_WIDTH)
    }
}

impl Transform for QueryFormatter {
    fn format(&self, source: &str) -> Result<String> {
        Ok(query::format(source, self.width)?)
    }
}
