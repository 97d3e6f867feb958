//! Ordered log of committed shapes.

use crate::shapes::Shape;
use serde::{Deserialize, Serialize};

/// Committed shapes in insertion order, which is also z-order and draw order.
///
/// Append-only apart from [`History::pop`] (undo) and [`History::clear`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    shapes: Vec<Shape>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Remove and return the most recent shape.
    pub fn pop(&mut self) -> Option<Shape> {
        self.shapes.pop()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn last(&self) -> Option<&Shape> {
        self.shapes.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl From<Vec<Shape>> for History {
    fn from(shapes: Vec<Shape>) -> Self {
        Self { shapes }
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Shape;
    type IntoIter = std::slice::Iter<'a, Shape>;

    fn into_iter(self) -> Self::IntoIter {
        self.shapes.iter()
    }
}
