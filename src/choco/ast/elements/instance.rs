//! Instance element

use super::element::Element;
use serde::{Deserialize, Serialize};

/// One enumerated solution, framed by matching begin/end markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    pub id: u64,
    pub elements: Vec<Element>,
}

impl Instance {
    pub fn new(id: u64, elements: Vec<Element>) -> Self {
        Self { id, elements }
    }

    /// Number of elements in this instance, nested ones included
    pub fn element_count(&self) -> usize {
        self.elements.iter().map(Element::subtree_size).sum()
    }
}
