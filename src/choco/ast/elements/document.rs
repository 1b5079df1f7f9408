//! Document element
//!
//! A document is the ordered list of instances found in one solver dump.
//! Instance ids follow source order and need not be contiguous.

use super::instance::Instance;
use serde::{Deserialize, Serialize};

/// All instances of a dump, in the order they appear in the text
///
/// Serializes as a bare JSON array of instances.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub instances: Vec<Instance>,
}

impl Document {
    pub fn new(instances: Vec<Instance>) -> Self {
        Self { instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Instance> {
        self.instances.iter()
    }

    /// First instance carrying the given id
    pub fn instance(&self, id: u64) -> Option<&Instance> {
        self.instances.iter().find(|instance| instance.id == id)
    }

    /// Total number of elements across all instances, nested ones included
    pub fn element_count(&self) -> usize {
        self.instances.iter().map(Instance::element_count).sum()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Instance;
    type IntoIter = std::slice::Iter<'a, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.instances.iter()
    }
}
