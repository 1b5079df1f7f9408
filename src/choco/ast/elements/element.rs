//! Clafer element
//!
//! One named line of the dump plus the indented block below it:
//!
//! ```text
//! Bar$3 : Base -> int = 5
//!   Child -> string = "hi"
//! ```
//!
//! `$3` is the index, `: Base` the supertype and `-> int = 5` the typed
//! value. Each suffix is optional and independent of the others, except that
//! a type always comes with a value.

use super::value::{Value, ValueType};
use serde::{Deserialize, Serialize};

/// A clafer node
///
/// Field order is part of the JSON contract: `name`, `index`, `supertype`,
/// `value_type`, `value`, `children`. Absent optionals serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    pub index: Option<u64>,
    pub supertype: Option<String>,
    pub value_type: Option<ValueType>,
    pub value: Option<Value>,
    pub children: Vec<Element>,
}

impl Element {
    /// A bare leaf element with no optional suffixes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            supertype: None,
            value_type: None,
            value: None,
            children: Vec::new(),
        }
    }

    pub fn with_index(mut self, index: u64) -> Self {
        self.index = Some(index);
        self
    }

    pub fn with_supertype(mut self, supertype: impl Into<String>) -> Self {
        self.supertype = Some(supertype.into());
        self
    }

    pub fn with_value(mut self, value_type: ValueType, value: Value) -> Self {
        self.value_type = Some(value_type);
        self.value = Some(value);
        self
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// This element plus all of its descendants
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_size).sum::<usize>()
    }

    /// `name` or `name$index`, used to label elements in diagnostics
    pub fn label(&self) -> String {
        match self.index {
            Some(index) => format!("{}${}", self.name, index),
            None => self.name.clone(),
        }
    }
}
