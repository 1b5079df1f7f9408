//! Fluent assertion API for canonical trees
//!
//! ```rust,ignore
//! assert_document(&doc)
//!     .instance_count(1)
//!     .instance(0, |instance| {
//!         instance.id(2).element(0, |bar| {
//!             bar.name("Bar").index(3).int_value(5).child(0, |child| {
//!                 child.name("Child").text_value("\"hi\"").leaf();
//!             });
//!         });
//!     });
//! ```

use crate::choco::ast::{Document, Element, Instance, Value, ValueType};

/// Create an assertion builder for a document
pub fn assert_document(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    pub fn instance_count(self, expected: usize) -> Self {
        assert_eq!(
            self.doc.len(),
            expected,
            "Expected {} instances, found {} (ids {:?})",
            expected,
            self.doc.len(),
            self.doc.iter().map(|i| i.id).collect::<Vec<_>>()
        );
        self
    }

    /// Assert on the instance at `position` in source order
    pub fn instance<F>(self, position: usize, assertion: F) -> Self
    where
        F: FnOnce(InstanceAssertion<'a>),
    {
        assert!(
            position < self.doc.len(),
            "Instance position {} out of bounds (document has {} instances)",
            position,
            self.doc.len()
        );
        assertion(InstanceAssertion {
            instance: &self.doc.instances[position],
        });
        self
    }
}

pub struct InstanceAssertion<'a> {
    instance: &'a Instance,
}

impl<'a> InstanceAssertion<'a> {
    pub fn id(self, expected: u64) -> Self {
        assert_eq!(self.instance.id, expected, "Instance id mismatch");
        self
    }

    pub fn element_count(self, expected: usize) -> Self {
        assert_eq!(
            self.instance.elements.len(),
            expected,
            "Instance {}: expected {} root elements, found [{}]",
            self.instance.id,
            expected,
            summarize(&self.instance.elements)
        );
        self
    }

    pub fn element<F>(self, position: usize, assertion: F) -> Self
    where
        F: FnOnce(ElementAssertion<'a>),
    {
        let elements = &self.instance.elements;
        assert!(
            position < elements.len(),
            "Instance {}: element position {} out of bounds ({} root elements)",
            self.instance.id,
            position,
            elements.len()
        );
        assertion(ElementAssertion {
            element: &elements[position],
            context: format!("instance {} > {}", self.instance.id, elements[position].label()),
        });
        self
    }
}

pub struct ElementAssertion<'a> {
    element: &'a Element,
    context: String,
}

impl<'a> ElementAssertion<'a> {
    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.element.name, expected, "{}: name mismatch", self.context);
        self
    }

    pub fn index(self, expected: u64) -> Self {
        assert_eq!(self.element.index, Some(expected), "{}: index mismatch", self.context);
        self
    }

    pub fn no_index(self) -> Self {
        assert_eq!(self.element.index, None, "{}: expected no index", self.context);
        self
    }

    pub fn supertype(self, expected: &str) -> Self {
        assert_eq!(
            self.element.supertype.as_deref(),
            Some(expected),
            "{}: supertype mismatch",
            self.context
        );
        self
    }

    pub fn no_supertype(self) -> Self {
        assert_eq!(self.element.supertype, None, "{}: expected no supertype", self.context);
        self
    }

    pub fn value_type(self, expected: &str) -> Self {
        assert_eq!(
            self.element.value_type,
            Some(ValueType::from(expected)),
            "{}: value type mismatch",
            self.context
        );
        self
    }

    pub fn int_value(self, expected: i64) -> Self {
        assert_eq!(
            self.element.value,
            Some(Value::Int(expected)),
            "{}: expected integer value",
            self.context
        );
        self
    }

    /// Raw lexeme, quotes included for string literals
    pub fn text_value(self, expected: &str) -> Self {
        assert_eq!(
            self.element.value,
            Some(Value::from(expected)),
            "{}: expected text value",
            self.context
        );
        self
    }

    /// Neither a type tag nor a value
    pub fn untyped(self) -> Self {
        assert_eq!(self.element.value_type, None, "{}: expected no type", self.context);
        assert_eq!(self.element.value, None, "{}: expected no value", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.element.children.len(),
            expected,
            "{}: expected {} children, found [{}]",
            self.context,
            expected,
            summarize(&self.element.children)
        );
        self
    }

    pub fn leaf(self) -> Self {
        assert!(
            self.element.is_leaf(),
            "{}: expected a leaf, found children [{}]",
            self.context,
            summarize(&self.element.children)
        );
        self
    }

    pub fn child<F>(self, position: usize, assertion: F) -> Self
    where
        F: FnOnce(ElementAssertion<'a>),
    {
        let children = &self.element.children;
        assert!(
            position < children.len(),
            "{}: child position {} out of bounds ({} children)",
            self.context,
            position,
            children.len()
        );
        assertion(ElementAssertion {
            element: &children[position],
            context: format!("{} > {}", self.context, children[position].label()),
        });
        self
    }
}

fn summarize(elements: &[Element]) -> String {
    elements
        .iter()
        .map(Element::label)
        .collect::<Vec<_>>()
        .join(", ")
}
