//! Canonical tree for chocosolver instance dumps
//!
//! The tree is a strict forest: a [`Document`] owns its [`Instance`]s, an
//! instance owns its top-level [`Element`]s and every element owns its
//! children. It carries no source positions; those live only in the
//! intermediate parse tree and in error values.
//!
//! Optional fields are `Option`s so that "absent" never collapses into a
//! falsy default such as index `0` or an empty string.

pub mod elements;
pub mod position;

pub use elements::{Document, Element, Instance, Value, ValueType};
pub use position::{Position, SourceLocation};
