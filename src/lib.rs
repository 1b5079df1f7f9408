//! # choco-instances
//!
//! A parser for the instance dumps that chocosolver prints for Clafer models.
//!
//! The dump is an indentation language: every instance is framed by
//! `=== Instance N Begin ===` / `--- Instance N End ---` markers and holds a
//! forest of clafer lines. This crate turns that text into a canonical tree,
//! renders the tree as JSON, and rebuilds the original text from the tree so
//! that a parse can be checked for losslessness.
//!
//! See [`choco`] for the pipeline stages.

pub mod choco;

pub use choco::ast::{Document, Element, Instance, Value, ValueType};
pub use choco::error::{ErrorKind, ParseError, ValidationError};
pub use choco::formats::{from_json, rebuild, to_json};
pub use choco::parser::parse_document;
