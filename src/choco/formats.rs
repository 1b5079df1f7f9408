//! Output formats for the canonical tree
//!
//! - [`json`]: the whole document or one document per instance
//! - [`rebuild`]: the original dump notation, used as a round-trip oracle
//!
//! Both renderers are total over trees produced by the parser. Trees built by
//! hand are checked by [`validation`] first and rejected with a
//! [`ValidationError`](crate::choco::error::ValidationError) naming the field.

pub mod json;
pub mod rebuild;
pub mod validation;

pub use json::{
    from_json, instance_to_json, instances_to_json, to_json, InstanceDocument, JsonError,
};
pub use rebuild::{rebuild, rebuild_instance, rebuild_with_indent};
pub use validation::{validate_document, validate_instance};
