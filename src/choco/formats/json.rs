//! JSON projection of the canonical tree
//!
//! The aggregate document is an array of instances. Each instance can also be
//! rendered on its own, keyed by its id, from the same tree. Absent optional
//! fields come out as `null` so that [`from_json`] restores them exactly.

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

use super::validation::{validate_document, validate_instance};
use crate::choco::ast::{Document, Instance};
use crate::choco::error::ValidationError;

/// Errors raised while rendering JSON
#[derive(Debug, Error)]
pub enum JsonError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("JSON serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

/// One instance rendered as its own JSON document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDocument {
    pub id: u64,
    pub json: String,
}

impl InstanceDocument {
    /// `<prefix>.<id>.json`
    pub fn file_name(&self, prefix: &str) -> String {
        format!("{}.{}.json", prefix, self.id)
    }
}

/// Render the whole document; `indent` spaces per level, `0` for compact output
pub fn to_json(doc: &Document, indent: usize) -> Result<String, JsonError> {
    validate_document(doc)?;
    Ok(render(doc, indent)?)
}

/// Render a single instance as a standalone document
pub fn instance_to_json(instance: &Instance, indent: usize) -> Result<String, JsonError> {
    validate_instance(instance)?;
    Ok(render(instance, indent)?)
}

/// Render every instance separately, in source order
pub fn instances_to_json(doc: &Document, indent: usize) -> Result<Vec<InstanceDocument>, JsonError> {
    doc.iter()
        .map(|instance| {
            Ok(InstanceDocument {
                id: instance.id,
                json: instance_to_json(instance, indent)?,
            })
        })
        .collect()
}

/// Read an aggregate document back
///
/// Every element level costs two JSON levels (the object and its `children`
/// array), so serde_json's recursion limit is lifted and the stack is grown
/// on demand instead.
pub fn from_json(text: &str) -> Result<Document, serde_json::Error> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    deserializer.disable_recursion_limit();
    let doc = Document::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(doc)
}

fn render<T: Serialize>(value: &T, indent: usize) -> Result<String, serde_json::Error> {
    if indent == 0 {
        return serde_json::to_string(value);
    }

    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(<serde_json::Error as serde::ser::Error>::custom)
}
