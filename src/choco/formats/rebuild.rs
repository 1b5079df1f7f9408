//! Rendering the canonical tree back into dump notation
//!
//! The output follows what chocosolver prints:
//!
//! ```text
//! === Instance 2 Begin ===
//!
//! Bar$3 : Base -> int = 5 
//!   Child -> string = "hi" 
//!
//! --- Instance 2 End ---
//!
//! ```
//!
//! Every element line ends with a single space. Nesting uses a fixed number of
//! spaces per level regardless of the indentation the source used. Optional
//! parts are printed when present, so index `0` and value `0` survive.

use super::validation::{validate_document, validate_instance};
use crate::choco::ast::{Document, Element, Instance};
use crate::choco::error::ValidationError;

/// Spaces per nesting level
pub const DEFAULT_INDENT_WIDTH: usize = 2;

/// Rebuild the dump for a whole document
pub fn rebuild(doc: &Document) -> Result<String, ValidationError> {
    rebuild_with_indent(doc, DEFAULT_INDENT_WIDTH)
}

/// Rebuild using `indent_width` spaces per nesting level
pub fn rebuild_with_indent(doc: &Document, indent_width: usize) -> Result<String, ValidationError> {
    validate_document(doc)?;
    let mut out = String::new();
    for instance in doc {
        write_instance(&mut out, instance, indent_width);
    }
    Ok(out)
}

/// Rebuild the dump for a single instance
pub fn rebuild_instance(instance: &Instance, indent_width: usize) -> Result<String, ValidationError> {
    validate_instance(instance)?;
    let mut out = String::new();
    write_instance(&mut out, instance, indent_width);
    Ok(out)
}

fn write_instance(out: &mut String, instance: &Instance, indent_width: usize) {
    out.push_str(&format!("=== Instance {} Begin ===\n\n", instance.id));
    for element in &instance.elements {
        write_element(out, element, 0, indent_width);
    }
    out.push('\n');
    out.push_str(&format!("--- Instance {} End ---\n\n", instance.id));
}

fn write_element(out: &mut String, element: &Element, depth: usize, indent_width: usize) {
    out.push_str(&" ".repeat(depth * indent_width));
    out.push_str(&element.name);
    if let Some(index) = element.index {
        out.push_str(&format!("${}", index));
    }
    if let Some(supertype) = &element.supertype {
        out.push_str(" : ");
        out.push_str(supertype);
    }
    if let Some(value_type) = &element.value_type {
        out.push_str(" -> ");
        out.push_str(value_type.as_str());
    }
    if let Some(value) = &element.value {
        out.push_str(&format!(" = {}", value));
    }
    // chocosolver ends every element line with a space
    out.push_str(" \n");

    for child in &element.children {
        write_element(out, child, depth + 1, indent_width);
    }
}
