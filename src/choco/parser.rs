//! Parser for instance dumps
//!
//! [`parser`] holds the grammar: chumsky combinators over the spanned token
//! stream, producing an intermediate tree that only records byte spans.
//! [`ast_conversion`] folds that tree into the canonical
//! [`Document`](crate::choco::ast::Document), extracting text from the source,
//! checking that instance markers agree and coercing `int` values.
//! [`api`] wires lexing, parsing and conversion together.

pub mod api;
pub mod ast_conversion;
pub(crate) mod intermediate_ast;
#[allow(clippy::module_inception)]
pub mod parser;

pub use api::{parse_document, parse_document_with_tab_width, parse_tokens};
pub use parser::document;
