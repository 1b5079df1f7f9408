//! Intermediate parse tree holding spans instead of extracted text
//!
//! Produced by the grammar and consumed by [`ast_conversion`](super::ast_conversion).
//! Every optional suffix of a clafer line stays optional here so the builder
//! can tell "absent" from "present".
//!
//! An instance body is kept flat: clafer lines interleaved with the block
//! markers the lexer emitted. Nesting is rebuilt from the markers by the tree
//! builder with an explicit stack, so depth never turns into recursion.

use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub struct ClaferLineWithSpans {
    pub name: Range<usize>,
    pub index: Option<Range<usize>>,
    pub supertype: Option<Range<usize>>,
    /// `-> TYPE = VALUE`: the type span and the value span
    pub reference: Option<(Range<usize>, Range<usize>)>,
}

/// One item of an instance body, in token order
#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Line(ClaferLineWithSpans),
    BlockOpen(Range<usize>),
    BlockClose(Range<usize>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InstanceWithSpans {
    /// The opening `===` of the begin marker
    pub header: Range<usize>,
    pub begin_id: Range<usize>,
    pub body: Vec<BodyItem>,
    /// The opening `---` of the end marker
    pub footer: Range<usize>,
    pub end_id: Range<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentWithSpans {
    pub instances: Vec<InstanceWithSpans>,
}
