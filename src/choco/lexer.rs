//! Lexer for chocosolver instance dumps
//!
//! Tokenization happens in two passes, mirroring how indentation languages are
//! usually made tractable for parser combinators:
//!
//! 1. [`lexer_impl`] splits the text into physical lines, measures each
//!    line's leading whitespace and runs the logos lexer over the rest. Blank
//!    lines are dropped here.
//! 2. [`indentation_transform`] compares each line's width against a stack of
//!    open widths and synthesizes [`Token::BlockOpen`] / [`Token::BlockClose`]
//!    markers, which the grammar then treats like braces.
//!
//! Every token is paired with its byte range in the source. Synthetic tokens
//! get the range of the indentation they stand for (opens) or an empty range
//! where the dedent happens (closes).

pub mod indentation_transform;
pub mod lexer_impl;
pub mod tokens;

use std::ops::Range;

use crate::choco::error::ParseError;

pub use indentation_transform::transform_indentation;
pub use lexer_impl::{indentation_width, tokenize, tokenize_lines, RawLine};
pub use tokens::Token;

/// A token paired with its byte range in the source
pub type TokenSpan = (Token, Range<usize>);

/// Columns per tab stop used when measuring indentation
pub const DEFAULT_TAB_WIDTH: usize = 8;

/// Deepest block allowed below a top-level element
///
/// Renderers walk the tree recursively; bounding the depth here keeps every
/// tree the parser returns renderable.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Fully processed token stream: literal tokens, line ends and block markers
pub fn lex(source: &str) -> Result<Vec<TokenSpan>, ParseError> {
    lex_with_tab_width(source, DEFAULT_TAB_WIDTH)
}

/// Like [`lex`], measuring tabs with the given tab stop
pub fn lex_with_tab_width(source: &str, tab_width: usize) -> Result<Vec<TokenSpan>, ParseError> {
    let lines = tokenize_lines(source, tab_width)?;
    let line_count = lines.len();
    let tokens = transform_indentation(lines, source.len())?;
    log::debug!(
        "lexed {} tokens from {} non-blank lines",
        tokens.len(),
        line_count
    );
    Ok(tokens)
}

/// Strip spans, keeping only the tokens
pub fn strip_spans(tokens: Vec<TokenSpan>) -> Vec<Token> {
    tokens.into_iter().map(|(token, _)| token).collect()
}
