//! Public API for the parser.

use chumsky::prelude::*;
use std::ops::Range;

use super::ast_conversion::convert_document;
use super::parser::{document, ParserError};
use crate::choco::ast::{Document, SourceLocation};
use crate::choco::error::ParseError;
use crate::choco::lexer::{lex_with_tab_width, TokenSpan, DEFAULT_TAB_WIDTH};

/// Main entry point: parse a whole instance dump into its canonical tree
pub fn parse_document(source: &str) -> Result<Document, ParseError> {
    parse_document_with_tab_width(source, DEFAULT_TAB_WIDTH)
}

/// Like [`parse_document`], measuring tabs with the given tab stop
pub fn parse_document_with_tab_width(
    source: &str,
    tab_width: usize,
) -> Result<Document, ParseError> {
    let tokens = lex_with_tab_width(source, tab_width)?;
    parse_tokens(tokens, source)
}

/// Parse an already lexed token stream; spans must point into `source`
pub fn parse_tokens(tokens: Vec<TokenSpan>, source: &str) -> Result<Document, ParseError> {
    let spans: Vec<Range<usize>> = tokens.iter().map(|(_, span)| span.clone()).collect();

    let parsed = document()
        .parse(tokens)
        .map_err(|errors| syntax_error(errors, &spans, source))?;

    let doc = convert_document(source, parsed)?;
    log::debug!(
        "parsed {} instances holding {} elements",
        doc.len(),
        doc.element_count()
    );
    Ok(doc)
}

/// Map the first chumsky error to a [`ParseError::Syntax`] at the offending token
///
/// Chumsky spans index into the token vector; `spans` maps them back to bytes.
fn syntax_error(errors: Vec<ParserError>, spans: &[Range<usize>], source: &str) -> ParseError {
    let location = SourceLocation::new(source);
    let Some(error) = errors.into_iter().next() else {
        return ParseError::Syntax {
            position: location.byte_to_position(source.len()),
            message: "invalid document".to_string(),
        };
    };

    let byte = spans
        .get(error.span().start)
        .map(|span| span.start)
        .unwrap_or(source.len());

    let found = match error.found() {
        Some((token, _)) => token.to_string(),
        None => "end of input".to_string(),
    };

    let message = match (error.reason(), error.label()) {
        (chumsky::error::SimpleReason::Custom(message), _) => message.clone(),
        (_, Some(label)) => format!("expected {}, found {}", label, found),
        (_, None) => format!("unexpected {}", found),
    };

    log::trace!("syntax error at byte {}: {}", byte, message);
    ParseError::Syntax {
        position: location.byte_to_position(byte),
        message,
    }
}
