//! Indentation transformation
//!
//! Turns per-line indentation widths into semantic [`Token::BlockOpen`] and
//! [`Token::BlockClose`] markers.

use super::lexer_impl::RawLine;
use super::tokens::Token;
use super::{TokenSpan, MAX_NESTING_DEPTH};
use crate::choco::ast::Position;
use crate::choco::error::ParseError;

/// Flatten tokenized lines into one stream with block markers
///
/// # Algorithm
///
/// A stack of open indentation widths starts with the sentinel `0`. For each
/// line:
///
/// - wider than the top: push the width and emit one `BlockOpen`
/// - equal to the top: emit nothing
/// - narrower than the top: pop, emitting one `BlockClose` per pop, until the
///   top equals the width. If the width falls strictly between two open
///   widths the line is rejected with [`ParseError::Indentation`].
///
/// The line's own tokens follow, then a `Newline`. At the end of input every
/// width above the sentinel is closed. A line more than
/// [`MAX_NESTING_DEPTH`] blocks deep is rejected with
/// [`ParseError::NestingTooDeep`].
///
/// # Example
///
/// Widths `0, 2, 4, 2, 0` yield
/// `A ⏎ Open B ⏎ Open C ⏎ Close D ⏎ Close E ⏎`.
pub fn transform_indentation(
    lines: Vec<RawLine>,
    source_len: usize,
) -> Result<Vec<TokenSpan>, ParseError> {
    let mut result = Vec::new();
    let mut stack: Vec<usize> = vec![0];

    for line in lines {
        let top = stack.last().copied().unwrap_or(0);
        let content_start = line.content_start();

        if line.width > top {
            // the sentinel is not a block, so this is the new line's depth
            if stack.len() > MAX_NESTING_DEPTH {
                return Err(ParseError::NestingTooDeep {
                    position: Position::new(line.number, line.indent.len() + 1),
                    limit: MAX_NESTING_DEPTH,
                });
            }
            stack.push(line.width);
            result.push((Token::BlockOpen, line.indent.clone()));
        } else if line.width < top {
            while stack.last().is_some_and(|&open| open > line.width) {
                stack.pop();
                result.push((Token::BlockClose, content_start..content_start));
            }
            if stack.last() != Some(&line.width) {
                return Err(ParseError::Indentation {
                    position: Position::new(line.number, line.indent.len() + 1),
                    width: line.width,
                    open: stack,
                });
            }
        }

        result.extend(line.tokens);
        result.push((Token::Newline, line.newline));
    }

    for _ in 1..stack.len() {
        result.push((Token::BlockClose, source_len..source_len));
    }

    Ok(result)
}
