//! Line-oriented tokenization
//!
//! The source is split into physical lines. For every non-blank line the
//! leading whitespace is measured (tabs advance to the next tab stop) and the
//! remainder is handed to logos. Blank lines never reach the indentation pass.

use std::ops::Range;

use logos::Logos;

use super::tokens::Token;
use super::TokenSpan;
use crate::choco::ast::Position;
use crate::choco::error::ParseError;

/// One non-blank physical line, tokenized
#[derive(Debug, Clone, PartialEq)]
pub struct RawLine {
    /// 1-based line number
    pub number: usize,
    /// Byte range of the leading indentation
    pub indent: Range<usize>,
    /// Indentation measured in columns
    pub width: usize,
    /// Byte offset just past the line's content, trailing whitespace excluded
    pub end: usize,
    /// From `end` through the line terminator; empty for an unterminated last line
    pub newline: Range<usize>,
    pub tokens: Vec<TokenSpan>,
}

impl RawLine {
    /// Byte offset of the first non-whitespace character
    pub fn content_start(&self) -> usize {
        self.indent.end
    }
}

/// Width of an indentation prefix, in columns
///
/// Spaces count one column; a tab advances to the next multiple of `tab_width`.
pub fn indentation_width(prefix: &str, tab_width: usize) -> usize {
    prefix.chars().fold(0, |width, ch| match ch {
        '\t' if tab_width > 0 => (width / tab_width + 1) * tab_width,
        '\t' => width,
        _ => width + 1,
    })
}

/// Tokenize every non-blank line of `source`
pub fn tokenize_lines(source: &str, tab_width: usize) -> Result<Vec<RawLine>, ParseError> {
    let mut lines = Vec::new();
    let mut line_start = 0;

    for (index, physical) in source.split('\n').enumerate() {
        let start = line_start;
        let physical_end = start + physical.len();
        let terminated = physical_end < source.len();
        let text = physical.strip_suffix('\r').unwrap_or(physical);
        line_start = physical_end + 1;

        if text.trim().is_empty() {
            continue;
        }

        let indent_len = text.len() - text.trim_start_matches([' ', '\t']).len();
        let content_start = start + indent_len;
        let number = index + 1;

        let mut tokens = Vec::new();
        let mut lexer = Token::lexer(&text[indent_len..]);
        while let Some(result) = lexer.next() {
            let span = lexer.span();
            let span = content_start + span.start..content_start + span.end;
            match result {
                Ok(token) => tokens.push((token, span)),
                Err(()) => {
                    return Err(ParseError::Lexical {
                        position: Position::new(number, span.start - start + 1),
                        text: lexer.slice().to_string(),
                    })
                }
            }
        }

        let end = start + text.trim_end().len();
        let newline = if terminated { end..physical_end + 1 } else { end..end };

        lines.push(RawLine {
            number,
            indent: start..content_start,
            width: indentation_width(&text[..indent_len], tab_width),
            end,
            newline,
            tokens,
        });
    }

    Ok(lines)
}

/// Raw tokens without block markers, each non-blank line ended by a `Newline`
pub fn tokenize(source: &str) -> Result<Vec<TokenSpan>, ParseError> {
    let lines = tokenize_lines(source, super::DEFAULT_TAB_WIDTH)?;
    let mut tokens = Vec::new();
    for line in lines {
        tokens.extend(line.tokens);
        tokens.push((Token::Newline, line.newline));
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choco::error::ErrorKind;

    #[test]
    fn test_indentation_width_uses_tab_stops() {
        assert_eq!(indentation_width("", 8), 0);
        assert_eq!(indentation_width("    ", 8), 4);
        assert_eq!(indentation_width("\t", 8), 8);
        assert_eq!(indentation_width("  \t", 8), 8);
        assert_eq!(indentation_width("\t  ", 8), 10);
        assert_eq!(indentation_width("\t\t", 8), 16);
        assert_eq!(indentation_width("\t", 4), 4);
    }

    #[test]
    fn test_blank_lines_are_dropped() {
        let lines = tokenize_lines("A \n\n   \n\t\nB \n", 8).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 1);
        assert_eq!(lines[1].number, 5);
    }

    #[test]
    fn test_line_measurements() {
        let source = "A \n    B$1 \n";
        let lines = tokenize_lines(source, 8).unwrap();
        let b = &lines[1];
        assert_eq!(b.width, 4);
        assert_eq!(&source[b.indent.clone()], "    ");
        assert_eq!(&source[b.content_start()..b.end], "B$1");
        assert_eq!(b.newline, 10..12);
        assert_eq!(b.tokens.len(), 3);
    }

    #[test]
    fn test_crlf_line_endings() {
        let source = "A \r\n  B \r\n";
        let lines = tokenize_lines(source, 8).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].width, 2);
        assert_eq!(lines[0].newline, 1..4);
    }

    #[test]
    fn test_unterminated_last_line() {
        let source = "A \nB";
        let lines = tokenize_lines(source, 8).unwrap();
        assert_eq!(lines[0].newline, 1..3);
        assert_eq!(lines[1].newline, 4..4);
    }

    #[test]
    fn test_lexical_error_reports_line_and_column() {
        let err = tokenize_lines("A \n  B % \n", 8).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lexical);
        assert_eq!(err.position(), Position::new(2, 5));
        match err {
            ParseError::Lexical { text, .. } => assert_eq!(text, "%"),
            other => panic!("expected lexical error, got {:?}", other),
        }
    }

    #[test]
    fn test_tokenize_ends_every_line() {
        let tokens = tokenize("A \n\n  B \n").unwrap();
        let kinds: Vec<Token> = tokens.into_iter().map(|(t, _)| t).collect();
        assert_eq!(
            kinds,
            vec![
                Token::Name("A".into()),
                Token::Newline,
                Token::Name("B".into()),
                Token::Newline,
            ]
        );
    }
}
