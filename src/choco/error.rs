//! Error types
//!
//! Parsing fails fast: the first lexical, indentation, syntax or semantic
//! problem aborts the whole document, since a partially parsed instance is of
//! no use downstream. Rendering can only fail on hand-built trees, and does so
//! with a [`ValidationError`].

use crate::choco::ast::Position;
use thiserror::Error;

/// The four classes of parse failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Lexical,
    Indentation,
    Syntax,
    Semantic,
}

/// Errors raised while turning text into a [`Document`](crate::choco::ast::Document)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A line contains input that matches no terminal
    #[error("lexical error at {position}: unrecognized input `{text}`")]
    Lexical { position: Position, text: String },

    /// A dedent landed between two enclosing indentation widths
    #[error(
        "indentation error at {position}: dedent to width {width} matches no enclosing block (open widths {open:?})"
    )]
    Indentation {
        position: Position,
        width: usize,
        open: Vec<usize>,
    },

    /// A block opened more than [`MAX_NESTING_DEPTH`](crate::choco::lexer::MAX_NESTING_DEPTH)
    /// levels below a top-level element
    #[error("indentation error at {position}: nesting deeper than {limit} levels")]
    NestingTooDeep { position: Position, limit: usize },

    /// The token stream does not follow the grammar
    #[error("syntax error at {position}: {message}")]
    Syntax { position: Position, message: String },

    /// Well-formed syntax with inconsistent content
    #[error("semantic error at {position}: {problem}")]
    Semantic {
        position: Position,
        problem: SemanticProblem,
    },
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Lexical { .. } => ErrorKind::Lexical,
            ParseError::Indentation { .. } | ParseError::NestingTooDeep { .. } => {
                ErrorKind::Indentation
            }
            ParseError::Syntax { .. } => ErrorKind::Syntax,
            ParseError::Semantic { .. } => ErrorKind::Semantic,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::Lexical { position, .. }
            | ParseError::Indentation { position, .. }
            | ParseError::NestingTooDeep { position, .. }
            | ParseError::Syntax { position, .. }
            | ParseError::Semantic { position, .. } => *position,
        }
    }

    /// 1-based source line the error points at
    pub fn line(&self) -> usize {
        self.position().line
    }
}

/// What went wrong in a [`ParseError::Semantic`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticProblem {
    #[error("instance opened as `Instance {begin} Begin` but closed as `Instance {end} End`")]
    MismatchedInstance { begin: u64, end: u64 },

    #[error("value `{lexeme}` is typed `int` but is not an integer")]
    InvalidInt { lexeme: String },

    #[error("number `{lexeme}` is out of range")]
    NumberOutOfRange { lexeme: String },
}

/// A hand-built tree that cannot be rendered faithfully
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{field}` at {path}: {message}")]
pub struct ValidationError {
    /// Location of the element, e.g. `instance 3 > Foo > Bar$2`
    pub path: String,
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, field: &'static str, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            field,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_message_names_both_markers() {
        let err = ParseError::Semantic {
            position: Position::new(1, 1),
            problem: SemanticProblem::MismatchedInstance { begin: 3, end: 4 },
        };
        let message = err.to_string();
        assert!(message.contains("Instance 3 Begin"), "{}", message);
        assert!(message.contains("Instance 4 End"), "{}", message);
        assert_eq!(err.kind(), ErrorKind::Semantic);
    }

    #[test]
    fn test_position_accessors() {
        let err = ParseError::Syntax {
            position: Position::new(5, 3),
            message: "unexpected `=`".into(),
        };
        assert_eq!(err.line(), 5);
        assert_eq!(err.to_string(), "syntax error at 5:3: unexpected `=`");
    }

    #[test]
    fn test_validation_error_names_field() {
        let err = ValidationError::new("instance 1 > Foo", "value", "expected an integer");
        assert_eq!(
            err.to_string(),
            "invalid `value` at instance 1 > Foo: expected an integer"
        );
    }
}
