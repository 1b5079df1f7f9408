//! Token definitions for instance dumps
//!
//! Literal tokens are produced by logos. `Instance`, `Begin`, `End` and the
//! reserved type words are plain [`Token::Name`]s; the grammar recognises them
//! by text, which keeps them usable as clafer names inside a block.
use logos::Logos;
use serde::Serialize;
use std::fmt;

#[derive(Logos, Debug, PartialEq, Eq, Clone, Hash, Serialize)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    // Instance frame markers
    #[token("===")]
    HeaderRule,
    #[token("---")]
    FooterRule,

    // Clafer line punctuation
    #[token("$")]
    Dollar,
    #[token(":")]
    Colon,
    #[token("->")]
    Arrow,
    #[token("=")]
    Equals,

    #[regex(r"[0-9]+", |lex| lex.slice().to_string())]
    Int(String),

    // The sign is mandatory so this never competes with Int
    #[regex(r"[+-][0-9]+", |lex| lex.slice().to_string())]
    SignedInt(String),

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Name(String),

    // Raw lexeme, quotes included
    #[regex(r#""([^"\\\n]|\\.)*""#, |lex| lex.slice().to_string())]
    Str(String),

    // Synthetic tokens, inserted by the line/indentation pass
    Newline,
    BlockOpen,
    BlockClose,
}

impl Token {
    pub fn is_synthetic(&self) -> bool {
        matches!(self, Token::Newline | Token::BlockOpen | Token::BlockClose)
    }

    /// Tokens that may stand after `=` on a clafer line
    pub fn is_value(&self) -> bool {
        matches!(
            self,
            Token::Name(_) | Token::Int(_) | Token::SignedInt(_) | Token::Str(_)
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::HeaderRule => write!(f, "`===`"),
            Token::FooterRule => write!(f, "`---`"),
            Token::Dollar => write!(f, "`$`"),
            Token::Colon => write!(f, "`:`"),
            Token::Arrow => write!(f, "`->`"),
            Token::Equals => write!(f, "`=`"),
            Token::Int(s) => write!(f, "integer `{}`", s),
            Token::SignedInt(s) => write!(f, "signed integer `{}`", s),
            Token::Name(s) => write!(f, "name `{}`", s),
            Token::Str(s) => write!(f, "string {}", s),
            Token::Newline => write!(f, "end of line"),
            Token::BlockOpen => write!(f, "indented block"),
            Token::BlockClose => write!(f, "end of indented block"),
        }
    }
}
