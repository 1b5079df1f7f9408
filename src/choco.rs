//! Chocosolver instance dumps
//!
//! Pipeline: text → [`lexer`] → spanned tokens with block markers →
//! [`parser`] (grammar + tree building) → [`ast::Document`] →
//! [`formats`] (JSON, rebuilt text). [`roundtrip`] compares a rebuild against
//! its source, and [`processor`] bundles the stages behind named output
//! formats driven by [`config`].

pub mod ast;
pub mod config;
pub mod error;
pub mod formats;
pub mod lexer;
pub mod parser;
pub mod processor;
pub mod roundtrip;
pub mod testing;
