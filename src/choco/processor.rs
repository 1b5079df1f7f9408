//! Text in, named output format out
//!
//! [`Processor`] bundles lexing, parsing and rendering behind the formats a
//! caller can ask for by name:
//!
//! - `json`: the aggregate document
//! - `instances-json`: one document per instance, see [`InstanceDocument::file_name`]
//! - `rebuilt`: the dump rendered back from the tree
//! - `tokens`: the lexer output with byte spans, for debugging the grammar
//!
//! Widths and the per-instance file prefix come from [`ChocoConfig`].

use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::choco::ast::Document;
use crate::choco::config::ChocoConfig;
use crate::choco::error::{ParseError, ValidationError};
use crate::choco::formats::{instances_to_json, rebuild_with_indent, to_json, InstanceDocument, JsonError};
use crate::choco::lexer::{lex_with_tab_width, Token};
use crate::choco::parser::parse_document_with_tab_width;
use crate::choco::roundtrip::{self, RoundTripError, RoundTripReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Json,
    InstancesJson,
    Rebuilt,
    Tokens,
}

impl OutputFormat {
    pub fn available() -> &'static [OutputFormat] {
        &[
            OutputFormat::Json,
            OutputFormat::InstancesJson,
            OutputFormat::Rebuilt,
            OutputFormat::Tokens,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::InstancesJson => "instances-json",
            OutputFormat::Rebuilt => "rebuilt",
            OutputFormat::Tokens => "tokens",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ProcessingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::available()
            .iter()
            .copied()
            .find(|format| format.name() == s)
            .ok_or_else(|| ProcessingError::UnknownFormat(s.to_string()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("unknown output format `{0}` (expected json, instances-json, rebuilt or tokens)")]
    UnknownFormat(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Json(#[from] JsonError),
    #[error("failed to render tokens: {0}")]
    Tokens(#[from] serde_json::Error),
}

impl From<RoundTripError> for ProcessingError {
    fn from(err: RoundTripError) -> Self {
        match err {
            RoundTripError::Parse(err) => ProcessingError::Parse(err),
            RoundTripError::Validation(err) => ProcessingError::Validation(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutput {
    Single(String),
    PerInstance(Vec<InstanceDocument>),
}

impl ProcessOutput {
    /// The single text, or the per-instance documents joined by newlines
    pub fn into_text(self) -> String {
        match self {
            ProcessOutput::Single(text) => text,
            ProcessOutput::PerInstance(docs) => docs
                .into_iter()
                .map(|doc| doc.json)
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Aggregate and per-instance JSON from one parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Documents {
    pub aggregate: String,
    pub instances: Vec<InstanceDocument>,
}

#[derive(Serialize)]
struct TokenRecord<'a> {
    token: &'a Token,
    start: usize,
    end: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Processor {
    config: ChocoConfig,
}

impl Processor {
    pub fn new(config: ChocoConfig) -> Self {
        Processor { config }
    }

    pub fn parse(&self, source: &str) -> Result<Document, ParseError> {
        parse_document_with_tab_width(source, self.config.lexer.tab_width)
    }

    pub fn process(&self, source: &str, format: OutputFormat) -> Result<ProcessOutput, ProcessingError> {
        log::debug!("processing {} bytes as {}", source.len(), format);
        match format {
            OutputFormat::Tokens => self.tokens(source).map(ProcessOutput::Single),
            OutputFormat::Json => {
                let doc = self.parse(source)?;
                Ok(ProcessOutput::Single(to_json(&doc, self.config.json.indent)?))
            }
            OutputFormat::InstancesJson => {
                let doc = self.parse(source)?;
                Ok(ProcessOutput::PerInstance(instances_to_json(
                    &doc,
                    self.config.json.indent,
                )?))
            }
            OutputFormat::Rebuilt => {
                let doc = self.parse(source)?;
                Ok(ProcessOutput::Single(rebuild_with_indent(
                    &doc,
                    self.config.rebuild.indent_width,
                )?))
            }
        }
    }

    /// Read `path` and process its contents
    pub fn process_file(
        &self,
        path: impl AsRef<Path>,
        format: OutputFormat,
    ) -> Result<ProcessOutput, ProcessingError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ProcessingError::Io {
            path: path.display().to_string(),
            source,
        })?;
        self.process(&source, format)
    }

    pub fn documents(&self, source: &str) -> Result<Documents, ProcessingError> {
        let doc = self.parse(source)?;
        let indent = self.config.json.indent;
        Ok(Documents {
            aggregate: to_json(&doc, indent)?,
            instances: instances_to_json(&doc, indent)?,
        })
    }

    /// File name for a per-instance document under the configured prefix
    pub fn file_name(&self, doc: &InstanceDocument) -> String {
        doc.file_name(&self.config.json.instance_file_prefix)
    }

    pub fn verify(&self, source: &str) -> Result<RoundTripReport, ProcessingError> {
        Ok(roundtrip::verify_with(
            source,
            self.config.lexer.tab_width,
            self.config.rebuild.indent_width,
        )?)
    }

    fn tokens(&self, source: &str) -> Result<String, ProcessingError> {
        let tokens = lex_with_tab_width(source, self.config.lexer.tab_width)?;
        log::trace!("lexed {} tokens", tokens.len());
        let records: Vec<TokenRecord<'_>> = tokens
            .iter()
            .map(|(token, span)| TokenRecord {
                token,
                start: span.start,
                end: span.end,
            })
            .collect();
        Ok(serde_json::to_string_pretty(&records)?)
    }
}
