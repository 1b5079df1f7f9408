//! Rebuild-and-compare oracle
//!
//! A parse is lossless when rebuilding its tree reproduces the source up to
//! [`normalize`]: line endings, trailing whitespace and blank lines. Blank
//! lines carry nothing for the grammar, so they are not compared at all.
//! Indentation is compared as written, so sources indented with something
//! other than the rebuild width need [`verify_with`].

use similar::{Algorithm, ChangeTag, TextDiff};
use thiserror::Error;

use crate::choco::error::{ParseError, ValidationError};
use crate::choco::formats::rebuild::{rebuild_with_indent, DEFAULT_INDENT_WIDTH};
use crate::choco::lexer::DEFAULT_TAB_WIDTH;
use crate::choco::parser::parse_document_with_tab_width;

#[derive(Debug, Error)]
pub enum RoundTripError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Normalized source and rebuild of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundTripReport {
    pub source: String,
    pub rebuilt: String,
}

impl RoundTripReport {
    pub fn is_lossless(&self) -> bool {
        self.source == self.rebuilt
    }

    /// 1-based line (in normalized text) of the first difference
    pub fn first_mismatch(&self) -> Option<usize> {
        if self.is_lossless() {
            return None;
        }
        let diff = TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_lines(&self.source, &self.rebuilt);

        let mut line = 1;
        for change in diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Equal => line += 1,
                ChangeTag::Delete | ChangeTag::Insert => return Some(line),
            }
        }
        None
    }

    /// Unified diff from source to rebuild, empty when lossless
    pub fn diff(&self) -> String {
        if self.is_lossless() {
            return String::new();
        }
        TextDiff::configure()
            .algorithm(Algorithm::Myers)
            .diff_lines(&self.source, &self.rebuilt)
            .unified_diff()
            .context_radius(2)
            .header("source", "rebuilt")
            .to_string()
    }
}

/// Canonical form used for comparison
///
/// CRLF becomes LF, trailing whitespace is trimmed from every line and blank
/// lines are dropped. Non-empty output ends with a single newline.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.split('\n').map(str::trim_end).filter(|line| !line.is_empty()) {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Compare a source text with a rebuild of it
pub fn compare(source: &str, rebuilt: &str) -> RoundTripReport {
    RoundTripReport {
        source: normalize(source),
        rebuilt: normalize(rebuilt),
    }
}

/// Parse, rebuild with the default widths and compare
pub fn verify(source: &str) -> Result<RoundTripReport, RoundTripError> {
    verify_with(source, DEFAULT_TAB_WIDTH, DEFAULT_INDENT_WIDTH)
}

/// Parse with `tab_width`, rebuild with `indent_width` spaces per level and compare
pub fn verify_with(
    source: &str,
    tab_width: usize,
    indent_width: usize,
) -> Result<RoundTripReport, RoundTripError> {
    let doc = parse_document_with_tab_width(source, tab_width)?;
    let rebuilt = rebuild_with_indent(&doc, indent_width)?;
    let report = compare(source, &rebuilt);

    if report.is_lossless() {
        log::debug!("round trip of {} instance(s) is lossless", doc.len());
    } else {
        log::debug!(
            "round trip differs from source at normalized line {:?}",
            report.first_mismatch()
        );
    }
    Ok(report)
}
