//! Tree building: intermediate parse tree → canonical [`Document`]
//!
//! Text is sliced out of the source by span. Three things happen here rather
//! than in the grammar:
//!
//! - the flat body of an instance is folded into nested elements, using an
//!   explicit stack of open blocks
//! - the numbers in an instance's begin and end markers must agree
//! - a value typed `int` is parsed as a signed integer; every other type
//!   (including `real` and `double`) keeps the raw lexeme

use std::num::IntErrorKind;
use std::ops::Range;

use super::intermediate_ast::{BodyItem, ClaferLineWithSpans, DocumentWithSpans, InstanceWithSpans};
use crate::choco::ast::{Document, Element, Instance, SourceLocation, Value, ValueType};
use crate::choco::error::{ParseError, SemanticProblem};

/// Convert the intermediate tree, failing on the first semantic problem
pub(crate) fn convert_document(
    source: &str,
    doc_with_spans: DocumentWithSpans,
) -> Result<Document, ParseError> {
    let builder = TreeBuilder {
        source,
        location: SourceLocation::new(source),
    };

    let instances = doc_with_spans
        .instances
        .into_iter()
        .map(|instance| builder.instance(instance))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Document::new(instances))
}

struct TreeBuilder<'a> {
    source: &'a str,
    location: SourceLocation,
}

impl TreeBuilder<'_> {
    fn text(&self, span: &Range<usize>) -> &str {
        &self.source[span.clone()]
    }

    fn semantic(&self, span: &Range<usize>, problem: SemanticProblem) -> ParseError {
        ParseError::Semantic {
            position: self.location.range_start(span),
            problem,
        }
    }

    fn number(&self, span: &Range<usize>) -> Result<u64, ParseError> {
        let lexeme = self.text(span);
        lexeme.parse().map_err(|_| {
            self.semantic(
                span,
                SemanticProblem::NumberOutOfRange {
                    lexeme: lexeme.to_string(),
                },
            )
        })
    }

    fn syntax(&self, span: &Range<usize>, message: &str) -> ParseError {
        ParseError::Syntax {
            position: self.location.range_start(span),
            message: message.to_string(),
        }
    }

    fn instance(&self, instance: InstanceWithSpans) -> Result<Instance, ParseError> {
        let begin = self.number(&instance.begin_id)?;
        let end = self.number(&instance.end_id)?;
        if begin != end {
            return Err(self.semantic(
                &instance.header,
                SemanticProblem::MismatchedInstance { begin, end },
            ));
        }

        let elements = self.elements(instance.body, &instance.footer)?;
        Ok(Instance::new(begin, elements))
    }

    /// Fold a flat body into a forest
    ///
    /// `levels` holds the siblings read so far for every open block, outermost
    /// first. The last element of a level is the parent of the level above it.
    fn elements(
        &self,
        body: Vec<BodyItem>,
        footer: &Range<usize>,
    ) -> Result<Vec<Element>, ParseError> {
        let mut levels: Vec<Vec<Element>> = vec![Vec::new()];

        for item in body {
            match item {
                BodyItem::Line(line) => {
                    let element = self.clafer_line(line)?;
                    if let Some(level) = levels.last_mut() {
                        level.push(element);
                    }
                }
                BodyItem::BlockOpen(span) => {
                    if levels.last().map_or(true, Vec::is_empty) {
                        return Err(self.syntax(&span, "expected clafer name, found indented block"));
                    }
                    levels.push(Vec::new());
                }
                BodyItem::BlockClose(span) => {
                    if levels.len() < 2 {
                        return Err(self.syntax(&span, "unexpected end of indented block"));
                    }
                    let children = levels.pop().unwrap_or_default();
                    if let Some(parent) = levels.last_mut().and_then(|level| level.last_mut()) {
                        parent.children = children;
                    }
                }
            }
        }

        if levels.len() > 1 {
            return Err(self.syntax(footer, "expected end of indented block, found `---`"));
        }
        Ok(levels.pop().unwrap_or_default())
    }

    fn clafer_line(&self, line: ClaferLineWithSpans) -> Result<Element, ParseError> {
        let mut element = Element::new(self.text(&line.name));

        if let Some(span) = &line.index {
            element.index = Some(self.number(span)?);
        }
        if let Some(span) = &line.supertype {
            element.supertype = Some(self.text(span).to_string());
        }
        if let Some((type_span, value_span)) = &line.reference {
            let value_type = ValueType::from(self.text(type_span));
            let value = self.value(&value_type, value_span)?;
            element = element.with_value(value_type, value);
        }

        Ok(element)
    }

    fn value(&self, value_type: &ValueType, span: &Range<usize>) -> Result<Value, ParseError> {
        let lexeme = self.text(span);
        if !value_type.is_int() {
            return Ok(Value::Text(lexeme.to_string()));
        }

        lexeme.parse::<i64>().map(Value::Int).map_err(|err| {
            let lexeme = lexeme.to_string();
            let problem = match err.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    SemanticProblem::NumberOutOfRange { lexeme }
                }
                _ => SemanticProblem::InvalidInt { lexeme },
            };
            self.semantic(span, problem)
        })
    }
}
