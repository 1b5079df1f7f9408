//! Grammar for instance dumps, using chumsky
//!
//! ```text
//! document    := instance*
//! instance    := "===" "Instance" INT "Begin" "===" ⏎ body "---" "Instance" INT "End" "---" ⏎
//! body        := ( clafer_line | BLOCK-OPEN | BLOCK-CLOSE )+
//! element     := clafer_line [ BLOCK-OPEN element+ BLOCK-CLOSE ]    (tree builder)
//! clafer_line := NAME [ "$" INT ] [ ":" NAME ] [ "->" TYPE "=" VALUE ] ⏎
//! TYPE        := NAME
//! VALUE       := NAME | INT | SIGNED_INT | STRING
//! ```
//!
//! Each optional suffix starts with its own terminal, so one token of
//! lookahead decides every branch. The grammar captures both instance numbers
//! but does not compare them, and it reads an instance body as a flat run of
//! lines and block markers. Folding that run into `element`s, and checking
//! that it has that shape, is the tree builder's job.

use chumsky::prelude::*;
use std::ops::Range;

use super::intermediate_ast::{
    BodyItem, ClaferLineWithSpans, DocumentWithSpans, InstanceWithSpans,
};
use crate::choco::lexer::{Token, TokenSpan};

/// Type alias for parser error
pub type ParserError = Simple<TokenSpan>;

/// Helper: match a specific token type, keeping its span
fn token(t: Token) -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| tok == &t).map(|(_, span)| span)
}

/// A name with fixed text, such as `Instance` or `Begin`
fn keyword(word: &'static str) -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(move |(tok, _): &TokenSpan| matches!(tok, Token::Name(text) if text == word))
        .map(|(_, span)| span)
        .labelled(word)
}

fn name() -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(|(t, _): &TokenSpan| matches!(t, Token::Name(_))).map(|(_, span)| span)
}

fn int() -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(|(t, _): &TokenSpan| matches!(t, Token::Int(_))).map(|(_, span)| span)
}

fn value() -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    filter(|(t, _): &TokenSpan| t.is_value()).map(|(_, span)| span)
}

fn end_of_line() -> impl Parser<TokenSpan, Range<usize>, Error = ParserError> + Clone {
    token(Token::Newline).labelled("end of line")
}

/// Parse one clafer line: a name followed by its optional suffixes
pub(crate) fn clafer_line(
) -> impl Parser<TokenSpan, ClaferLineWithSpans, Error = ParserError> + Clone {
    let index = token(Token::Dollar).ignore_then(int().labelled("index"));
    let supertype = token(Token::Colon).ignore_then(name().labelled("supertype name"));
    let reference = token(Token::Arrow)
        .ignore_then(name().labelled("type name"))
        .then_ignore(token(Token::Equals).labelled("`=`"))
        .then(value().labelled("value"));

    name()
        .labelled("clafer name")
        .then(index.or_not())
        .then(supertype.or_not())
        .then(reference.or_not())
        .then_ignore(end_of_line())
        .map(
            |(((name, index), supertype), reference)| ClaferLineWithSpans {
                name,
                index,
                supertype,
                reference,
            },
        )
}

/// Parse one item of an instance body: a clafer line or a block marker
///
/// Blocks are not matched here. Pairing opens with closes happens in the tree
/// builder, which keeps nesting depth off the call stack.
pub(crate) fn body_item() -> impl Parser<TokenSpan, BodyItem, Error = ParserError> + Clone {
    choice((
        token(Token::BlockOpen).map(BodyItem::BlockOpen),
        token(Token::BlockClose).map(BodyItem::BlockClose),
        clafer_line().map(BodyItem::Line),
    ))
}

/// Parse one instance, from its begin marker through its end marker
pub(crate) fn instance() -> impl Parser<TokenSpan, InstanceWithSpans, Error = ParserError> + Clone {
    let begin = token(Token::HeaderRule)
        .then_ignore(keyword("Instance"))
        .then(int().labelled("instance number"))
        .then_ignore(keyword("Begin"))
        .then_ignore(token(Token::HeaderRule).labelled("`===`"))
        .then_ignore(end_of_line());

    let end = token(Token::FooterRule)
        .labelled("`---`")
        .then_ignore(keyword("Instance"))
        .then(int().labelled("instance number"))
        .then_ignore(keyword("End"))
        .then_ignore(token(Token::FooterRule).labelled("`---`"))
        .then_ignore(end_of_line());

    begin
        .then(body_item().repeated().at_least(1))
        .then(end)
        .map(
            |(((header, begin_id), body), (footer, end_id))| InstanceWithSpans {
                header,
                begin_id,
                body,
                footer,
                end_id,
            },
        )
}

/// Parse a whole dump: any number of instances and nothing else
pub fn document() -> impl Parser<TokenSpan, DocumentWithSpans, Error = ParserError> {
    instance()
        .labelled("instance")
        .repeated()
        .then_ignore(end())
        .map(|instances| DocumentWithSpans { instances })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choco::lexer::lex;

    fn text<'a>(source: &'a str, span: &Range<usize>) -> &'a str {
        &source[span.clone()]
    }

    #[test]
    fn test_clafer_line_suffixes_are_independent() {
        let cases = [
            ("Foo \n", None, None, None),
            ("Foo$0 \n", Some("0"), None, None),
            ("Foo : Base \n", None, Some("Base"), None),
            ("Foo -> real = 1 \n", None, None, Some(("real", "1"))),
            (
                "Foo$2 : Base -> Color = Red \n",
                Some("2"),
                Some("Base"),
                Some(("Color", "Red")),
            ),
        ];

        for (source, index, supertype, reference) in cases {
            let line = clafer_line()
                .then_ignore(end())
                .parse(lex(source).unwrap())
                .unwrap_or_else(|e| panic!("{:?}: {:?}", source, e));
            assert_eq!(text(source, &line.name), "Foo");
            assert_eq!(line.index.as_ref().map(|s| text(source, s)), index);
            assert_eq!(line.supertype.as_ref().map(|s| text(source, s)), supertype);
            assert_eq!(
                line.reference
                    .as_ref()
                    .map(|(t, v)| (text(source, t), text(source, v))),
                reference
            );
        }
    }

    #[test]
    fn test_suffixes_out_of_order_are_rejected() {
        let tokens = lex("Foo : Base$1 \n").unwrap();
        assert!(clafer_line().then_ignore(end()).parse(tokens).is_err());
    }

    #[test]
    fn test_type_without_value_is_rejected() {
        let tokens = lex("Foo -> int \n").unwrap();
        assert!(clafer_line().then_ignore(end()).parse(tokens).is_err());
    }

    #[test]
    fn test_body_is_a_flat_run_of_lines_and_markers() {
        let source = "=== Instance 1 Begin ===\nA \n  B \n    C \n  D \n--- Instance 1 End ---\n";
        let instance = instance()
            .then_ignore(end())
            .parse(lex(source).unwrap())
            .unwrap();
        let shape: Vec<String> = instance
            .body
            .iter()
            .map(|item| match item {
                BodyItem::Line(line) => text(source, &line.name).to_string(),
                BodyItem::BlockOpen(_) => "{".to_string(),
                BodyItem::BlockClose(_) => "}".to_string(),
            })
            .collect();
        assert_eq!(shape, vec!["A", "{", "B", "{", "C", "}", "D", "}"]);
    }

    #[test]
    fn test_instance_captures_both_numbers() {
        let source = "=== Instance 3 Begin ===\n\nA \n\n--- Instance 4 End ---\n";
        let instance = instance()
            .then_ignore(end())
            .parse(lex(source).unwrap())
            .unwrap();
        assert_eq!(text(source, &instance.begin_id), "3");
        assert_eq!(text(source, &instance.end_id), "4");
        assert_eq!(instance.header, 0..3);
        assert_eq!(text(source, &instance.footer), "---");
    }

    #[test]
    fn test_empty_document() {
        let doc = document().parse(lex("\n\n").unwrap()).unwrap();
        assert!(doc.instances.is_empty());
    }

    #[test]
    fn test_instance_without_elements_is_rejected() {
        let source = "=== Instance 1 Begin ===\n\n--- Instance 1 End ---\n";
        assert!(document().parse(lex(source).unwrap()).is_err());
    }

    #[test]
    fn test_keywords_are_valid_clafer_names() {
        let source = "=== Instance 1 Begin ===\nEnd \n  Instance \n--- Instance 1 End ---\n";
        let doc = document().parse(lex(source).unwrap()).unwrap();
        let names: Vec<&str> = doc.instances[0]
            .body
            .iter()
            .filter_map(|item| match item {
                BodyItem::Line(line) => Some(text(source, &line.name)),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["End", "Instance"]);
    }
}
