//! Checks for trees that did not come out of the parser
//!
//! The rebuilt text must parse back into the same tree, so every field has to
//! be something the grammar could have produced.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::choco::ast::{Document, Element, Instance, Value, ValueType};
use crate::choco::error::ValidationError;
use crate::choco::lexer::MAX_NESTING_DEPTH;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern"));

/// Lexemes the grammar accepts after `=`: a name, an integer with optional
/// sign, or a double-quoted string
static VALUE_LEXEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(?:[A-Za-z_][A-Za-z0-9_]*|[+-]?[0-9]+|"(?:[^"\\\n]|\\.)*")$"#)
        .expect("value lexeme pattern")
});

pub fn is_identifier(text: &str) -> bool {
    IDENTIFIER.is_match(text)
}

pub fn is_value_lexeme(text: &str) -> bool {
    VALUE_LEXEME.is_match(text)
}

pub fn validate_document(doc: &Document) -> Result<(), ValidationError> {
    doc.iter().try_for_each(validate_instance)
}

pub fn validate_instance(instance: &Instance) -> Result<(), ValidationError> {
    let root = format!("instance {}", instance.id);
    if instance.elements.is_empty() {
        return Err(ValidationError::new(
            root,
            "elements",
            "an instance needs at least one element",
        ));
    }

    // Depth-first, in document order, without recursion
    let mut pending: Vec<(&Element, String, usize)> = instance
        .elements
        .iter()
        .rev()
        .map(|element| (element, root.clone(), 0))
        .collect();

    while let Some((element, parent, depth)) = pending.pop() {
        let path = format!("{} > {}", parent, element.label());
        validate_line(element, &path)?;

        if !element.children.is_empty() && depth >= MAX_NESTING_DEPTH {
            return Err(ValidationError::new(
                path,
                "children",
                format!("nesting deeper than {} levels", MAX_NESTING_DEPTH),
            ));
        }
        pending.extend(
            element
                .children
                .iter()
                .rev()
                .map(|child| (child, path.clone(), depth + 1)),
        );
    }
    Ok(())
}

/// Type words the grammar reads as built-in types
fn is_reserved_type(name: &str) -> bool {
    matches!(name, "int" | "real" | "double" | "string")
}

fn validate_line(element: &Element, path: &str) -> Result<(), ValidationError> {
    let fail = |field, message: String| Err(ValidationError::new(path, field, message));

    if !is_identifier(&element.name) {
        return fail("name", format!("`{}` is not an identifier", element.name));
    }
    if let Some(supertype) = &element.supertype {
        if !is_identifier(supertype) {
            return fail("supertype", format!("`{}` is not an identifier", supertype));
        }
    }
    if let Some(ValueType::Named(name)) = &element.value_type {
        if !is_identifier(name) {
            return fail("value_type", format!("`{}` is not an identifier", name));
        }
        if is_reserved_type(name) {
            return fail(
                "value_type",
                format!("`{}` is a built-in type and cannot be a named type", name),
            );
        }
    }

    match (&element.value_type, &element.value) {
        (None, None) => Ok(()),
        (Some(_), None) => fail("value", "a typed element needs a value".to_string()),
        (None, Some(_)) => fail("value_type", "a value needs a type tag".to_string()),
        (Some(ValueType::Int), Some(Value::Int(_))) => Ok(()),
        (Some(ValueType::Int), Some(Value::Text(text))) => {
            fail("value", format!("`{}` is typed `int` but is not an integer", text))
        }
        (Some(value_type), Some(Value::Int(n))) => fail(
            "value",
            format!("integer {} is only allowed with type `int`, not `{}`", n, value_type),
        ),
        (Some(_), Some(Value::Text(text))) => {
            if is_value_lexeme(text) {
                Ok(())
            } else {
                fail("value", format!("`{}` is not a valid value lexeme", text))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(element: Element) -> Result<(), ValidationError> {
        validate_instance(&Instance::new(1, vec![element]))
    }

    #[test]
    fn test_parser_shaped_trees_pass() {
        let element = Element::new("Bar")
            .with_index(0)
            .with_supertype("Base")
            .with_value(ValueType::Int, Value::Int(-3))
            .with_children(vec![
                Element::new("S").with_value(ValueType::String, Value::from("\"x \\\" y\"")),
                Element::new("R").with_value(ValueType::Real, Value::from("+2")),
                Element::new("E").with_value(ValueType::Named("Color".into()), Value::from("Red")),
            ]);
        assert_eq!(check(element), Ok(()));
    }

    #[test]
    fn test_non_numeric_int_value_is_named() {
        let err = check(Element::new("Foo").with_value(ValueType::Int, Value::from("abc")))
            .unwrap_err();
        assert_eq!(err.field, "value");
        assert_eq!(err.path, "instance 1 > Foo");
    }

    #[test]
    fn test_integer_with_non_int_type_is_rejected() {
        let err = check(Element::new("Foo").with_value(ValueType::Double, Value::Int(1)))
            .unwrap_err();
        assert_eq!(err.field, "value");
    }

    #[test]
    fn test_type_and_value_travel_together() {
        let mut element = Element::new("Foo");
        element.value_type = Some(ValueType::Int);
        assert_eq!(check(element).unwrap_err().field, "value");

        let mut element = Element::new("Foo");
        element.value = Some(Value::Int(1));
        assert_eq!(check(element).unwrap_err().field, "value_type");
    }

    #[test]
    fn test_bad_identifiers() {
        assert_eq!(check(Element::new("")).unwrap_err().field, "name");
        assert_eq!(check(Element::new("9lives")).unwrap_err().field, "name");
        assert_eq!(
            check(Element::new("Foo").with_supertype("a b")).unwrap_err().field,
            "supertype"
        );
        let err = check(
            Element::new("Foo").with_value(ValueType::Named("no-dash".into()), Value::from("x")),
        )
        .unwrap_err();
        assert_eq!(err.field, "value_type");
    }

    #[test]
    fn test_unquoted_text_with_spaces_is_rejected() {
        let err = check(Element::new("Foo").with_value(ValueType::String, Value::from("a b")))
            .unwrap_err();
        assert_eq!(err.field, "value");
    }

    #[test]
    fn test_nested_path() {
        let element = Element::new("A")
            .with_index(2)
            .with_children(vec![Element::new("B").with_supertype("1x")]);
        let err = check(element).unwrap_err();
        assert_eq!(err.path, "instance 1 > A$2 > B");
    }

    #[test]
    fn test_empty_instance_is_rejected() {
        let err = validate_instance(&Instance::new(4, vec![])).unwrap_err();
        assert_eq!(err.field, "elements");
    }

    #[test]
    fn test_reserved_word_as_named_type_is_rejected() {
        for word in ["int", "real", "double", "string"] {
            let err = check(
                Element::new("Foo").with_value(ValueType::Named(word.into()), Value::from("Red")),
            )
            .unwrap_err();
            assert_eq!(err.field, "value_type", "{}", word);
        }
    }

    #[test]
    fn test_nesting_limit() {
        fn chain(depth: usize) -> Element {
            let mut element = Element::new(format!("N{}", depth));
            for level in (0..depth).rev() {
                element = Element::new(format!("N{}", level)).with_children(vec![element]);
            }
            element
        }

        assert_eq!(check(chain(MAX_NESTING_DEPTH)), Ok(()));

        let err = check(chain(MAX_NESTING_DEPTH + 1)).unwrap_err();
        assert_eq!(err.field, "children");
        assert!(
            err.path.ends_with(&format!("> N{}", MAX_NESTING_DEPTH)),
            "{}",
            err.path
        );
    }
}
