//! A small JSON-value grammar assembled from the public surface, in the
//! spirit of every combinator crate's obligatory JSON example.

use indoc::indoc;
use parsnip::prelude::*;

fn json() -> Parser {
    recursive(|value| {
        let number = char('-')
            .optional()
            .seq(&digit().plus())
            .seq(&char('.').seq(&digit().plus()).optional())
            .flatten()
            .map(|text| Value::Number(text.as_str().unwrap().parse().unwrap()))
            .trim();

        let quoted = char('"')
            .seq(&none_of("\"").star().flatten())
            .seq(&char('"'))
            .pick(1)
            .trim();

        let literal = string("null")
            .map(|_| Value::Nil)
            .or(&string("true").map(|_| Value::Bool(true)))
            .or(&string("false").map(|_| Value::Bool(false)))
            .trim();

        let elements = value
            .separated_by(&char(','))
            .optional_with(Value::List(vec![]));
        let array = char('[')
            .trim()
            .seq(&elements)
            .seq(&char(']').trim())
            .pick(1);

        literal.or(&number).or(&quoted).or(&array)
    })
}

#[test]
fn arrays_of_numbers_parse() {
    let result = json().end().parse("[1, 2, 3]");

    assert!(result.is_success());
    assert_eq!(
        result.value(),
        Some(&Value::List(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ]))
    );
}

#[test]
fn missing_separators_fail() {
    assert!(json().end().parse("[1 2]").is_failure());
}

#[test]
fn empty_arrays_parse() {
    assert_eq!(
        json().end().parse("[ ]").value(),
        Some(&Value::List(vec![]))
    );
}

#[test]
fn literals_and_strings_parse() {
    assert_eq!(json().end().parse("null").value(), Some(&Value::Nil));
    assert_eq!(
        json().end().parse("true").value(),
        Some(&Value::Bool(true))
    );
    assert_eq!(
        json().end().parse("\"hi\"").value(),
        Some(&Value::String("hi".into()))
    );
}

#[test]
fn nested_values_parse() {
    let source = indoc! {r#"
        [true, [1.5, -2], "hello", null]
    "#};

    let result = json().end().parse(source);
    assert!(result.is_success());
    assert_eq!(
        result.value(),
        Some(&Value::List(vec![
            Value::Bool(true),
            Value::List(vec![Value::Number(1.5), Value::Number(-2.0)]),
            Value::String("hello".into()),
            Value::Nil,
        ]))
    );
}

#[test]
fn malformed_inputs_fail() {
    for source in ["[1,", "[1, 2", "tru", "[,]", "1.", "--1"] {
        assert!(json().end().parse(source).is_failure(), "{:?}", source);
    }
}
