use parsnip::prelude::*;
use test_case::test_case;

#[test]
fn letter_runs_flatten_to_words() {
    let word = pattern("a-zA-Z").plus().flatten();

    assert_eq!(
        word.parse("Hello").value(),
        Some(&Value::String("Hello".into()))
    );
}

#[test]
fn negated_classes_stop_at_the_excluded_set() {
    let word = pattern("^0-9").plus().flatten();
    let found: Vec<_> = word.matches("abc123").collect();

    assert_eq!(found, vec![(Value::String("abc".into()), 0, 3)]);
}

#[test_case("a", true ; "lower bound of the first range")]
#[test_case("z", true ; "upper bound of the first range")]
#[test_case("Q", true ; "inside the second range")]
#[test_case("7", true ; "inside the third range")]
#[test_case("_", true ; "the literal underscore")]
#[test_case("-", false ; "a unit outside every item")]
#[test_case("", false ; "the empty input")]
fn identifier_units(input: &str, expected: bool) {
    assert_eq!(pattern("a-zA-Z0-9_").accept(input), expected);
}

#[test]
fn negated_and_plain_classes_are_complementary() {
    let plain = pattern("a-z");
    let negated = pattern("^a-z");

    for input in ["a", "m", "z", "A", "5", "_", " "] {
        assert_eq!(plain.accept(input), !negated.accept(input));
    }
    // Negation still consumes a unit, so it fails at the end of input.
    assert!(!negated.accept(""));
}

#[test]
fn patterns_fail_with_a_bracketed_message() {
    let result = pattern("0-9").parse("x");

    assert!(result.is_failure());
    assert_eq!(result.message(), Some("[0-9] expected"));
}

#[test]
fn compiled_patterns_are_single_character_parsers() {
    let class = pattern("a-z");

    assert!(class.children().is_empty());
    assert_eq!(class.parse("abc").position(), 1);
    assert!(class.is_equal_to(&pattern("a-z")));
    assert!(!class.is_equal_to(&pattern("a-y")));
}

#[test]
fn mixed_patterns_combine_singles_and_ranges() {
    let hex = pattern("0-9a-fA-Fx");

    for input in ["0", "9", "a", "f", "A", "F", "x"] {
        assert!(hex.accept(input));
    }
    for input in ["g", "X", "-"] {
        assert!(!hex.accept(input));
    }
}
