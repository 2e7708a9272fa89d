//! A regex-like character-class language, compiled with the library's
//! own combinators.

use once_cell::unsync::Lazy;

use crate::primitive::{any, char, char_class, CharClass};
use crate::result::ParseResult;
use crate::value::Value;
use crate::Parser;

thread_local! {
    static GRAMMAR: Lazy<Parser> = Lazy::new(class_grammar);
}

/// A parser that accepts a single unit matching the given
/// character-class pattern.
///
/// The pattern language is the familiar one from regular-expression
/// character sets: a sequence of single units and `a-z` style ranges,
/// optionally negated by a leading `^`. The pattern is compiled into a
/// single character parser whose failure message is
/// `"[pattern] expected"`.
///
/// An empty or malformed pattern is a programmer error and panics at
/// construction time.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let identifier = pattern("a-zA-Z_").seq(&pattern("a-zA-Z0-9_").star());
///
/// assert!(identifier.accept("snake_case"));
/// assert!(!identifier.accept("2fast"));
///
/// let not_a_digit = pattern("^0-9");
/// assert!(not_a_digit.accept("x"));
/// assert!(!not_a_digit.accept("7"));
/// ```
pub fn pattern(source: &str) -> Parser {
    let result = GRAMMAR.with(|grammar| grammar.parse(source));
    let value = match result {
        ParseResult::Success { value, .. } => value,
        ParseResult::Failure { message, .. } => {
            panic!("illegal character pattern {:?}: {}", source, message)
        }
    };
    char_class(compile(value), format!("[{}] expected", source))
}

/// The mini-grammar itself: `pattern := '^'? item+` where
/// `item := any '-' any | any`. Compiled once and reused.
fn class_grammar() -> Parser {
    let single = any();
    let range = any().seq(&char('-')).seq(&any());
    let item = range.or(&single);
    char('^')
        .optional()
        .seq(&item.plus())
        .end_with("illegal character pattern")
}

fn compile(value: Value) -> CharClass {
    let Value::List(mut parts) = value else {
        unreachable!("the pattern grammar produces a sequence")
    };
    let items = parts.pop().expect("the pattern grammar produces two parts");
    let negation = parts.pop().expect("the pattern grammar produces two parts");

    let Value::List(items) = items else {
        unreachable!("pattern items are a repetition")
    };
    let mut classes: Vec<CharClass> = items.into_iter().map(item_class).collect();
    let class = if classes.len() == 1 {
        classes.remove(0)
    } else {
        CharClass::AnyOf(classes)
    };
    if negation.is_nil() {
        class
    } else {
        class.negate()
    }
}

fn item_class(item: Value) -> CharClass {
    match item {
        Value::Char(unit) => CharClass::Is(unit),
        Value::List(pair) => match (pair.first(), pair.last()) {
            (Some(Value::Char(start)), Some(Value::Char(stop))) => {
                CharClass::Range(*start, *stop)
            }
            _ => unreachable!("a range item holds its bounds"),
        },
        _ => unreachable!("pattern items are units or ranges"),
    }
}
