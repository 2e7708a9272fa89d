//! Parsers that match a single input unit, and their predicates.

use crate::combinator::Kind;
use crate::Parser;

/// A predicate over a single input unit.
///
/// Predicates are plain data, never closures: they compare structurally,
/// and negating a negation yields the original predicate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum CharClass {
    Any,
    Is(char),
    Range(char, char),
    Digit,
    Letter,
    Lowercase,
    Uppercase,
    Word,
    Whitespace,
    AnyOf(Vec<CharClass>),
    Not(Box<CharClass>),
}

impl CharClass {
    pub(crate) fn test(&self, unit: char) -> bool {
        match self {
            CharClass::Any => true,
            CharClass::Is(c) => unit == *c,
            CharClass::Range(start, stop) => (*start..=*stop).contains(&unit),
            CharClass::Digit => unit.is_ascii_digit(),
            CharClass::Letter => unit.is_ascii_alphabetic(),
            CharClass::Lowercase => unit.is_ascii_lowercase(),
            CharClass::Uppercase => unit.is_ascii_uppercase(),
            CharClass::Word => unit.is_ascii_alphanumeric() || unit == '_',
            CharClass::Whitespace => matches!(unit, '\t' | '\n' | '\x0C' | '\r' | ' '),
            CharClass::AnyOf(classes) => classes.iter().any(|class| class.test(unit)),
            CharClass::Not(inner) => !inner.test(unit),
        }
    }

    pub(crate) fn negate(self) -> CharClass {
        match self {
            CharClass::Not(inner) => *inner,
            class => CharClass::Not(Box::new(class)),
        }
    }
}

pub(crate) fn char_class(class: CharClass, message: impl Into<String>) -> Parser {
    Parser::of(
        Kind::Char {
            class,
            message: message.into(),
        },
        Vec::new(),
    )
}

/// A type that can serve as the character argument of a builder: a
/// `char`, a numeric code, or a single-character string.
///
/// Anything else is a programmer error and panics at construction time.
pub trait IntoChar {
    /// Convert into a single input unit.
    fn into_char(self) -> char;
}

impl IntoChar for char {
    fn into_char(self) -> char {
        self
    }
}

impl IntoChar for u32 {
    fn into_char(self) -> char {
        char::from_u32(self).unwrap_or_else(|| panic!("invalid character code {}", self))
    }
}

impl IntoChar for &str {
    fn into_char(self) -> char {
        let mut units = self.chars();
        match (units.next(), units.next()) {
            (Some(unit), None) => unit,
            _ => panic!("expected a single-character string, found {:?}", self),
        }
    }
}

impl IntoChar for String {
    fn into_char(self) -> char {
        self.as_str().into_char()
    }
}

/// A parser that accepts any single input unit (but not the end of
/// input).
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// assert_eq!(any().parse("a").value(), Some(&Value::Char('a')));
/// assert!(any().parse("").is_failure());
/// ```
pub fn any() -> Parser {
    char_class(CharClass::Any, "input expected")
}

/// A parser that accepts only the given unit.
///
/// The argument may be a `char`, a numeric code, or a single-character
/// string; anything else panics at construction time.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let question = char('?');
///
/// assert!(question.accept("?"));
/// assert!(!question.accept("!"));
/// // Parsers do not eagerly consume input, so the trailing '!' is left alone
/// assert!(question.accept("?!"));
/// // ...unless the parser requires an end to the input after the '?'
/// assert!(!question.end().accept("?!"));
/// ```
pub fn char(unit: impl IntoChar) -> Parser {
    let unit = unit.into_char();
    char_class(CharClass::Is(unit), format!("'{}' expected", unit))
}

/// A parser that accepts any unit between `start` and `stop`, both
/// inclusive.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let hex = range('a', 'f');
///
/// assert!(hex.accept("c"));
/// assert!(!hex.accept("g"));
/// ```
pub fn range(start: impl IntoChar, stop: impl IntoChar) -> Parser {
    let (start, stop) = (start.into_char(), stop.into_char());
    assert!(
        start <= stop,
        "character range out of order: {:?} > {:?}",
        start,
        stop
    );
    char_class(
        CharClass::Range(start, stop),
        format!("{}-{} expected", start, stop),
    )
}

/// A parser that accepts a decimal digit.
pub fn digit() -> Parser {
    char_class(CharClass::Digit, "digit expected")
}

/// A parser that accepts an ASCII letter.
pub fn letter() -> Parser {
    char_class(CharClass::Letter, "letter expected")
}

/// A parser that accepts a lowercase ASCII letter.
pub fn lowercase() -> Parser {
    char_class(CharClass::Lowercase, "lowercase letter expected")
}

/// A parser that accepts an uppercase ASCII letter.
pub fn uppercase() -> Parser {
    char_class(CharClass::Uppercase, "uppercase letter expected")
}

/// A parser that accepts a letter, a digit, or an underscore.
pub fn word() -> Parser {
    char_class(CharClass::Word, "letter or digit expected")
}

/// A parser that accepts a single whitespace unit: tab, newline, form
/// feed, carriage return, or space.
pub fn whitespace() -> Parser {
    char_class(CharClass::Whitespace, "whitespace expected")
}

/// A parser that accepts any one of the given units.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let sign = one_of("+-");
///
/// assert!(sign.accept("+"));
/// assert!(sign.accept("-"));
/// assert!(!sign.accept("*"));
/// ```
pub fn one_of(units: &str) -> Parser {
    char_class(
        CharClass::AnyOf(units.chars().map(CharClass::Is).collect()),
        format!("any of '{}' expected", units),
    )
}

/// A parser that accepts any unit *not* among the given units.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let unquoted = none_of("\"'");
///
/// assert!(unquoted.accept("a"));
/// assert!(!unquoted.accept("'"));
/// ```
pub fn none_of(units: &str) -> Parser {
    char_class(
        CharClass::AnyOf(units.chars().map(CharClass::Is).collect()).negate(),
        format!("none of '{}' expected", units),
    )
}

/// A parser that always succeeds without consuming input, producing
/// [`Value::Nil`](crate::value::Value::Nil).
pub fn epsilon() -> Parser {
    Parser::of(Kind::Epsilon, Vec::new())
}

/// A parser that always fails with the given message, consuming
/// nothing.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let result = failure("nope").parse("anything");
/// assert_eq!(result.message(), Some("nope"));
/// ```
pub fn failure(message: impl Into<String>) -> Parser {
    Parser::of(
        Kind::Fail {
            message: message.into(),
        },
        Vec::new(),
    )
}

/// A parser that accepts only the given literal, producing it as a
/// [`Value::String`](crate::value::Value::String).
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let hello = string("hello");
///
/// assert!(hello.accept("hello"));
/// assert!(hello.accept("hello, world"));
/// assert!(!hello.accept("goodbye"));
/// ```
pub fn string(literal: &str) -> Parser {
    Parser::of(
        Kind::Str {
            literal: literal.to_string(),
            message: format!("'{}' expected", literal),
        },
        Vec::new(),
    )
}
