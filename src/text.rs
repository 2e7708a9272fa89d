//! Small text-specific conveniences built from the primitives.

use crate::pattern::pattern;
use crate::primitive::{digit, word};
use crate::Parser;

/// A parser that accepts a C-style identifier and produces it as a
/// string.
///
/// An identifier is a letter or underscore followed by any number of
/// letters, digits, or underscores. The pattern for it is
/// `[a-zA-Z_][a-zA-Z0-9_]*`.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// assert_eq!(ident().parse("x_1").value(), Some(&Value::String("x_1".into())));
/// assert!(!ident().accept("1x"));
/// ```
pub fn ident() -> Parser {
    pattern("a-zA-Z_").seq(&word().star()).flatten()
}

/// A parser that accepts one or more decimal digits and produces them
/// as a string.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// assert_eq!(digits().parse("007").value(), Some(&Value::String("007".into())));
/// assert!(!digits().accept(""));
/// ```
pub fn digits() -> Parser {
    digit().plus().flatten()
}
