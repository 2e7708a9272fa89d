//! The outcome of a recognition attempt.

use std::fmt;

use crate::input::Buffer;
use crate::value::Value;

/// The result of running a parser against an input.
///
/// Failures are ordinary values, never panics: combinators recover from
/// them where their semantics allow (ordered choice, optionality,
/// negative lookahead) and propagate them otherwise. A failure's
/// position is the position at which the mismatch was detected, which
/// callers typically surface in error messages.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseResult {
    /// The parser matched, producing `value` and leaving the input at
    /// `position`.
    Success {
        /// The input the parser ran against.
        buffer: Buffer,
        /// The position directly after the matched input.
        position: usize,
        /// The semantic value produced by the parser.
        value: Value,
    },
    /// The parser did not match.
    Failure {
        /// The input the parser ran against.
        buffer: Buffer,
        /// The position at which the mismatch was detected.
        position: usize,
        /// A human-readable description of what was expected.
        message: String,
    },
}

impl ParseResult {
    /// Whether this result is a success.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// assert!(char('a').parse("a").is_success());
    /// assert!(!char('a').parse("b").is_success());
    /// ```
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    /// Whether this result is a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, ParseResult::Failure { .. })
    }

    /// The input the parser ran against.
    pub fn buffer(&self) -> &Buffer {
        match self {
            ParseResult::Success { buffer, .. } => buffer,
            ParseResult::Failure { buffer, .. } => buffer,
        }
    }

    /// The position after the match, or the position of the mismatch.
    pub fn position(&self) -> usize {
        match self {
            ParseResult::Success { position, .. } => *position,
            ParseResult::Failure { position, .. } => *position,
        }
    }

    /// The semantic value, if this result is a success.
    pub fn value(&self) -> Option<&Value> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure { .. } => None,
        }
    }

    /// Consume the result, yielding the value of a success.
    pub fn into_value(self) -> Option<Value> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure { .. } => None,
        }
    }

    /// The failure message, if this result is a failure.
    pub fn message(&self) -> Option<&str> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure { message, .. } => Some(message),
        }
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ParseResult::Success { position, value, .. } => {
                write!(f, "success at {}: {:?}", position, value)
            }
            ParseResult::Failure {
                position, message, ..
            } => {
                write!(f, "{} at {}", message, position)
            }
        }
    }
}
