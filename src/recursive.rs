//! Forward references for recursive grammars.

use std::cell::Cell;
use std::ops::Deref;
use std::rc::Rc;

use crate::combinator::Kind;
use crate::primitive::failure;
use crate::Parser;

/// A forward-declared parser whose definition is supplied later,
/// closing the cycle of a recursive grammar.
///
/// Until [`Recursive::define`] is called, the parser fails every input
/// with `"undefined parser"`. The definition may be assigned exactly
/// once; a second assignment panics.
///
/// A `Recursive` dereferences to [`Parser`], so the whole combinator
/// surface is available on it directly.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// // E := digit | '(' E ')'
/// let expr = Recursive::declare();
/// expr.define(
///     &digit()
///         .flatten()
///         .or(&char('(').seq(&expr).seq(&char(')')).pick(1)),
/// );
///
/// assert_eq!(expr.parse("((3))").value(), Some(&Value::String("3".into())));
/// ```
#[derive(Clone)]
pub struct Recursive {
    parser: Parser,
    defined: Rc<Cell<bool>>,
}

impl Recursive {
    /// Declare a parser whose definition will be supplied later.
    pub fn declare() -> Self {
        Recursive {
            parser: Parser::of(Kind::Delegate, vec![failure("undefined parser")]),
            defined: Rc::new(Cell::new(false)),
        }
    }

    /// Assign the definition, redirecting every use of the declaration
    /// to `parser`. Panics if a definition was already assigned.
    pub fn define(&self, parser: &Parser) {
        assert!(
            !self.defined.replace(true),
            "recursive parser already defined"
        );
        let placeholder = self
            .parser
            .children()
            .pop()
            .expect("a delegate must have a child");
        self.parser.replace(&placeholder, parser);
    }

    /// The underlying parser handle.
    pub fn parser(&self) -> Parser {
        self.parser.clone()
    }
}

impl Deref for Recursive {
    type Target = Parser;

    fn deref(&self) -> &Parser {
        &self.parser
    }
}

/// Construct a recursive parser (i.e: a parser that may contain itself
/// as part of its pattern) in one step.
///
/// The closure receives the declaration and must return the definition.
/// The declaration must not be used to parse input before this function
/// returns.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let nested = recursive(|inner| {
///     char('(').seq(&inner.optional()).seq(&char(')')).flatten()
/// });
///
/// assert!(nested.end().accept("((()))"));
/// assert!(!nested.end().accept("(()"));
/// ```
pub fn recursive<F: FnOnce(Parser) -> Parser>(f: F) -> Parser {
    let declaration = Recursive::declare();
    let definition = f(declaration.parser());
    declaration.define(&definition);
    declaration.parser()
}
