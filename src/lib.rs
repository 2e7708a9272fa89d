#![doc = include_str!("../README.md")]
#![deny(missing_docs)]

pub mod graph;
pub mod input;
pub mod pattern;
pub mod primitive;
pub mod recursive;
pub mod result;
pub mod text;
pub mod value;

pub(crate) mod combinator;

pub use crate::result::ParseResult;
pub use crate::value::Value;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::combinator::{Action, Kind};
use crate::input::{Buffer, Context};
use crate::primitive::whitespace;

/// Commonly used functions and types.
///
/// *"Take care of the sense, and the sounds will take care of
/// themselves."*
pub mod prelude {
    pub use crate::input::{Buffer, Context};
    pub use crate::pattern::pattern;
    pub use crate::primitive::{
        any, char, digit, epsilon, failure, letter, lowercase, none_of, one_of, range, string,
        uppercase, whitespace, word,
    };
    pub use crate::recursive::{recursive, Recursive};
    pub use crate::result::ParseResult;
    pub use crate::text::{digits, ident};
    pub use crate::value::{Token, Value};
    pub use crate::{Matches, Parser};
}

pub(crate) struct Node {
    pub(crate) kind: Kind,
    pub(crate) children: Vec<Parser>,
}

/// A handle to a node in a parser graph.
///
/// Parsers form a directed, possibly cyclic graph: every node carries
/// its variant-specific configuration and an ordered list of child
/// parsers. Handles are cheap to clone and share the node, so parser
/// identity is handle identity, and the graph operations
/// ([`replace`](Parser::replace), [`deep_copy`](Parser::deep_copy),
/// [`is_equal_to`](Parser::is_equal_to)) are keyed on it.
///
/// Parsers are built from the primitives in [`primitive`] and
/// [`pattern`] and combined with the methods below; running one is a
/// pure function of the parser and the input. The graph may be mutated
/// between runs (via [`replace`](Parser::replace) or
/// [`Recursive::define`](crate::recursive::Recursive::define)), but
/// never during one.
///
/// # Examples
///
/// ```
/// use parsnip::prelude::*;
///
/// let number = digit().plus().flatten().trim();
/// let result = number.parse(" 42 ");
///
/// assert_eq!(result.value(), Some(&Value::String("42".into())));
/// ```
#[derive(Clone)]
pub struct Parser {
    pub(crate) node: Rc<RefCell<Node>>,
}

impl Parser {
    pub(crate) fn of(kind: Kind, children: Vec<Parser>) -> Parser {
        Parser {
            node: Rc::new(RefCell::new(Node { kind, children })),
        }
    }

    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.node) as usize
    }

    /// Run this parser against `input` from position 0, yielding a
    /// [`ParseResult`].
    ///
    /// A success need not consume the whole input; use
    /// [`end`](Parser::end) to require that it does.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let letters = letter().star().flatten();
    ///
    /// assert_eq!(letters.parse("abc").value(), Some(&Value::String("abc".into())));
    /// assert_eq!(letters.parse("ab1").position(), 2);
    /// ```
    pub fn parse(&self, input: &str) -> ParseResult {
        self.parse_on(&Context::new(Buffer::from(input), 0))
    }

    /// Whether this parser succeeds on `input` (not necessarily
    /// consuming all of it).
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// assert!(digit().accept("1 potato"));
    /// assert!(!digit().accept("potato"));
    /// ```
    pub fn accept(&self, input: &str) -> bool {
        self.parse(input).is_success()
    }

    /// Lazily scan `input` for every non-overlapping match of this
    /// parser, yielding each value with its `[start, end)` span.
    ///
    /// Scanning restarts directly after each match (or one position
    /// further for an empty match), and advances one position past
    /// each mismatch.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let number = digit().plus().flatten();
    /// let found: Vec<_> = number.matches("a12b345").collect();
    ///
    /// assert_eq!(found, vec![
    ///     (Value::String("12".into()), 1, 3),
    ///     (Value::String("345".into()), 4, 7),
    /// ]);
    /// ```
    pub fn matches(&self, input: &str) -> Matches {
        Matches {
            parser: self.clone(),
            buffer: Buffer::from(input),
            position: 0,
        }
    }

    /// Ordered concatenation: this parser followed by `other`; the
    /// value is the ordered list of both values.
    ///
    /// Called on a parser that is already a sequence, this returns a
    /// new sequence extended by `other` rather than nesting.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let ab = char('a').seq(&char('b'));
    ///
    /// assert_eq!(
    ///     ab.parse("ab").value(),
    ///     Some(&Value::List(vec![Value::Char('a'), Value::Char('b')]))
    /// );
    /// assert!(ab.parse("ba").is_failure());
    /// ```
    pub fn seq(&self, other: &Parser) -> Parser {
        let mut children = {
            let node = self.node.borrow();
            if matches!(node.kind, Kind::Sequence) {
                node.children.clone()
            } else {
                vec![self.clone()]
            }
        };
        children.push(other.clone());
        Parser::of(Kind::Sequence, children)
    }

    /// Ordered choice: this parser, or `other` if this one fails.
    ///
    /// Alternatives are tried in order against the same position; the
    /// first success wins and later alternatives are never consulted.
    /// When every alternative fails, the failure of the last one is
    /// returned. Called on a parser that is already a choice, this
    /// returns a new choice extended by `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let op = char('+').or(&char('-')).or(&char('*'));
    ///
    /// assert!(op.accept("+"));
    /// assert!(op.accept("*"));
    /// assert!(!op.accept("/"));
    /// ```
    pub fn or(&self, other: &Parser) -> Parser {
        let mut children = {
            let node = self.node.borrow();
            if matches!(node.kind, Kind::Choice) {
                node.children.clone()
            } else {
                vec![self.clone()]
            }
        };
        children.push(other.clone());
        Parser::of(Kind::Choice, children)
    }

    /// Greedy repetition, zero or more times; the value is the ordered
    /// list of matched values.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let letters = letter().star();
    ///
    /// assert_eq!(letters.parse("ab").position(), 2);
    /// assert_eq!(letters.parse("12").value(), Some(&Value::List(vec![])));
    /// ```
    pub fn star(&self) -> Parser {
        self.repeat(0, None)
    }

    /// Greedy repetition, one or more times.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let letters = letter().plus();
    ///
    /// assert!(letters.accept("a"));
    /// assert!(!letters.accept("1"));
    /// ```
    pub fn plus(&self) -> Parser {
        self.repeat(1, None)
    }

    /// Exactly `count` repetitions.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let triple = digit().times(3);
    ///
    /// assert!(triple.accept("123"));
    /// assert!(!triple.accept("12"));
    /// ```
    pub fn times(&self, count: usize) -> Parser {
        self.repeat(count, count)
    }

    /// Greedy repetition between `min` and `max` times; `None` means
    /// unbounded.
    ///
    /// The first `min` matches are required: a failure among them
    /// propagates. Matching then continues while the inner parser
    /// succeeds and fewer than `max` values have been collected.
    /// Bounds with `min > max` are a programmer error and panic at
    /// construction time.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let pair_or_triple = digit().repeat(2, 3);
    ///
    /// assert!(!pair_or_triple.accept("1"));
    /// assert_eq!(pair_or_triple.parse("1234").position(), 3);
    ///
    /// let at_least_one = digit().repeat(1, None);
    /// assert_eq!(at_least_one.parse("1234").position(), 4);
    /// ```
    pub fn repeat(&self, min: usize, max: impl Into<Option<usize>>) -> Parser {
        let max = max.into();
        if let Some(max) = max {
            assert!(
                min <= max,
                "repetition bounds out of order: {} > {}",
                min,
                max
            );
        }
        Parser::of(Kind::Repeat { min, max }, vec![self.clone()])
    }

    /// Try this parser; on failure, succeed anyway at the original
    /// position with [`Value::Nil`].
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let sign = one_of("+-").optional();
    ///
    /// assert_eq!(sign.parse("+1").value(), Some(&Value::Char('+')));
    /// assert_eq!(sign.parse("1").value(), Some(&Value::Nil));
    /// ```
    pub fn optional(&self) -> Parser {
        self.optional_with(Value::Nil)
    }

    /// As [`optional`](Parser::optional), but succeeding with
    /// `fallback` instead of nil.
    pub fn optional_with(&self, fallback: Value) -> Parser {
        Parser::of(Kind::Optional { fallback }, vec![self.clone()])
    }

    /// Positive lookahead: succeeds exactly when this parser succeeds,
    /// with its value, but never consumes input.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let ahead = string("let").and();
    /// let result = ahead.parse("letter");
    ///
    /// assert!(result.is_success());
    /// assert_eq!(result.position(), 0);
    /// ```
    pub fn and(&self) -> Parser {
        Parser::of(Kind::And, vec![self.clone()])
    }

    /// Negative lookahead: succeeds with [`Value::Nil`] when this
    /// parser fails, and fails with `message` when it succeeds. Never
    /// consumes input.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let guard = digit().not("no digit allowed");
    ///
    /// assert!(guard.accept("a"));
    /// assert!(guard.accept(""));
    /// assert!(!guard.accept("7"));
    /// ```
    pub fn not(&self, message: impl Into<String>) -> Parser {
        Parser::of(
            Kind::Not {
                message: message.into(),
            },
            vec![self.clone()],
        )
    }

    /// Succeeds only when this parser succeeds *and* consumed the
    /// whole input; otherwise fails with `"end of input expected"` at
    /// the position where input was left over.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let all = char('a').star().end();
    ///
    /// assert_eq!(all.parse("aaaa").position(), 4);
    /// assert_eq!(all.parse("aab").position(), 2);
    /// assert!(all.parse("aab").is_failure());
    /// ```
    pub fn end(&self) -> Parser {
        self.end_with("end of input expected")
    }

    /// As [`end`](Parser::end), with a custom message.
    pub fn end_with(&self, message: impl Into<String>) -> Parser {
        Parser::of(
            Kind::End {
                message: message.into(),
            },
            vec![self.clone()],
        )
    }

    /// Map the value of this parser through a pure function.
    ///
    /// The function sees only the value, never the buffer or position,
    /// and must not fail recoverably: a panic inside it propagates to
    /// the caller of [`parse`](Parser::parse).
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let number = digit().plus().flatten().map(|value| {
    ///     Value::Number(value.as_str().unwrap().parse().unwrap())
    /// });
    ///
    /// assert_eq!(number.parse("42").value(), Some(&Value::Number(42.0)));
    /// ```
    pub fn map<F: Fn(Value) -> Value + 'static>(&self, function: F) -> Parser {
        Parser::of(
            Kind::Action {
                action: Action::new(function),
            },
            vec![self.clone()],
        )
    }

    /// Replace the value of this parser with the literal substring of
    /// input it covered.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let word = pattern("a-zA-Z").plus().flatten();
    ///
    /// assert_eq!(word.parse("Hello").value(), Some(&Value::String("Hello".into())));
    /// ```
    pub fn flatten(&self) -> Parser {
        Parser::of(Kind::Flatten, vec![self.clone()])
    }

    /// Replace the value of this parser with a [`Token`] carrying the
    /// original value and the `[start, end)` span it covers.
    ///
    /// [`Token`]: crate::value::Token
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let word = letter().plus().token();
    /// let value = word.parse("hi").into_value().unwrap();
    /// let token = value.as_token().unwrap();
    ///
    /// assert_eq!((token.start(), token.end()), (0, 2));
    /// assert_eq!(token.text(), "hi");
    /// ```
    pub fn token(&self) -> Parser {
        Parser::of(Kind::Token, vec![self.clone()])
    }

    /// Skip whitespace before and after this parser.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let word = letter().plus().flatten().trim();
    /// let result = word.parse("  hi  ");
    ///
    /// assert_eq!(result.value(), Some(&Value::String("hi".into())));
    /// assert_eq!(result.position(), 6);
    /// ```
    pub fn trim(&self) -> Parser {
        self.trim_with(&whitespace())
    }

    /// Skip zero or more `trimmer` matches before and after this
    /// parser.
    pub fn trim_with(&self, trimmer: &Parser) -> Parser {
        Parser::of(Kind::Trim, vec![self.clone(), trimmer.clone()])
    }

    /// Select element `index` from this parser's sequence value.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let bracketed = char('[').seq(&digit()).seq(&char(']')).pick(1);
    ///
    /// assert_eq!(bracketed.parse("[7]").value(), Some(&Value::Char('7')));
    /// ```
    pub fn pick(&self, index: usize) -> Parser {
        self.map(move |value| match value {
            Value::List(elements) => elements
                .into_iter()
                .nth(index)
                .expect("pick index out of bounds"),
            _ => panic!("pick requires a sequence value"),
        })
    }

    /// Reorder this parser's sequence value by the given indexes.
    /// Indexes may repeat or drop elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let swapped = letter().seq(&digit()).permute(&[1, 0]);
    ///
    /// assert_eq!(
    ///     swapped.parse("a1").value(),
    ///     Some(&Value::List(vec![Value::Char('1'), Value::Char('a')]))
    /// );
    /// ```
    pub fn permute(&self, indexes: &[usize]) -> Parser {
        let indexes = indexes.to_vec();
        self.map(move |value| match value {
            Value::List(elements) => Value::List(
                indexes
                    .iter()
                    .map(|&index| {
                        elements
                            .get(index)
                            .cloned()
                            .expect("permute index out of bounds")
                    })
                    .collect(),
            ),
            _ => panic!("permute requires a sequence value"),
        })
    }

    /// One or more of this parser, separated by `separator`; the value
    /// is the list of the matched values without the separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let list = digit().separated_by(&char(','));
    ///
    /// assert_eq!(
    ///     list.parse("1,2,3").value(),
    ///     Some(&Value::List(vec![
    ///         Value::Char('1'),
    ///         Value::Char('2'),
    ///         Value::Char('3'),
    ///     ]))
    /// );
    /// ```
    pub fn separated_by(&self, separator: &Parser) -> Parser {
        let tail = Parser::of(Kind::Sequence, vec![separator.clone(), self.clone()])
            .pick(1)
            .star();
        Parser::of(Kind::Sequence, vec![self.clone(), tail]).map(|value| {
            let Value::List(mut parts) = value else {
                panic!("separated_by requires a sequence value")
            };
            let Some(Value::List(rest)) = parts.pop() else {
                panic!("separated_by requires a repetition value")
            };
            let first = parts.pop().expect("separated_by holds two parts");
            let mut elements = vec![first];
            elements.extend(rest);
            Value::List(elements)
        })
    }

    /// The direct children of this parser, in deterministic order.
    /// Possibly empty, possibly containing duplicates, possibly
    /// containing this parser itself through a cycle.
    pub fn children(&self) -> Vec<Parser> {
        self.node.borrow().children.clone()
    }

    /// Replace every direct child identical to `old` by `new`, in
    /// place. Does nothing when `old` is absent, so the operation is
    /// idempotent.
    ///
    /// Identity means handle identity, not structural equality: only
    /// slots holding the very node `old` names are rewritten.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let b = char('b');
    /// let word = char('a').seq(&b);
    /// word.replace(&b, &char('c'));
    ///
    /// assert!(word.accept("ac"));
    /// assert!(!word.accept("ab"));
    /// ```
    pub fn replace(&self, old: &Parser, new: &Parser) {
        let mut node = self.node.borrow_mut();
        for slot in node.children.iter_mut() {
            if Rc::ptr_eq(&slot.node, &old.node) {
                *slot = new.clone();
            }
        }
    }

    /// A shallow copy of this node: fresh identity, equal
    /// configuration, the *same* child references.
    ///
    /// This is the primitive that [`deep_copy`](Parser::deep_copy)
    /// builds on; use that for copying a whole graph.
    pub fn copy(&self) -> Parser {
        let node = self.node.borrow();
        Parser::of(node.kind.clone(), node.children.clone())
    }
}

/// Handle equality is node identity, not structural equality: two
/// handles are equal exactly when they name the same node. Use
/// [`Parser::is_equal_to`] to compare structure.
impl PartialEq for Parser {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Eq for Parser {}

impl fmt::Debug for Parser {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let node = self.node.borrow();
        f.debug_struct("Parser")
            .field("kind", &node.kind)
            .field("children", &node.children.len())
            .finish()
    }
}

/// A lazy iterator over the non-overlapping matches of a parser in an
/// input, created by [`Parser::matches`].
pub struct Matches {
    parser: Parser,
    buffer: Buffer,
    position: usize,
}

impl Iterator for Matches {
    type Item = (Value, usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.position <= self.buffer.len() {
            let start = self.position;
            let context = Context::new(self.buffer.clone(), start);
            match self.parser.parse_on(&context) {
                ParseResult::Success {
                    position: end,
                    value,
                    ..
                } => {
                    self.position = if end > start { end } else { start + 1 };
                    return Some((value, start, end));
                }
                ParseResult::Failure { .. } => self.position += 1,
            }
        }
        None
    }
}
