//! The closed set of parser variants and the recognition dispatch.

use std::fmt;
use std::rc::Rc;

use crate::input::Context;
use crate::primitive::CharClass;
use crate::result::ParseResult;
use crate::value::{Token, Value};
use crate::Parser;

/// A user function applied to success values.
///
/// Actions compare by identity: two parsers carrying semantically
/// equivalent but distinct closures are not structurally equal.
#[derive(Clone)]
pub(crate) struct Action(Rc<dyn Fn(Value) -> Value>);

impl Action {
    pub(crate) fn new(function: impl Fn(Value) -> Value + 'static) -> Self {
        Action(Rc::new(function))
    }

    pub(crate) fn apply(&self, value: Value) -> Value {
        (self.0)(value)
    }
}

impl PartialEq for Action {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// The variant of a parser node, carrying its per-variant configuration.
///
/// Children are never stored here; they live in the node itself, and
/// the structural operations (`children`, `replace`, `copy`, equality)
/// stay uniform across every variant.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Kind {
    Char { class: CharClass, message: String },
    Str { literal: String, message: String },
    Epsilon,
    Fail { message: String },
    Delegate,
    End { message: String },
    And,
    Not { message: String },
    Optional { fallback: Value },
    Repeat { min: usize, max: Option<usize> },
    Action { action: Action },
    Flatten,
    Token,
    Trim,
    Choice,
    Sequence,
}

impl Parser {
    /// Run this parser against `context`.
    pub(crate) fn parse_on(&self, context: &Context) -> ParseResult {
        let node = self.node.borrow();
        match &node.kind {
            Kind::Char { class, message } => match context.buffer().char_at(context.position()) {
                Some(unit) if class.test(unit) => {
                    context.success_at(Value::Char(unit), context.position() + 1)
                }
                _ => context.failure(message.clone()),
            },
            Kind::Str { literal, message } => {
                let mut position = context.position();
                for expected in literal.chars() {
                    match context.buffer().char_at(position) {
                        Some(found) if found == expected => position += 1,
                        _ => return context.failure(message.clone()),
                    }
                }
                context.success_at(Value::String(literal.clone()), position)
            }
            Kind::Epsilon => context.success(Value::Nil),
            Kind::Fail { message } => context.failure(message.clone()),
            Kind::Delegate => node.children[0].parse_on(context),
            Kind::End { message } => match node.children[0].parse_on(context) {
                ParseResult::Success { position, .. } if position < context.buffer().len() => {
                    context.failure_at(message.clone(), position)
                }
                result => result,
            },
            Kind::And => match node.children[0].parse_on(context) {
                ParseResult::Success { value, .. } => context.success(value),
                failure => failure,
            },
            Kind::Not { message } => match node.children[0].parse_on(context) {
                ParseResult::Success { .. } => context.failure(message.clone()),
                ParseResult::Failure { .. } => context.success(Value::Nil),
            },
            Kind::Optional { fallback } => match node.children[0].parse_on(context) {
                success @ ParseResult::Success { .. } => success,
                ParseResult::Failure { .. } => context.success(fallback.clone()),
            },
            Kind::Repeat { min, max } => {
                let child = &node.children[0];
                let mut current = context.clone();
                let mut elements = Vec::new();
                while elements.len() < *min {
                    match child.parse_on(&current) {
                        ParseResult::Success { position, value, .. } => {
                            elements.push(value);
                            current = current.at(position);
                        }
                        failure => return failure,
                    }
                }
                while max.map_or(true, |max| elements.len() < max) {
                    match child.parse_on(&current) {
                        ParseResult::Success { position, value, .. } => {
                            elements.push(value);
                            current = current.at(position);
                        }
                        ParseResult::Failure { .. } => break,
                    }
                }
                current.success(Value::List(elements))
            }
            Kind::Action { action } => match node.children[0].parse_on(context) {
                ParseResult::Success {
                    buffer,
                    position,
                    value,
                } => ParseResult::Success {
                    buffer,
                    position,
                    value: action.apply(value),
                },
                failure => failure,
            },
            Kind::Flatten => match node.children[0].parse_on(context) {
                ParseResult::Success {
                    buffer, position, ..
                } => {
                    let text = buffer.slice(context.position(), position);
                    ParseResult::Success {
                        buffer,
                        position,
                        value: Value::String(text),
                    }
                }
                failure => failure,
            },
            Kind::Token => match node.children[0].parse_on(context) {
                ParseResult::Success {
                    buffer,
                    position,
                    value,
                } => {
                    let token = Token::new(buffer.clone(), context.position(), position, value);
                    ParseResult::Success {
                        buffer,
                        position,
                        value: Value::Token(token),
                    }
                }
                failure => failure,
            },
            Kind::Trim => {
                let inner = &node.children[0];
                let trimmer = &node.children[1];
                let mut before = context.clone();
                while let ParseResult::Success { position, .. } = trimmer.parse_on(&before) {
                    before = before.at(position);
                }
                match inner.parse_on(&before) {
                    ParseResult::Success {
                        buffer,
                        position,
                        value,
                    } => {
                        let mut after = Context::new(buffer, position);
                        while let ParseResult::Success { position, .. } = trimmer.parse_on(&after) {
                            after = after.at(position);
                        }
                        after.success(value)
                    }
                    failure => failure,
                }
            }
            Kind::Choice => {
                let mut last = None;
                for child in &node.children {
                    let result = child.parse_on(context);
                    if result.is_success() {
                        return result;
                    }
                    last = Some(result);
                }
                last.expect("a choice must have at least one alternative")
            }
            Kind::Sequence => {
                let mut current = context.clone();
                let mut elements = Vec::with_capacity(node.children.len());
                for child in &node.children {
                    match child.parse_on(&current) {
                        ParseResult::Success { position, value, .. } => {
                            elements.push(value);
                            current = current.at(position);
                        }
                        failure => return failure,
                    }
                }
                current.success(Value::List(elements))
            }
        }
    }
}
