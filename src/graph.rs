//! Structural operations over whole parser graphs.
//!
//! Parser graphs are directed and may be cyclic (recursive grammars),
//! so every algorithm here carries a visited set keyed by node
//! identity.

use hashbrown::{HashMap, HashSet};

use crate::Parser;

impl Parser {
    /// Every parser reachable from this one, each exactly once, in
    /// deterministic depth-first preorder following child order.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let letters = letter().star();
    /// assert_eq!(letters.all_parsers().len(), 2);
    /// ```
    pub fn all_parsers(&self) -> Vec<Parser> {
        let mut seen = HashSet::new();
        let mut ordered = Vec::new();
        let mut stack = vec![self.clone()];
        while let Some(parser) = stack.pop() {
            if !seen.insert(parser.key()) {
                continue;
            }
            for child in parser.children().into_iter().rev() {
                stack.push(child);
            }
            ordered.push(parser);
        }
        ordered
    }

    /// Replace `old` by `new` in the direct children of every parser
    /// reachable from this one. Idempotent: a second call finds no
    /// remaining references to `old`.
    pub fn replace_all(&self, old: &Parser, new: &Parser) {
        for parser in self.all_parsers() {
            parser.replace(old, new);
        }
    }

    /// Copy the reachable graph, passing every copied node through
    /// `handler` and rewriting all internal references to the
    /// handler's replacements.
    ///
    /// The handler receives a shallow [`copy`](Parser::copy) of each
    /// reachable node and returns the node to use in its place; the
    /// identity function yields a plain [`deep_copy`](Parser::deep_copy).
    /// Structure introduced by the handler is traversed too, so its
    /// references to original nodes are rewritten as well.
    pub fn transform<F: FnMut(Parser) -> Parser>(&self, mut handler: F) -> Parser {
        let mut mapping: HashMap<usize, Parser> = HashMap::new();
        for parser in self.all_parsers() {
            mapping.insert(parser.key(), handler(parser.copy()));
        }

        let mut seen: HashSet<usize> = mapping.values().map(Parser::key).collect();
        let mut todo: Vec<Parser> = mapping.values().cloned().collect();
        while let Some(parent) = todo.pop() {
            for child in parent.children() {
                if let Some(replacement) = mapping.get(&child.key()) {
                    parent.replace(&child, replacement);
                } else if seen.insert(child.key()) {
                    todo.push(child);
                }
            }
        }

        mapping[&self.key()].clone()
    }

    /// An isomorphic copy of the reachable graph: every node is
    /// replaced by a fresh shallow copy with all references remapped,
    /// so the copy shares no nodes with the original and cycles are
    /// preserved at the same shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use parsnip::prelude::*;
    ///
    /// let original = digit().plus().flatten();
    /// let copy = original.deep_copy();
    ///
    /// assert!(copy.is_equal_to(&original));
    /// assert!(copy.parse("42").is_success());
    /// ```
    pub fn deep_copy(&self) -> Parser {
        self.transform(|copy| copy)
    }

    /// Cycle-safe structural equality: this parser and `other` are
    /// equal when a bijection between their reachable nodes exists
    /// under which variants, configuration, and child order all
    /// correspond.
    ///
    /// Parsers carrying user actions compare by action identity, so
    /// two otherwise identical parsers with distinct closures are not
    /// equal.
    pub fn is_equal_to(&self, other: &Parser) -> bool {
        fn equals(a: &Parser, b: &Parser, visited: &mut HashSet<(usize, usize)>) -> bool {
            if !visited.insert((a.key(), b.key())) {
                return true;
            }
            let (node_a, node_b) = (a.node.borrow(), b.node.borrow());
            node_a.kind == node_b.kind
                && node_a.children.len() == node_b.children.len()
                && node_a
                    .children
                    .iter()
                    .zip(node_b.children.iter())
                    .all(|(child_a, child_b)| equals(child_a, child_b, visited))
        }
        equals(self, other, &mut HashSet::new())
    }
}
