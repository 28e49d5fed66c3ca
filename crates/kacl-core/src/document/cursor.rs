//! Front-consumable cursor over an element sequence
//!
//! The parser and its sub-parsers all advance one owned queue; an element
//! is consumed at most once and order is preserved.

use std::collections::VecDeque;

use super::tree::Element;

/// Owned queue of elements consumed from the front during a single parse.
#[derive(Debug, Default)]
pub struct Cursor {
    elements: VecDeque<Element>,
}

impl Cursor {
    /// Create a cursor over an element list
    pub fn new(elements: Vec<Element>) -> Self {
        Self {
            elements: elements.into(),
        }
    }

    /// Look at the head element without consuming it
    pub fn peek(&self) -> Option<&Element> {
        self.elements.front()
    }

    /// Consume and return the head element
    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop_front()
    }

    /// Check whether the cursor is exhausted
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Consume elements until the predicate matches or the cursor is
    /// exhausted. The first matching element stays queued.
    pub fn take_until(&mut self, predicate: impl Fn(&Element) -> bool) -> Vec<Element> {
        let mut taken = Vec::new();
        while matches!(self.elements.front(), Some(element) if !predicate(element)) {
            if let Some(element) = self.elements.pop_front() {
                taken.push(element);
            }
        }
        taken
    }

    /// Apply a sub-parser repeatedly, collecting results until it reports
    /// no match. A non-matching head element is left unconsumed.
    pub fn parse_repeated<T>(&mut self, mut parse: impl FnMut(&mut Cursor) -> Option<T>) -> Vec<T> {
        let mut parsed = Vec::new();
        while let Some(item) = parse(self) {
            parsed.push(item);
        }
        parsed
    }

    /// Consume everything that remains
    pub fn rest(&mut self) -> Vec<Element> {
        self.elements.drain(..).collect()
    }
}
