//! The RuleSet composes several rules into one.
//!
//! An element is accepted by the set only if every member rule accepts it.
//! Rules are consulted in insertion order and evaluation stops at the first
//! rejection.

use crate::rule::Rule;
use std::fmt;

/// Chains multiple rules together (all-of).
///
/// ## Usage
/// ```
/// use views::Rule;
/// use views::rules::{MultipleOf, NotEqual, RuleSet};
///
/// let rules = RuleSet::new()
///     .add_rule(NotEqual::new(0i64))
///     .add_rule(MultipleOf::new(3i64).unwrap());
///
/// assert!(rules.accept(&9));
/// assert!(!rules.accept(&0));
/// assert!(!rules.accept(&4));
/// ```
pub struct RuleSet<E: ?Sized> {
    rules: Vec<Box<dyn Rule<E>>>,
}

impl<E: ?Sized> RuleSet<E> {
    /// Create a new empty RuleSet. An empty set accepts everything.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule to the set (builder pattern).
    pub fn add_rule(mut self, rule: impl Rule<E> + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Add an already boxed rule, e.g. one built from configuration.
    pub fn add_boxed(mut self, rule: Box<dyn Rule<E>>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<E: ?Sized> Rule<E> for RuleSet<E> {
    fn name(&self) -> &str {
        "RuleSet"
    }

    fn accept(&self, element: &E) -> bool {
        for rule in &self.rules {
            if !rule.accept(element) {
                tracing::trace!("Rule {} rejected element", rule.name());
                return false;
            }
        }
        true
    }
}

impl<E: ?Sized> Default for RuleSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ?Sized> fmt::Debug for RuleSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.rules.iter().map(|rule| rule.name()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{MultipleOf, NotEqual, Predicate};

    #[test]
    fn test_empty_set() {
        let rules: RuleSet<i32> = RuleSet::new();
        assert!(rules.is_empty());
        assert!(rules.accept(&42));
    }

    #[test]
    fn test_all_rules_must_accept() {
        let rules = RuleSet::new()
            .add_rule(NotEqual::new(10))
            .add_rule(MultipleOf::new(5).unwrap());

        assert_eq!(rules.len(), 2);
        assert!(rules.accept(&5));
        assert!(!rules.accept(&10));
        assert!(!rules.accept(&7));
    }

    #[test]
    fn test_stops_at_first_rejection() {
        use std::cell::Cell;
        use std::rc::Rc;

        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let rules = RuleSet::new()
            .add_rule(NotEqual::new(1))
            .add_rule(Predicate::new("counting", move |_: &i32| {
                counter.set(counter.get() + 1);
                true
            }));

        assert!(!rules.accept(&1));
        assert_eq!(calls.get(), 0);
        assert!(rules.accept(&2));
        assert_eq!(calls.get(), 1);
    }
}
