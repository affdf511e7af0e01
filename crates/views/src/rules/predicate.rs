//! Closure adapter.

use crate::rule::Rule;
use std::fmt;

/// Wraps a closure as a [`Rule`].
///
/// Closures cannot be compared, so views governed by a `Predicate` are not
/// `PartialEq`. Wrap the predicate in a [`super::SharedRule`] when views
/// need to compare equal.
///
/// ```
/// use views::{Rule, rules::Predicate};
///
/// let short = Predicate::new("short", |s: &String| s.len() < 4);
/// assert!(short.accept(&"abc".to_string()));
/// ```
pub struct Predicate<F> {
    name: &'static str,
    func: F,
}

impl<F> Predicate<F> {
    pub fn new(name: &'static str, func: F) -> Self {
        Self { name, func }
    }
}

impl<E: ?Sized, F: Fn(&E) -> bool> Rule<E> for Predicate<F> {
    fn name(&self) -> &str {
        self.name
    }

    fn accept(&self, element: &E) -> bool {
        (self.func)(element)
    }
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").field("name", &self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predicate() {
        let positive = Predicate::new("positive", |x: &i32| *x > 0);
        assert!(positive.accept(&5));
        assert!(!positive.accept(&-5));
        assert_eq!(Rule::<i32>::name(&positive), "positive");
    }
}
