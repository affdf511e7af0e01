//! Reference-counted rule with identity equality.

use crate::rule::Rule;
use std::fmt;
use std::rc::Rc;

/// A type-erased rule shared between views.
///
/// Two `SharedRule`s are equal only when they point at the same rule
/// object, so cloning the handle keeps views comparable while two separately
/// built rules never compare equal, even if they behave the same.
pub struct SharedRule<E: ?Sized> {
    inner: Rc<dyn Rule<E>>,
}

impl<E: ?Sized> SharedRule<E> {
    pub fn new(rule: impl Rule<E> + 'static) -> Self {
        Self {
            inner: Rc::new(rule),
        }
    }
}

impl<E: ?Sized> Clone for SharedRule<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E: ?Sized> Rule<E> for SharedRule<E> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn accept(&self, element: &E) -> bool {
        self.inner.accept(element)
    }
}

impl<E: ?Sized> PartialEq for SharedRule<E> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<E: ?Sized> Eq for SharedRule<E> {}

impl<E: ?Sized> fmt::Debug for SharedRule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedRule").field(&self.inner.name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{NotEqual, Predicate};

    #[test]
    fn test_identity_equality() {
        let rule = SharedRule::new(NotEqual::new(1));
        let same = rule.clone();
        let other = SharedRule::new(NotEqual::new(1));

        assert_eq!(rule, same);
        assert_ne!(rule, other);
    }

    #[test]
    fn test_shared_closure() {
        let rule: SharedRule<i32> = SharedRule::new(Predicate::new("odd", |x: &i32| x % 2 != 0));
        assert!(rule.accept(&3));
        assert!(!rule.accept(&4));
        assert_eq!(rule.name(), "odd");
    }
}
