//! Core traits for rule-governed views.
//!
//! This module defines the two capabilities every view is built from:
//! - [`Rule`]: decides whether a single element may live in a container
//! - [`Cleaner`]: purges elements that fail the governing rule

use std::rc::Rc;
use std::sync::Arc;

/// Acceptance predicate over one element.
///
/// Rules must be pure: calling `accept` twice with the same element gives
/// the same answer and changes nothing. Views call it on every insertion and
/// on every element during a purge.
///
/// ## Equality
/// Views compare their rules when compared with each other, so a view type
/// is only `PartialEq` when its rule is. Equality between rules is
/// best-effort: the value rules in [`crate::rules`] compare structurally,
/// [`crate::rules::SharedRule`] compares by pointer identity, and closures
/// wrapped in [`crate::rules::Predicate`] do not compare at all.
pub trait Rule<E: ?Sized> {
    /// Returns true if `element` is acceptable.
    fn accept(&self, element: &E) -> bool;

    /// Returns the name of this rule (for logging/debugging)
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<E: ?Sized, R: Rule<E> + ?Sized> Rule<E> for &R {
    fn accept(&self, element: &E) -> bool {
        (**self).accept(element)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: ?Sized, R: Rule<E> + ?Sized> Rule<E> for Box<R> {
    fn accept(&self, element: &E) -> bool {
        (**self).accept(element)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: ?Sized, R: Rule<E> + ?Sized> Rule<E> for Rc<R> {
    fn accept(&self, element: &E) -> bool {
        (**self).accept(element)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<E: ?Sized, R: Rule<E> + ?Sized> Rule<E> for Arc<R> {
    fn accept(&self, element: &E) -> bool {
        (**self).accept(element)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Something that can purge the elements its rule rejects.
///
/// `clean` removes every element currently failing the rule and returns how
/// many were removed. A second call with no mutation in between returns 0.
pub trait Cleaner {
    fn clean(&mut self) -> usize;
}

impl<C: Cleaner + ?Sized> Cleaner for &mut C {
    fn clean(&mut self) -> usize {
        (**self).clean()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Positive;

    impl Rule<i32> for Positive {
        fn name(&self) -> &str {
            "Positive"
        }

        fn accept(&self, element: &i32) -> bool {
            *element > 0
        }
    }

    #[test]
    fn test_rule_through_pointers() {
        let rule = Positive;
        assert!((&rule).accept(&1));
        assert!(!Box::new(Positive).accept(&-1));
        assert!(Rc::new(Positive).accept(&3));

        let shared: Arc<dyn Rule<i32>> = Arc::new(Positive);
        assert!(!shared.accept(&0));
        assert_eq!(shared.name(), "Positive");
    }

    #[test]
    fn test_default_name_is_type_name() {
        struct Anything;
        impl Rule<u8> for Anything {
            fn accept(&self, _element: &u8) -> bool {
                true
            }
        }

        assert!(Anything.name().ends_with("Anything"));
    }
}
