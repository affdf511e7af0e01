//! Rule that accepts everything.

use crate::rule::Rule;

/// Accepts every element.
///
/// A view governed by `AcceptAll` behaves like its backing container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct AcceptAll;

impl<E: ?Sized> Rule<E> for AcceptAll {
    fn name(&self) -> &str {
        "AcceptAll"
    }

    fn accept(&self, _element: &E) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_all() {
        assert!(AcceptAll.accept(&0));
        assert!(AcceptAll.accept("anything"));
        assert_eq!(AcceptAll, AcceptAll);
    }
}
