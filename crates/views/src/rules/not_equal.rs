//! Rule that rejects one specific value.

use crate::rule::Rule;

/// Rejects elements equal to a forbidden value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NotEqual<T> {
    forbidden: T,
}

impl<T> NotEqual<T> {
    /// Create a rule rejecting `forbidden`.
    pub fn new(forbidden: T) -> Self {
        Self { forbidden }
    }

    /// The value this rule rejects
    pub fn forbidden(&self) -> &T {
        &self.forbidden
    }
}

impl<T: PartialEq> Rule<T> for NotEqual<T> {
    fn name(&self) -> &str {
        "NotEqual"
    }

    fn accept(&self, element: &T) -> bool {
        *element != self.forbidden
    }
}
