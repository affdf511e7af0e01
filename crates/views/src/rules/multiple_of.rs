//! Rule that keeps multiples of a divisor.

use crate::error::{Result, ViewError};
use crate::rule::Rule;
use num_traits::CheckedRem;
use std::fmt::Debug;

/// Accepts integers that are a multiple of `divisor`.
///
/// `MultipleOf::new(2)` is the "value is even" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MultipleOf<T> {
    divisor: T,
}

impl<T> MultipleOf<T>
where
    T: Copy + PartialEq + Debug + From<u8>,
{
    /// Create a new MultipleOf rule.
    ///
    /// # Errors
    /// `ViewError::InvalidRule` when `divisor` is zero.
    pub fn new(divisor: T) -> Result<Self> {
        if divisor == T::from(0) {
            return Err(ViewError::InvalidRule(format!(
                "divisor of MultipleOf must be non-zero, got {:?}",
                divisor
            )));
        }
        Ok(Self { divisor })
    }

    pub fn divisor(&self) -> T {
        self.divisor
    }
}

impl<T> Rule<T> for MultipleOf<T>
where
    T: Copy + PartialEq + From<u8> + CheckedRem,
{
    fn name(&self) -> &str {
        "MultipleOf"
    }

    fn accept(&self, element: &T) -> bool {
        // The divisor is non-zero, so `None` only comes from `MIN % -1`,
        // which is a multiple.
        element
            .checked_rem(&self.divisor)
            .is_none_or(|remainder| remainder == T::from(0))
    }
}
