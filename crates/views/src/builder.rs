//! Builder shared by all view types.
//!
//! `new(backing, rule)` cannot be called without both parts, so the builder
//! is where a missing backing container or a missing rule surfaces, as
//! [`ViewError::MissingBacking`] or [`ViewError::MissingRule`].

use crate::error::{Result, ViewError};

/// A view that can be assembled from a backing container and a rule.
pub trait BuildView: Sized {
    type Backing;
    type Rule;

    /// Build the view, running its construction purge.
    fn from_parts(backing: Self::Backing, rule: Self::Rule) -> Self;
}

/// Collects the parts of a view before building it.
///
/// ## Usage
/// ```
/// use views::{FilteredList, rules::NotEqual};
///
/// let mut view: FilteredList<Vec<i32>, NotEqual<i32>> = FilteredList::builder()
///     .backing(vec![1, 2, 1])
///     .rule(NotEqual::new(1))
///     .build()
///     .unwrap();
///
/// assert_eq!(view.to_vec(), vec![2]);
/// ```
pub struct ViewBuilder<V: BuildView> {
    backing: Option<V::Backing>,
    rule: Option<V::Rule>,
}

impl<V: BuildView> ViewBuilder<V> {
    pub fn new() -> Self {
        Self {
            backing: None,
            rule: None,
        }
    }

    /// Set the backing container (builder pattern).
    pub fn backing(mut self, backing: V::Backing) -> Self {
        self.backing = Some(backing);
        self
    }

    /// Set the governing rule (builder pattern).
    pub fn rule(mut self, rule: V::Rule) -> Self {
        self.rule = Some(rule);
        self
    }

    /// Build the view.
    ///
    /// # Errors
    /// * `ViewError::MissingBacking` - no backing container was set
    /// * `ViewError::MissingRule` - no rule was set
    pub fn build(self) -> Result<V> {
        let backing = self.backing.ok_or(ViewError::MissingBacking)?;
        let rule = self.rule.ok_or(ViewError::MissingRule)?;
        Ok(V::from_parts(backing, rule))
    }
}

impl<V: BuildView> Default for ViewBuilder<V> {
    fn default() -> Self {
        Self::new()
    }
}
