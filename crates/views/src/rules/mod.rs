//! Rule implementations for filtered views.
//!
//! This module contains the concrete rules that can govern a view or be
//! composed into a [`RuleSet`].

pub mod accept_all;
pub mod multiple_of;
pub mod not_equal;
pub mod predicate;
pub mod rule_set;
pub mod shared;

// Re-export for convenience
pub use accept_all::AcceptAll;
pub use multiple_of::MultipleOf;
pub use not_equal::NotEqual;
pub use predicate::Predicate;
pub use rule_set::RuleSet;
pub use shared::SharedRule;
