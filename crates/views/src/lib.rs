//! Rule-governed views over standard collections.
//!
//! This crate provides:
//! - [`Rule`] and [`Cleaner`], the capabilities every view is built from
//! - [`FilteredCollection`], [`FilteredList`] and [`FilteredMap`], live
//!   views that reject elements failing their rule
//! - a small library of rules in [`rules`]
//!
//! ## How a view behaves
//! A view wraps a backing container and a rule. Elements entering through
//! the view are checked; rejected ones are silently turned away and the
//! call reports it through its return value. The backing container stays
//! reachable through `backing_mut()`, so a view never trusts it: every call
//! that exposes contents first purges elements the rule rejects.
//!
//! ## Example Usage
//! ```
//! use views::{Cleaner, FilteredList, rules::NotEqual};
//!
//! let mut view = FilteredList::new(vec![1], NotEqual::new(1));
//! assert!(view.is_empty());
//!
//! assert!(view.add(2));
//! assert!(!view.add(1));
//!
//! // Bypass the view; the next read repairs the list.
//! view.backing_mut().push(1);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view.backing(), &vec![2]);
//! assert_eq!(view.clean(), 0);
//! ```
//!
//! Views are meant for single-threaded use. Nothing is locked; a view only
//! promises that what it shows you was accepted at the time you looked.

pub mod builder;
pub mod collection;
pub mod container;
pub mod cursor;
pub mod error;
pub mod list;
pub mod map;
pub mod rule;
pub mod rules;

// Re-export main types
pub use builder::{BuildView, ViewBuilder};
pub use collection::FilteredCollection;
pub use container::{Container, ListContainer, MapContainer, SubList, Values};
pub use cursor::RestrainedCursor;
pub use error::{Result, ViewError};
pub use list::FilteredList;
pub use map::FilteredMap;
pub use rule::{Cleaner, Rule};
