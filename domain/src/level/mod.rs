//! The ordered severity scale.
//!
//! [`Level`] carries a fixed integer rank; thresholds compare ranks through
//! [`Level::accepts`].

mod value_objects;

pub use value_objects::{Level, SeverityOrdering};
