//! Shared primitives: error taxonomy, color and size types, small math helpers.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
