//! Font resolution, text measurement and word-wrapping.

pub(crate) mod builtin;
pub(crate) mod engine;
pub(crate) mod font;
pub(crate) mod wrap;
