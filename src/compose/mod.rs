//! Layout recipes, job dispatch and PNG output.

pub(crate) mod comparison;
pub(crate) mod cover;
pub(crate) mod dashboard;
pub(crate) mod flow;
pub(crate) mod grid;
pub(crate) mod job;
pub(crate) mod output;
pub mod samples;
