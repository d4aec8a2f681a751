//! Static style table and palettes.

pub(crate) mod palette;
