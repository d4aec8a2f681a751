//! Pixel canvas, vertical gradients and vector shape primitives.

pub(crate) mod canvas;
pub(crate) mod gradient;
pub(crate) mod shapes;
