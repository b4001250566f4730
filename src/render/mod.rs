//! Output formats.

pub mod dot;

pub use dot::{RenderOptions, render_dot};
