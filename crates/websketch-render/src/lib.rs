//! ASCII rendering of WebSketch IR captures.

pub mod ascii;

pub use ascii::{render_ascii, RenderOptions};
