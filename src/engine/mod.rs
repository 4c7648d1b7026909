//! Caption rendering engine
//!
//! Layout math, glyph painting and the libav decode/encode loop that
//! stamps captions on every frame of a segment clip.

pub mod compositor;
pub mod layout;
pub mod painter;

pub use compositor::OverlayCompositor;
pub use layout::{CaptionLayout, TextMeasure, TextPlacement};
pub use painter::TextPainter;
