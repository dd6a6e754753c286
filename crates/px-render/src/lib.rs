/// Rendering pipeline for pixelsea: terminal-fit scaling, truecolor
/// block encoding, and the display sink.

pub mod block;
pub mod scale;
pub mod term;

pub use block::{frame_to_text, pixel_to_ansi, BLOCK};
pub use scale::{fit_to_term, ScaleTarget};
pub use term::{probe_geometry, TermSink, CLEAR, RESET};
