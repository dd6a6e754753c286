/// Configuration, types, and shared structures for pixelsea.
///
/// This crate contains the shared types, the `Source` trait, and the
/// error taxonomy used across the pixelsea workspace.

pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use config::{PlaybackConfig, PlayerConfig, SourceKind};
pub use error::CoreError;
pub use frame::{FrameBuffer, TermGeometry};
pub use traits::Source;
