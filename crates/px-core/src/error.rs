use thiserror::Error;

/// Errors originating from the playback pipeline.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Frame with degenerate dimensions reached the scaler or renderer.
    #[error("invalid frame dimensions: {width}×{height}")]
    InvalidFrame {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Terminal reported zero columns or rows (not a real TTY?).
    #[error("degenerate terminal geometry: {cols}×{rows}")]
    InvalidGeometry {
        /// Columns value.
        cols: u16,
        /// Rows value.
        rows: u16,
    },

    /// Conflicting or missing playback settings.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The decoder could not open the requested file or camera.
    #[error("cannot open source: {0}")]
    SourceUnavailable(String),
}
