/// Frame sources for pixelsea (video file, camera, still image).
///
/// Tous les décodeurs passent par un subprocess ffmpeg/ffprobe.
/// Prérequis runtime : `ffmpeg` et `ffprobe` accessibles dans PATH.

pub mod camera;
pub mod image;
pub mod probe;
pub mod resize;
pub mod video;

pub use camera::CameraSource;
pub use image::ImageSource;
pub use probe::StreamInfo;
pub use video::FileSource;
