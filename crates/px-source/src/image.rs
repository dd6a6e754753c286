use std::path::Path;

use anyhow::Result;

use px_core::CoreError;
use px_core::frame::FrameBuffer;
use px_core::traits::Source;

/// Source d'image fixe. Livre exactement une frame puis fin de flux.
///
/// # Example
/// ```no_run
/// use px_source::image::ImageSource;
/// use std::path::Path;
/// let source = ImageSource::open(Path::new("test.png")).unwrap();
/// ```
pub struct ImageSource {
    frame: Option<FrameBuffer>,
    size: (u32, u32),
}

impl ImageSource {
    /// Charge une image depuis le disque.
    ///
    /// # Errors
    /// `SourceUnavailable` si l'image ne peut pas être chargée.
    pub fn open(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            CoreError::SourceUnavailable(format!("{}: {e}", path.display()))
        })?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(Self {
            size: (width, height),
            frame: Some(FrameBuffer {
                data: rgb.into_raw(),
                width,
                height,
            }),
        })
    }
}

impl Source for ImageSource {
    fn next_frame(&mut self) -> Result<Option<FrameBuffer>> {
        Ok(self.frame.take())
    }

    fn native_size(&self) -> (u32, u32) {
        self.size
    }

    fn frame_rate(&self) -> f64 {
        0.0
    }

    fn frame_count(&self) -> Option<u64> {
        Some(1)
    }

    fn is_live(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_yields_exactly_one_frame() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("one.png");
        let img = image::RgbImage::from_fn(3, 2, |x, _y| image::Rgb([x as u8 * 10, 0, 255]));
        img.save(&path).expect("save png");

        let mut source = ImageSource::open(&path).expect("open");
        assert_eq!(source.native_size(), (3, 2));
        assert_eq!(source.frame_count(), Some(1));
        assert!(!source.is_live());

        let frame = source.next_frame().expect("read").expect("first frame");
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(frame.pixel(1, 0), (10, 0, 255));

        // Deuxième appel = fin de flux
        assert!(source.next_frame().expect("read").is_none());
    }

    #[test]
    fn missing_file_is_unavailable() {
        assert!(ImageSource::open(Path::new("/nonexistent/none.png")).is_err());
    }
}
