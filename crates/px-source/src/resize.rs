use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer as FirResizer};

use px_core::frame::FrameBuffer;

/// Resizer réutilisable wrappant fast_image_resize.
///
/// Interpolation bilinéaire, canaux rgb24. Pré-alloué pour limiter les
/// allocations quand il est réutilisé frame après frame.
///
/// # Example
/// ```
/// use px_source::resize::Resizer;
/// let r = Resizer::new();
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    /// Scratch image for source (owned buffer to avoid the mut borrow issue).
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Bilinear)),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`. Dimensions of `dst` determine output size.
    ///
    /// # Errors
    /// Returns an error if the resize operation fails.
    ///
    /// # Example
    /// ```
    /// use px_source::resize::Resizer;
    /// use px_core::frame::FrameBuffer;
    /// let mut r = Resizer::new();
    /// let src = FrameBuffer::new(100, 100);
    /// let mut dst = FrameBuffer::new(50, 50);
    /// r.resize_into(&src, &mut dst).unwrap();
    /// ```
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        // Copie forcée par l'API fast_image_resize (requiert &mut sur la source)
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x3)
                .context("Invalid source dimensions")?;

        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x3)
                .context("Invalid destination dimensions")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Resize failed")?;

        Ok(())
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience for one-shot usage. DO NOT use in hot path.
///
/// # Errors
/// Returns an error if the resize operation fails.
///
/// # Example
/// ```
/// use px_source::resize::resize_frame;
/// use px_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let dst = resize_frame(&src, 50, 50).unwrap();
/// assert_eq!(dst.width, 50);
/// ```
pub fn resize_frame(src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer> {
    let mut dst = FrameBuffer::new(width, height);
    let mut resizer = Resizer::new();
    resizer.resize_into(src, &mut dst)?;
    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_size_is_a_copy() {
        let mut src = FrameBuffer::new(4, 4);
        src.set_pixel(3, 3, (1, 2, 3));
        let mut dst = FrameBuffer::new(4, 4);
        let mut resizer = Resizer::new();
        resizer.resize_into(&src, &mut dst).expect("resize");
        assert_eq!(dst.data, src.data);
    }

    #[test]
    fn uniform_color_survives_downscale() {
        let mut src = FrameBuffer::new(8, 8);
        for y in 0..8 {
            for x in 0..8 {
                src.set_pixel(x, y, (120, 40, 200));
            }
        }
        let dst = resize_frame(&src, 2, 2).expect("resize");
        assert_eq!((dst.width, dst.height), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(dst.pixel(x, y), (120, 40, 200));
            }
        }
    }
}
