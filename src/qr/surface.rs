//! Scoped raster drawing surface

use crate::error::{Error, Result};
use crate::qr::text::TextStyle;
use bytes::Bytes;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Largest side a surface may have, matching common canvas limits
pub const MAX_SURFACE_SIDE: u32 = 16_384;

const CHANNELS: usize = 3;

/// Exclusively owned RGB canvas for a single render call
///
/// Dropped (and its buffer freed) as soon as the render finishes, whether it
/// succeeded or not.
pub struct Surface {
    canvas: RgbImage,
}

impl Surface {
    /// Allocate a `width` x `height` surface filled with `fill`
    pub fn acquire(width: u32, height: u32, fill: Rgb<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::RenderSurfaceUnavailable(format!(
                "{width}x{height} surface has no area"
            )));
        }
        if width > MAX_SURFACE_SIDE || height > MAX_SURFACE_SIDE {
            return Err(Error::RenderSurfaceUnavailable(format!(
                "{width}x{height} exceeds the {MAX_SURFACE_SIDE}px side limit"
            )));
        }

        let pixels = width as usize * height as usize;
        let mut buffer: Vec<u8> = Vec::new();
        buffer
            .try_reserve_exact(pixels * CHANNELS)
            .map_err(|e| Error::RenderSurfaceUnavailable(format!("{width}x{height}: {e}")))?;
        for _ in 0..pixels {
            buffer.extend_from_slice(&fill.0);
        }

        let canvas = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            Error::RenderSurfaceUnavailable(format!("{width}x{height}: buffer size mismatch"))
        })?;

        Ok(Self { canvas })
    }

    /// Surface width in pixels
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Surface height in pixels
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    pub(crate) fn canvas_mut(&mut self) -> &mut RgbImage {
        &mut self.canvas
    }

    /// Set a pixel, silently clipping anything outside the surface
    pub fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.canvas.width() && y < self.canvas.height() {
            self.canvas.put_pixel(x, y, color);
        }
    }

    /// One pixel wide rectangle outline with its top-left corner at `(x, y)`
    pub fn stroke_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        let right = x + i64::from(width) - 1;
        let bottom = y + i64::from(height) - 1;

        for px in x..=right {
            self.put(px, y, color);
            self.put(px, bottom, color);
        }
        for py in y..=bottom {
            self.put(x, py, color);
            self.put(right, py, color);
        }
    }

    /// Copy `image` onto the surface with its top-left corner at `(x, y)`
    pub fn blit(&mut self, image: &RgbImage, x: i64, y: i64) {
        image::imageops::replace(&mut self.canvas, image, x, y);
    }

    /// Draw a single line of text horizontally centered on `center_x`, top edge at `y`
    pub fn draw_text_centered(&mut self, text: &str, center_x: i64, y: i64, style: &TextStyle) {
        let width = i64::from(style.measure(text));
        self.draw_text(text, center_x - width / 2, y, style);
    }

    /// Draw a single line of text with its top-left corner at `(x, y)`
    pub fn draw_text(&mut self, text: &str, x: i64, y: i64, style: &TextStyle) {
        let mut pen = x;

        for c in text.chars() {
            style.for_each_ink(c, |dx, dy| {
                self.put(pen + i64::from(dx), y + i64::from(dy), style.color);
            });
            pen += i64::from(style.advance(c));
        }
    }

    /// Release the surface, keeping the pixels
    pub fn into_image(self) -> RgbImage {
        self.canvas
    }

    /// Release the surface as a PNG buffer
    pub fn into_png(self) -> Result<Bytes> {
        encode_png(&self.canvas)
    }
}

/// Encode an RGB image as PNG
pub fn encode_png(image: &RgbImage) -> Result<Bytes> {
    let mut buffer = Vec::new();
    image.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)?;
    Ok(Bytes::from(buffer))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const GRAY: Rgb<u8> = Rgb([0xe5, 0xe7, 0xeb]);

    #[test]
    fn test_acquire_fills_surface() {
        let surface = Surface::acquire(4, 3, WHITE).unwrap();
        let image = surface.into_image();
        assert_eq!(image.dimensions(), (4, 3));
        assert!(image.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_acquire_rejects_degenerate_sizes() {
        assert!(matches!(
            Surface::acquire(0, 10, WHITE),
            Err(Error::RenderSurfaceUnavailable(_))
        ));
        assert!(matches!(
            Surface::acquire(10, MAX_SURFACE_SIDE + 1, WHITE),
            Err(Error::RenderSurfaceUnavailable(_))
        ));
    }

    #[test]
    fn test_stroke_rect_draws_outline_only() {
        let mut surface = Surface::acquire(6, 6, WHITE).unwrap();
        surface.stroke_rect(1, 1, 4, 4, GRAY);
        let image = surface.into_image();

        assert_eq!(*image.get_pixel(1, 1), GRAY);
        assert_eq!(*image.get_pixel(4, 4), GRAY);
        assert_eq!(*image.get_pixel(4, 1), GRAY);
        assert_eq!(*image.get_pixel(2, 2), WHITE);
        assert_eq!(*image.get_pixel(0, 0), WHITE);
        assert_eq!(*image.get_pixel(5, 5), WHITE);
    }

    #[test]
    fn test_put_clips_out_of_bounds() {
        let mut surface = Surface::acquire(2, 2, WHITE).unwrap();
        surface.put(-1, 0, GRAY);
        surface.put(2, 2, GRAY);
        assert!(surface.into_image().pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_png_signature() {
        let surface = Surface::acquire(8, 8, WHITE).unwrap();
        let png = surface.into_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
