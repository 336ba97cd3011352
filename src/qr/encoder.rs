//! QR code encoder

use crate::error::Result;
use crate::qr::surface::Surface;
use image::{Rgb, RgbImage};
use qrcode::{Color, EcLevel, QrCode};

/// Default side of the rendered QR image in pixels
pub const DEFAULT_QR_SIZE: u32 = 320;

/// Default quiet zone in modules
pub const DEFAULT_MARGIN: u32 = 1;

/// Near-black ink used for dark modules (`#030712`)
pub const DARK: Rgb<u8> = Rgb([0x03, 0x07, 0x12]);

/// Paper used for light modules and the quiet zone
pub const LIGHT: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
    /// Target side length in pixels
    size: u32,
    /// Quiet zone in modules
    margin: u32,
    dark: Rgb<u8>,
    light: Rgb<u8>,
}

impl QrEncoder {
    /// Create a new QR encoder with default settings (Medium ECC, 320 px, 1 module margin)
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::M,
            size: DEFAULT_QR_SIZE,
            margin: DEFAULT_MARGIN,
            dark: DARK,
            light: LIGHT,
        }
    }

    /// Create a new QR encoder with a specific error correction level
    pub fn with_ecc_level(ecc_level: EcLevel) -> Self {
        Self {
            ecc_level,
            ..Self::new()
        }
    }

    /// Override the target side length in pixels
    pub fn size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Override the quiet zone width in modules
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Error correction level used for encoding
    pub fn ecc_level(&self) -> EcLevel {
        self.ecc_level
    }

    /// Encode data into a QR symbol without rasterising it
    pub fn encode_matrix(&self, data: &[u8]) -> Result<QrCode> {
        Ok(QrCode::with_error_correction_level(data, self.ecc_level)?)
    }

    /// Encode data into a QR code image
    ///
    /// The image is exactly `size` pixels square unless the symbol plus quiet
    /// zone has more modules than that, in which case each module gets one
    /// pixel. Modules are stretched to fill the side, so module widths may
    /// differ by one pixel.
    pub fn encode(&self, data: &[u8]) -> Result<RgbImage> {
        let code = self.encode_matrix(data)?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let total = modules + self.margin * 2;
        let side = self.size.max(total);

        tracing::debug!(
            version = ?code.version(),
            modules,
            side,
            byte_length = data.len(),
            "Encoded QR symbol"
        );

        let mut surface = Surface::acquire(side, side, self.light)?;
        let canvas = surface.canvas_mut();

        for py in 0..side {
            let Some(my) = self.module_at(py, side, total, modules) else {
                continue;
            };
            for px in 0..side {
                let Some(mx) = self.module_at(px, side, total, modules) else {
                    continue;
                };
                if colors[(my * modules + mx) as usize] == Color::Dark {
                    canvas.put_pixel(px, py, self.dark);
                }
            }
        }

        Ok(surface.into_image())
    }

    /// Map a pixel coordinate onto a symbol module, `None` inside the quiet zone
    fn module_at(&self, pixel: u32, side: u32, total: u32, modules: u32) -> Option<u32> {
        let scaled = (u64::from(pixel) * u64::from(total) / u64::from(side)) as u32;
        scaled
            .checked_sub(self.margin)
            .filter(|module| *module < modules)
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}
