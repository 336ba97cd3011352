//! Labeled QR card compositing

use crate::error::Result;
use crate::qr::encoder::{DEFAULT_QR_SIZE, LIGHT};
use crate::qr::surface::Surface;
use crate::qr::text::TextStyle;
use image::{Rgb, RgbImage};

/// Card title drawn above the name
pub const TITLE: &str = "SHIOAJI API QRCODE";

/// Caption drawn under the QR code
pub const FOOTER: &str = "https://sinotrade.github.io/sj-qrcode/";

/// Name shown when the display name is blank
pub const UNNAMED: &str = "unnamed";

const HORIZONTAL_PADDING: u32 = 32;
const TOP_PADDING: u32 = 42;
const TITLE_SIZE: u32 = 22;
const TITLE_SPACING: u32 = 10;
const NAME_SIZE: u32 = 18;
const NAME_SPACING: u32 = 20;
const FOOTER_PADDING: u32 = 42;
const FOOTER_SIZE: u32 = 12;
const FOOTER_OFFSET: u32 = 12;

const TEXT_COLOR: Rgb<u8> = Rgb([0x0f, 0x17, 0x2a]);
const BORDER_COLOR: Rgb<u8> = Rgb([0xe5, 0xe7, 0xeb]);
const FOOTER_COLOR: Rgb<u8> = Rgb([0x6b, 0x72, 0x80]);

/// Pixel geometry of a labeled card around a QR image of side `qr_side`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelLayout {
    /// QR image side in pixels
    pub qr_side: u32,
}

impl LabelLayout {
    /// Layout for a QR image of the given side
    pub fn new(qr_side: u32) -> Self {
        Self { qr_side }
    }

    /// Card width
    pub fn width(&self) -> u32 {
        self.qr_side + HORIZONTAL_PADDING * 2
    }

    /// Card height
    pub fn height(&self) -> u32 {
        TOP_PADDING
            + TITLE_SIZE
            + TITLE_SPACING
            + NAME_SIZE
            + NAME_SPACING
            + self.qr_side
            + FOOTER_PADDING
    }

    /// Top edge of the title line
    pub fn title_y(&self) -> u32 {
        TOP_PADDING
    }

    /// Top edge of the name line
    pub fn name_y(&self) -> u32 {
        self.title_y() + TITLE_SIZE + TITLE_SPACING
    }

    /// Top-left corner of the QR image
    pub fn qr_origin(&self) -> (u32, u32) {
        (HORIZONTAL_PADDING, self.name_y() + NAME_SIZE + NAME_SPACING)
    }

    /// Top edge of the footer caption
    pub fn footer_y(&self) -> u32 {
        self.height() - FOOTER_PADDING + FOOTER_OFFSET
    }

    /// Widest line of text that fits with half the padding on each side
    fn text_width(&self) -> u32 {
        self.width() - HORIZONTAL_PADDING
    }
}

impl Default for LabelLayout {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SIZE)
    }
}

/// Text shown on the name line
pub fn name_line(display_name: &str) -> String {
    let name = display_name.trim();
    let name = if name.is_empty() { UNNAMED } else { name };
    format!("NAME: {name}")
}

/// Compose `qr` into a titled, bordered card and return the drawn surface
pub fn compose(qr: &RgbImage, display_name: &str) -> Result<Surface> {
    let layout = LabelLayout::new(qr.width().max(qr.height()));
    let mut surface = Surface::acquire(layout.width(), layout.height(), LIGHT)?;
    let center_x = i64::from(layout.width() / 2);

    let title_style = TextStyle::bold(TITLE_SIZE, TEXT_COLOR);
    surface.draw_text_centered(TITLE, center_x, i64::from(layout.title_y()), &title_style);

    let name_style = TextStyle::regular(NAME_SIZE, TEXT_COLOR);
    let line = name_line(display_name);
    let line = name_style.fit(&line, layout.text_width());
    surface.draw_text_centered(&line, center_x, i64::from(layout.name_y()), &name_style);

    let (qr_x, qr_y) = layout.qr_origin();
    let (qr_x, qr_y) = (i64::from(qr_x), i64::from(qr_y));
    surface.blit(qr, qr_x, qr_y);
    surface.stroke_rect(
        qr_x - 1,
        qr_y - 1,
        qr.width() + 2,
        qr.height() + 2,
        BORDER_COLOR,
    );

    let footer_style = TextStyle::regular(FOOTER_SIZE, FOOTER_COLOR);
    let footer = footer_style.fit(FOOTER, layout.text_width());
    surface.draw_text_centered(&footer, center_x, i64::from(layout.footer_y()), &footer_style);

    Ok(surface)
}
