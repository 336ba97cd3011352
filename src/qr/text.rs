//! Bitmap text for card labels
//!
//! Glyphs come from GNU Unifont, which covers the whole Basic Multilingual
//! Plane as 16 pixel tall bitmaps: 8 columns for narrow characters and 16 for
//! wide ones such as CJK ideographs. They are scaled with nearest-neighbour
//! sampling to a cell `size` pixels tall, keeping the aspect ratio. Bold is a
//! one pixel horizontal overstrike.

use image::Rgb;
use std::borrow::Cow;
use unifont::Glyph;

const GLYPH_HEIGHT: u32 = 16;
const NARROW_COLUMNS: u32 = 8;
const REPLACEMENT: char = '?';
const ELLIPSIS: &str = "...";

/// Size, weight and colour of one line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    /// Cell height in pixels
    pub size: u32,
    /// Overstrike each glyph one pixel to the right
    pub bold: bool,
    /// Ink colour
    pub color: Rgb<u8>,
}

impl TextStyle {
    /// Regular weight text
    pub const fn regular(size: u32, color: Rgb<u8>) -> Self {
        Self {
            size,
            bold: false,
            color,
        }
    }

    /// Bold text
    pub const fn bold(size: u32, color: Rgb<u8>) -> Self {
        Self {
            size,
            bold: true,
            color,
        }
    }

    /// Horizontal advance of `c`; wide characters take twice a narrow one
    pub fn advance(&self, c: char) -> u32 {
        self.cell_width(columns(glyph(c)))
    }

    /// Rendered width of `text` in pixels
    pub fn measure(&self, text: &str) -> u32 {
        let width: u32 = text.chars().map(|c| self.advance(c)).sum();
        width + self.overstrike(width)
    }

    /// Shorten `text` with a trailing ellipsis until it fits in `max_width`
    pub fn fit<'a>(&self, text: &'a str, max_width: u32) -> Cow<'a, str> {
        if self.measure(text) <= max_width {
            return Cow::Borrowed(text);
        }

        let ellipsis: u32 = ELLIPSIS.chars().map(|c| self.advance(c)).sum();
        let budget = max_width
            .saturating_sub(u32::from(self.bold))
            .saturating_sub(ellipsis);

        let mut used = 0;
        let kept: String = text
            .chars()
            .take_while(|&c| {
                used += self.advance(c);
                used <= budget
            })
            .collect();
        Cow::Owned(format!("{}{ELLIPSIS}", kept.trim_end()))
    }

    /// Call `ink(dx, dy)` for each pixel of `c` relative to its cell origin
    pub(crate) fn for_each_ink(&self, c: char, mut ink: impl FnMut(u32, u32)) {
        let Some(glyph) = glyph(c) else {
            return;
        };
        let glyph_columns = columns(Some(glyph));
        let width = self.cell_width(glyph_columns);

        for dy in 0..self.size {
            let gy = (dy * GLYPH_HEIGHT / self.size) as usize;
            for dx in 0..width {
                let gx = (dx * glyph_columns / width) as usize;
                if glyph.get_pixel(gx, gy) {
                    ink(dx, dy);
                    if self.bold {
                        ink(dx + 1, dy);
                    }
                }
            }
        }
    }

    fn cell_width(&self, glyph_columns: u32) -> u32 {
        (self.size * glyph_columns).div_ceil(GLYPH_HEIGHT).max(1)
    }

    fn overstrike(&self, width: u32) -> u32 {
        u32::from(self.bold && width > 0)
    }
}

/// Bitmap for `c`, or the replacement glyph outside the font's coverage
fn glyph(c: char) -> Option<&'static Glyph> {
    unifont::get_glyph(c).or_else(|| unifont::get_glyph(REPLACEMENT))
}

fn columns(glyph: Option<&Glyph>) -> u32 {
    glyph.map_or(NARROW_COLUMNS, |g| g.get_width() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    const INK: Rgb<u8> = Rgb([0, 0, 0]);

    fn ink_of(style: &TextStyle, c: char) -> BTreeSet<(u32, u32)> {
        let mut pixels = BTreeSet::new();
        style.for_each_ink(c, |dx, dy| {
            pixels.insert((dx, dy));
        });
        pixels
    }

    #[test]
    fn test_measure_counts_wide_characters_twice() {
        let style = TextStyle::regular(12, INK);
        assert_eq!(style.advance('a'), 6);
        assert_eq!(style.advance('交'), 12);
        assert_eq!(style.measure("abcd"), 24);
        assert_eq!(style.measure("交易"), 24);
        assert_eq!(style.measure(""), 0);
        assert_eq!(TextStyle::bold(12, INK).measure("abcd"), 25);
    }

    #[test]
    fn test_fit_leaves_short_text_alone() {
        let style = TextStyle::regular(8, INK);
        assert!(matches!(style.fit("short", 100), Cow::Borrowed("short")));
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        let style = TextStyle::regular(8, INK);
        let fitted = style.fit("abcdefghijklmnopqrstuvwxyz", 60);
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(style.measure(&fitted) <= 60);
    }

    #[test]
    fn test_fit_leaves_room_for_bold_overstrike() {
        let style = TextStyle::bold(8, INK);
        for max_width in 40..80 {
            let fitted = style.fit("abcdefghijklmnopqrstuvwxyz", max_width);
            assert!(style.measure(&fitted) <= max_width, "{fitted} at {max_width}");
        }
    }

    #[test]
    fn test_fit_truncates_wide_text() {
        let style = TextStyle::regular(18, INK);
        let fitted = style.fit("NAME: 台灣證券交易所自動化交易機器人測試帳號", 200);
        assert!(fitted.starts_with("NAME: 台灣"));
        assert!(fitted.ends_with(ELLIPSIS));
        assert!(style.measure(&fitted) <= 200);
    }

    #[test]
    fn test_space_has_no_ink() {
        assert!(ink_of(&TextStyle::regular(16, INK), ' ').is_empty());
    }

    #[test]
    fn test_glyph_stays_inside_cell() {
        let style = TextStyle::regular(22, INK);
        for c in ['M', '交'] {
            let pixels = ink_of(&style, c);
            assert!(!pixels.is_empty());
            assert!(
                pixels
                    .iter()
                    .all(|&(dx, dy)| dx < style.advance(c) && dy < style.size)
            );
        }
    }

    #[test]
    fn test_cjk_characters_are_distinct() {
        let style = TextStyle::regular(18, INK);
        let first = ink_of(&style, '交');
        let second = ink_of(&style, '易');
        assert_ne!(first, second);
        assert_ne!(first, ink_of(&style, '?'));
    }
}
