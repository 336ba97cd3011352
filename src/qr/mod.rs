//! QR code rendering
//!
//! [`QrRenderer`] turns canonical JSON text into PNG images, either the bare
//! QR symbol ([`RenderStyle::Plain`]) or a card with a title, the display
//! name and a footer caption around it ([`RenderStyle::Labeled`]). Every
//! render allocates its own [`surface::Surface`] and frees it before
//! returning.

mod encoder;
pub mod label;
pub mod surface;
pub mod text;

pub use encoder::{DARK, DEFAULT_MARGIN, DEFAULT_QR_SIZE, LIGHT, QrEncoder};
pub use label::LabelLayout;

use crate::error::Result;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Which image a render produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderStyle {
    /// The QR symbol only
    Plain,
    /// The QR symbol on a card labeled with `display_name`
    Labeled {
        /// Name printed on the card; blank falls back to a placeholder
        display_name: String,
    },
}

impl RenderStyle {
    /// Labeled style for `display_name`
    pub fn labeled(display_name: impl Into<String>) -> Self {
        RenderStyle::Labeled {
            display_name: display_name.into(),
        }
    }

    /// Short kind of this style
    pub fn kind(&self) -> ArtifactKind {
        match self {
            RenderStyle::Plain => ArtifactKind::Plain,
            RenderStyle::Labeled { .. } => ArtifactKind::Labeled,
        }
    }
}

/// Kind of image held by a [`RenderedArtifact`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Bare QR symbol
    Plain,
    /// QR symbol on a labeled card
    Labeled,
}

/// A PNG-encoded render result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    /// What was rendered
    pub kind: ArtifactKind,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// PNG bytes
    pub png: Bytes,
}

impl RenderedArtifact {
    /// MIME type of the encoded image
    pub const MIME: &'static str = "image/png";

    /// PNG bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// `data:image/png;base64,...` URI for inline display
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", Self::MIME, STANDARD.encode(&self.png))
    }
}

/// Renders canonical JSON into QR images
#[derive(Debug, Clone, Default)]
pub struct QrRenderer {
    encoder: QrEncoder,
}

impl QrRenderer {
    /// Renderer with the default encoder (EC level M, 320 px, 1 module margin)
    pub fn new() -> Self {
        Self::default()
    }

    /// Renderer using a custom encoder
    pub fn with_encoder(encoder: QrEncoder) -> Self {
        Self { encoder }
    }

    /// Render `json_text` in the requested style
    pub fn render(&self, json_text: &str, style: &RenderStyle) -> Result<RenderedArtifact> {
        let qr = self.encoder.encode(json_text.as_bytes())?;

        let (width, height, png) = match style {
            RenderStyle::Plain => {
                let png = surface::encode_png(&qr)?;
                (qr.width(), qr.height(), png)
            }
            RenderStyle::Labeled { display_name } => {
                let card = label::compose(&qr, display_name)?;
                let (width, height) = (card.width(), card.height());
                (width, height, card.into_png()?)
            }
        };

        tracing::debug!(
            kind = ?style.kind(),
            width,
            height,
            png_bytes = png.len(),
            "Rendered QR artifact"
        );

        Ok(RenderedArtifact {
            kind: style.kind(),
            width,
            height,
            png,
        })
    }

    /// Render the bare QR symbol
    pub fn render_plain(&self, json_text: &str) -> Result<RenderedArtifact> {
        self.render(json_text, &RenderStyle::Plain)
    }

    /// Render the labeled card
    pub fn render_labeled(&self, json_text: &str, display_name: &str) -> Result<RenderedArtifact> {
        self.render(json_text, &RenderStyle::labeled(display_name))
    }

    /// Render the symbol as Unicode half blocks for terminal preview
    ///
    /// `dark_background` swaps the ink so the code stays scannable on dark
    /// terminals.
    pub fn render_terminal(&self, json_text: &str, dark_background: bool) -> Result<String> {
        use qrcode::render::unicode::Dense1x2;

        let code = self.encoder.encode_matrix(json_text.as_bytes())?;
        let (dark, light) = if dark_background {
            (Dense1x2::Light, Dense1x2::Dark)
        } else {
            (Dense1x2::Dark, Dense1x2::Light)
        };

        Ok(code
            .render::<Dense1x2>()
            .dark_color(dark)
            .light_color(light)
            .quiet_zone(true)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::build;

    fn sample() -> String {
        build("Team A", "ABC123", "XYZ789").into_string()
    }

    #[test]
    fn test_render_plain_dimensions() {
        let artifact = QrRenderer::new().render_plain(&sample()).unwrap();
        assert_eq!(artifact.kind, ArtifactKind::Plain);
        assert_eq!((artifact.width, artifact.height), (320, 320));
        assert_eq!(&artifact.as_bytes()[1..4], b"PNG");
    }

    #[test]
    fn test_render_labeled_dimensions() {
        let artifact = QrRenderer::new()
            .render_labeled(&sample(), "Team A")
            .unwrap();
        assert_eq!(artifact.kind, ArtifactKind::Labeled);
        assert_eq!((artifact.width, artifact.height), (384, 474));
    }

    #[test]
    fn test_render_labeled_is_pixel_identical() {
        let renderer = QrRenderer::new();
        let a = renderer.render_labeled(&sample(), "Team A").unwrap();
        let b = renderer.render_labeled(&sample(), "Team A").unwrap();
        assert_eq!(a.png, b.png);
    }

    #[test]
    fn test_data_uri_prefix() {
        let artifact = QrRenderer::new().render_plain("x").unwrap();
        let uri = artifact.to_data_uri();
        assert!(uri.starts_with("data:image/png;base64,iVBORw0KGgo"));
    }

    #[test]
    fn test_encoding_failure_is_reported() {
        let long = "z".repeat(5000);
        let err = QrRenderer::new().render_labeled(&long, "Team A").unwrap_err();
        assert!(matches!(err, crate::Error::EncodingFailed(_)));
    }

    #[test]
    fn test_terminal_preview_inverts_for_dark_background() {
        let renderer = QrRenderer::new();
        let light = renderer.render_terminal("preview", false).unwrap();
        let dark = renderer.render_terminal("preview", true).unwrap();
        assert!(!light.is_empty());
        assert_ne!(light, dark);
    }
}
