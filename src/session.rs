//! Generator session: submit, copy, export and reset
//!
//! A [`Generator`] holds at most one generated result. Failed operations never
//! touch it, so whatever was shown before a failure is still valid after it.

use crate::clipboard::Clipboard;
use crate::error::{Error, Result};
use crate::export::{ExportTarget, JSON_MIME};
use crate::form::CredentialForm;
use crate::naming;
use crate::payload::{CanonicalJson, CredentialPayload};
use crate::qr::{QrRenderer, RenderedArtifact};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

/// Result of a successful submit
#[derive(Debug, Clone)]
pub struct Generated {
    /// Validated payload
    pub payload: CredentialPayload,
    /// Canonical JSON text, also the QR content
    pub json: CanonicalJson,
    /// Bare QR image for inline display
    pub preview: RenderedArtifact,
}

/// Owns the current result and routes exports to a target
pub struct Generator<T> {
    renderer: QrRenderer,
    target: T,
    current: Option<Generated>,
}

impl<T: ExportTarget> Generator<T> {
    /// New empty session writing exports to `target`
    pub fn new(target: T) -> Self {
        Self::with_renderer(QrRenderer::new(), target)
    }

    /// New empty session with a custom renderer
    pub fn with_renderer(renderer: QrRenderer, target: T) -> Self {
        Self {
            renderer,
            target,
            current: None,
        }
    }

    /// Export target
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Current result, if anything has been generated
    pub fn current(&self) -> Option<&Generated> {
        self.current.as_ref()
    }

    /// Validate the form, build the JSON and render the preview.
    ///
    /// Replaces the current result only when every step succeeds.
    pub fn submit(&mut self, form: &CredentialForm) -> Result<&Generated> {
        let payload = form.validate()?;
        let json = payload.to_canonical_json();

        let preview = self.renderer.render_plain(json.as_str()).inspect_err(|err| {
            warn!(error = %err, "Failed to generate QR code");
        })?;

        info!(
            name = %payload.name,
            json_bytes = json.as_bytes().len(),
            "QR code generated"
        );

        Ok(&*self.current.insert(Generated {
            payload,
            json,
            preview,
        }))
    }

    /// Copy the canonical JSON to `clipboard`
    pub fn copy_json<C: Clipboard + ?Sized>(&self, clipboard: &mut C) -> Result<()> {
        let generated = self.require()?;
        clipboard.write_text(generated.json.as_str()).inspect_err(|err| {
            warn!(error = %err, "Clipboard copy failed");
        })?;
        info!("JSON copied to clipboard");
        Ok(())
    }

    /// Render the labeled card and save it as `sj-token-{name}-{ts}.png`
    pub async fn export_qr(&self, at: DateTime<Utc>) -> Result<PathBuf> {
        let generated = self.require()?;
        let name = generated.payload.name.as_str();

        let card = self
            .renderer
            .render_labeled(generated.json.as_str(), name)
            .inspect_err(|err| warn!(error = %err, "Failed to export labeled QR code"))?;

        let file_name = naming::labeled_png_name(name, at);
        self.target
            .save(&file_name, RenderedArtifact::MIME, card.as_bytes())
            .await
    }

    /// Save the bare preview image as `sj-config-{ts}.png`
    pub async fn export_plain_qr(&self, at: DateTime<Utc>) -> Result<PathBuf> {
        let generated = self.require()?;
        let file_name = naming::plain_png_name(at);
        self.target
            .save(&file_name, RenderedArtifact::MIME, generated.preview.as_bytes())
            .await
    }

    /// Save the canonical JSON as `sj-token-{name}-{ts}.json`
    pub async fn export_json(&self, at: DateTime<Utc>) -> Result<PathBuf> {
        let generated = self.require()?;
        let file_name = naming::json_name(&generated.payload.name, at);
        self.target
            .save(&file_name, JSON_MIME, generated.json.as_bytes())
            .await
    }

    /// Forget the current result
    pub fn reset(&mut self) {
        if self.current.take().is_some() {
            info!("Session reset");
        }
    }

    fn require(&self) -> Result<&Generated> {
        self.current.as_ref().ok_or(Error::NothingGenerated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::export::DirectoryTarget;

    fn form() -> CredentialForm {
        CredentialForm::new("Team A", "ABC123", "XYZ789")
    }

    #[test]
    fn test_submit_stores_result() {
        let mut session = Generator::new(DirectoryTarget::new("unused"));
        let generated = session.submit(&form()).unwrap();
        assert_eq!(generated.payload.name, "Team A");
        assert!(generated.json.as_str().contains("\"SJ_API_KEY\": \"ABC123\""));
        assert!(session.current().is_some());
    }

    #[test]
    fn test_failed_submit_keeps_previous_result() {
        let mut session = Generator::new(DirectoryTarget::new("unused"));
        session.submit(&form()).unwrap();
        let before = session.current().unwrap().json.clone();

        let err = session
            .submit(&CredentialForm::new("", "ABC123", "XYZ789"))
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert_eq!(session.current().unwrap().json, before);
    }

    #[test]
    fn test_operations_require_a_result() {
        let session = Generator::new(DirectoryTarget::new("unused"));
        let mut clipboard = MemoryClipboard::new();
        assert!(matches!(
            session.copy_json(&mut clipboard),
            Err(Error::NothingGenerated)
        ));
        assert!(clipboard.contents().is_none());
    }

    #[test]
    fn test_copy_json_and_reset() {
        let mut session = Generator::new(DirectoryTarget::new("unused"));
        session.submit(&form()).unwrap();

        let mut clipboard = MemoryClipboard::new();
        session.copy_json(&mut clipboard).unwrap();
        assert_eq!(
            clipboard.contents(),
            Some(session.current().unwrap().json.as_str())
        );

        session.reset();
        assert!(session.current().is_none());
    }
}
