//! Clipboard sinks for the canonical JSON text

use crate::error::{Error, Result};

/// Something that can receive copied text
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// In-process clipboard, useful for headless runs and tests
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    /// Empty clipboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Last written text
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// The desktop clipboard, via `arboard`
#[cfg(feature = "clipboard")]
#[cfg_attr(docsrs, doc(cfg(feature = "clipboard")))]
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

#[cfg(feature = "clipboard")]
impl SystemClipboard {
    /// Connect to the desktop clipboard
    pub fn open() -> Result<Self> {
        let inner = arboard::Clipboard::new()
            .map_err(|e| Error::ClipboardWriteFailed(format!("Clipboard unavailable: {e}")))?;
        Ok(Self { inner })
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .map_err(|e| Error::ClipboardWriteFailed(e.to_string()))
    }
}

/// Used when the crate is built without clipboard support
#[cfg(not(feature = "clipboard"))]
pub struct SystemClipboard;

#[cfg(not(feature = "clipboard"))]
impl SystemClipboard {
    /// Always fails: clipboard support was not compiled in
    pub fn open() -> Result<Self> {
        Err(Error::ClipboardWriteFailed(
            "sjqr was built without the `clipboard` feature".to_string(),
        ))
    }
}

#[cfg(not(feature = "clipboard"))]
impl Clipboard for SystemClipboard {
    fn write_text(&mut self, _text: &str) -> Result<()> {
        Err(Error::ClipboardWriteFailed(
            "sjqr was built without the `clipboard` feature".to_string(),
        ))
    }
}
