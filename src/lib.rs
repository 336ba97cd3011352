//! sjqr - Shioaji API credential QR codes
//!
//! Turns a name plus a Shioaji API key / secret key pair into a canonical JSON
//! document and renders it as a scannable QR code, either bare or on a labeled
//! card ready for printing or sharing.
//!
//! # Features
//!
//! - **Canonical payload**: fixed key order and formatting, identical bytes for identical input
//! - **Labeled cards**: title, name and footer composed around the QR symbol
//! - **Exports**: PNG and JSON files with predictable names, optional clipboard copy
//!
//! # Example
//!
//! ```no_run
//! use sjqr::{CredentialForm, DirectoryTarget, Generator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut session = Generator::new(DirectoryTarget::new("out"));
//!     let generated = session.submit(&CredentialForm::new("Team A", "ABC123", "XYZ789"))?;
//!     println!("{}", generated.json);
//!
//!     let path = session.export_qr(chrono::Utc::now()).await?;
//!     println!("Saved {}", path.display());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod logging;
pub mod naming;
pub mod payload;
pub mod qr;
pub mod session;
pub mod theme;

// Re-exports for convenience
pub use error::{Error, Field, FieldError, Result};

pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use config::{ExportOptions, LogRotation, LoggingOptions, SjqrConfig, ThemeOptions};
pub use export::{DirectoryTarget, ExportTarget};
pub use form::CredentialForm;
pub use payload::{CanonicalJson, CredentialPayload, build};
pub use qr::{ArtifactKind, QrEncoder, QrRenderer, RenderStyle, RenderedArtifact};
pub use session::{Generated, Generator};
pub use theme::{Appearance, ThemeMode, ThemeStore};
