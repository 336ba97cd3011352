//! Generate a labeled credential QR code and save it to the current directory
//!
//! Usage: cargo run --example generate_qr

use chrono::Utc;
use sjqr::{CredentialForm, DirectoryTarget, Generator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut session = Generator::new(DirectoryTarget::new("."));
    let generated = session.submit(&CredentialForm::new("Team A", "ABC123", "XYZ789"))?;

    println!("Payload:\n{}", generated.json);
    println!(
        "Preview: {}x{} ({} PNG bytes)",
        generated.preview.width,
        generated.preview.height,
        generated.preview.png.len()
    );

    let now = Utc::now();
    let card = session.export_qr(now).await?;
    println!("✓ Labeled QR code saved to {}", card.display());

    let plain = session.export_plain_qr(now).await?;
    println!("✓ Plain QR code saved to {}", plain.display());

    let json = session.export_json(now).await?;
    println!("✓ JSON saved to {}", json.display());

    Ok(())
}
