use image::{GrayImage, Luma};
use sjqr::{QrRenderer, build};

/// Decode the first QR code found in a PNG buffer
fn decode_png(png: &[u8]) -> String {
    let image = image::load_from_memory(png).expect("decode png").to_luma8();

    // Give the detector some paper around the symbol, as a printed page would.
    let border = 40;
    let mut page = GrayImage::from_pixel(
        image.width() + border * 2,
        image.height() + border * 2,
        Luma([255u8]),
    );
    image::imageops::replace(&mut page, &image, i64::from(border), i64::from(border));

    let mut prepared = rqrr::PreparedImage::prepare(page);
    let grids = prepared.detect_grids();
    assert!(!grids.is_empty(), "no QR code detected");

    let (_meta, content) = grids[0].decode().expect("decode QR grid");
    content
}

#[test]
fn plain_image_decodes_to_json() {
    let json = build("Team A", "ABC123", "XYZ789");
    let artifact = QrRenderer::new().render_plain(json.as_str()).unwrap();

    assert_eq!(decode_png(artifact.as_bytes()), json.as_str());
}

#[test]
fn labeled_image_decodes_to_json() {
    let json = build("Team A", "ABC123", "XYZ789");
    let artifact = QrRenderer::new()
        .render_labeled(json.as_str(), "Team A")
        .unwrap();

    assert_eq!((artifact.width, artifact.height), (384, 474));
    assert_eq!(decode_png(artifact.as_bytes()), json.as_str());
}

#[test]
fn longer_keys_still_decode() {
    let api_key = "A".repeat(64);
    let secret_key = "s3cr3t-".repeat(9);
    let json = build("Long Keys Bot", &api_key, &secret_key);
    let artifact = QrRenderer::new()
        .render_labeled(json.as_str(), "Long Keys Bot")
        .unwrap();

    assert_eq!(decode_png(artifact.as_bytes()), json.as_str());
}

#[test]
fn unicode_name_round_trips() {
    let json = build("交易機器人", "ABC123", "XYZ789");
    let artifact = QrRenderer::new().render_plain(json.as_str()).unwrap();

    assert_eq!(decode_png(artifact.as_bytes()), json.as_str());
}
