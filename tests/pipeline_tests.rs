use std::io::Cursor;

use viewwear::error::{IntakeError, NormalizeError};
use viewwear::intake::{accepts_drop, safe_filename, validate_upload, MAX_UPLOAD_BYTES};
use viewwear::normalize::{normalize, target_dimensions, NormalizeOptions};

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([120, 80, 40, 255]));
    let mut out = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageOutputFormat::Png)
        .unwrap();
    out.into_inner()
}

// ── Intake ─────────────────────────────────────────────────────────────────

#[test]
fn upload_at_exactly_the_ceiling_is_accepted() {
    // Trailing padding does not disturb format sniffing.
    let mut bytes = png_bytes(4, 4);
    bytes.resize(MAX_UPLOAD_BYTES, 0);
    assert!(validate_upload(&bytes).is_ok());
}

#[test]
fn upload_one_byte_over_the_ceiling_is_rejected() {
    let mut bytes = png_bytes(4, 4);
    bytes.resize(MAX_UPLOAD_BYTES + 1, 0);
    match validate_upload(&bytes) {
        Err(IntakeError::TooLarge { got, max }) => {
            assert_eq!(got, MAX_UPLOAD_BYTES + 1);
            assert_eq!(max, MAX_UPLOAD_BYTES);
        }
        other => panic!("expected TooLarge, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn non_image_payload_is_rejected() {
    assert!(matches!(
        validate_upload(b"definitely not an image"),
        Err(IntakeError::NotAnImage)
    ));
}

#[test]
fn empty_payload_is_rejected() {
    assert!(matches!(validate_upload(&[]), Err(IntakeError::Empty)));
}

#[test]
fn drop_gate_only_accepts_image_media_types() {
    assert!(accepts_drop("image/png"));
    assert!(accepts_drop("IMAGE/JPEG"));
    assert!(!accepts_drop("text/plain"));
    assert!(!accepts_drop("application/pdf"));
    assert!(!accepts_drop(""));
}

#[test]
fn safe_filename_neutralizes_paths_and_spaces() {
    let name = safe_filename("my photo.png");
    assert!(name.ends_with("_my_photo.png"));
    assert!(!name.contains(' '));

    let sneaky = safe_filename("../../etc/passwd");
    assert!(!sneaky.contains('/'));
    assert!(!sneaky.contains(".."));

    let windows = safe_filename("..\\boot.ini");
    assert!(!windows.contains('\\'));
    assert!(!windows.contains(".."));
}

// ── Normalization ──────────────────────────────────────────────────────────

#[test]
fn oversized_image_is_capped_preserving_aspect() {
    let opts = NormalizeOptions::default();
    let out = normalize(&png_bytes(2048, 1024), &opts).unwrap();
    assert_eq!((out.width, out.height), (1024, 512));
    assert_eq!(out.media_type, "image/jpeg");

    let decoded = image::load_from_memory(&out.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1024, 512));
}

#[test]
fn in_bounds_image_keeps_its_dimensions() {
    let opts = NormalizeOptions::default();
    let out = normalize(&png_bytes(800, 600), &opts).unwrap();
    assert_eq!((out.width, out.height), (800, 600));
}

#[test]
fn tiny_image_is_upscaled_to_the_floor() {
    let opts = NormalizeOptions::default();
    let out = normalize(&png_bytes(100, 50), &opts).unwrap();
    // Shorter edge reaches the 256 floor; aspect ratio 2:1 preserved.
    assert_eq!((out.width, out.height), (512, 256));
}

#[test]
fn longer_edge_never_exceeds_the_bound() {
    let opts = NormalizeOptions::default();
    for (w, h) in [(1, 1), (5000, 3), (3, 5000), (1024, 1024), (1025, 1024)] {
        let (tw, th) = target_dimensions(w, h, &opts);
        assert!(tw.max(th) <= opts.max_edge, "{}x{} -> {}x{}", w, h, tw, th);
        assert!(tw >= 1 && th >= 1);
    }
}

#[test]
fn aspect_ratio_is_preserved_within_rounding() {
    let opts = NormalizeOptions::default();
    let (tw, th) = target_dimensions(3000, 2000, &opts);
    let input = 3000.0 / 2000.0;
    let output = tw as f64 / th as f64;
    assert!((input - output).abs() < 0.01, "{}x{}", tw, th);
}

#[test]
fn transparency_is_flattened_onto_white() {
    let img = image::RgbaImage::from_pixel(300, 300, image::Rgba([0, 0, 0, 0]));
    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .unwrap();

    let out = normalize(&png.into_inner(), &NormalizeOptions::default()).unwrap();
    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgb8();
    let px = decoded.get_pixel(150, 150);
    // JPEG is lossy; the fully transparent input must still come out white.
    assert!(px.0.iter().all(|&c| c > 250), "pixel was {:?}", px);
}

#[test]
fn undecodable_input_fails_explicitly() {
    let result = normalize(b"not an image at all", &NormalizeOptions::default());
    assert!(matches!(result, Err(NormalizeError::Decode(_))));
}
