/// Image normalization: bound an arbitrary-resolution input to transmittable
/// dimensions and re-encode it as an opaque JPEG.
///
/// Two policies combine:
/// - very small inputs are upscaled so the shorter edge reaches `min_edge`
///   (the edit model performs poorly below that);
/// - everything is capped so the longer edge never exceeds `max_edge`,
///   keeping the upload payload bounded.
///
/// Aspect ratio is preserved throughout; an image already within bounds is
/// passed through at its original dimensions.
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, Rgb, RgbImage};

use crate::error::NormalizeError;

#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Upper bound on the longer edge.
    pub max_edge: u32,
    /// Floor for the shorter edge; smaller inputs are upscaled to reach it.
    pub min_edge: u32,
    /// JPEG quality of the re-encoded output.
    pub jpeg_quality: u8,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        NormalizeOptions {
            max_edge: 1024,
            min_edge: 256,
            jpeg_quality: 85,
        }
    }
}

/// A normalized, ready-to-transmit image.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Computes the output dimensions for an input of `width × height`.
pub fn target_dimensions(width: u32, height: u32, opts: &NormalizeOptions) -> (u32, u32) {
    let (w, h) = (width.max(1) as f64, height.max(1) as f64);

    // Upscale floor: bring the shorter edge up to min_edge, never downscale here.
    let floor = (opts.min_edge as f64 / w)
        .max(opts.min_edge as f64 / h)
        .max(1.0);
    let mut tw = (w * floor).ceil();
    let mut th = (h * floor).ceil();

    // Cap the longer edge.
    let longer = tw.max(th);
    if longer > opts.max_edge as f64 {
        let cap = opts.max_edge as f64 / longer;
        tw = (tw * cap).floor().max(1.0);
        th = (th * cap).floor().max(1.0);
    }

    (tw as u32, th as u32)
}

/// Decodes, resizes per [`target_dimensions`], flattens transparency onto a
/// white background, and re-encodes as JPEG.
///
/// Both decode and encode failures are explicit; no partially drawn output
/// is ever returned.
pub fn normalize(bytes: &[u8], opts: &NormalizeOptions) -> Result<NormalizedImage, NormalizeError> {
    let img = image::load_from_memory(bytes).map_err(NormalizeError::Decode)?;
    let (w, h) = (img.width(), img.height());
    let (tw, th) = target_dimensions(w, h, opts);

    let resized = if (tw, th) != (w, h) {
        img.resize_exact(tw, th, imageops::FilterType::Lanczos3)
    } else {
        img
    };

    let flat = flatten_onto_white(&resized);

    let mut out = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut out, opts.jpeg_quality);
    encoder.encode_image(&flat).map_err(NormalizeError::Encode)?;

    Ok(NormalizedImage {
        bytes: out,
        media_type: "image/jpeg",
        width: tw,
        height: th,
    })
}

/// Alpha-composites the image onto an opaque white background.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    let rgba = img.to_rgba8();
    let mut flat = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, px) in rgba.enumerate_pixels() {
        let a = px.0[3] as u32;
        let blend = |c: u8| ((c as u32 * a + 255 * (255 - a)) / 255) as u8;
        flat.put_pixel(x, y, Rgb([blend(px.0[0]), blend(px.0[1]), blend(px.0[2])]));
    }
    flat
}
