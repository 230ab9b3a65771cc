//! Image conversion helpers.
//!
//! Decoding turns user-supplied image bytes (PNG/JPEG/BMP/GIF) into the flat,
//! [0, 1]-normalized grayscale vector a classifier expects; encoding renders a
//! dataset sample back into PNG bytes for display.

use std::io::Cursor;

use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageOutputFormat};

/// Decodes image bytes, resizes to `width × height`, converts to grayscale,
/// and normalizes pixels to [0, 1].
///
/// Returns a flat `Vec<f64>` of length `width * height`.
pub fn decode_grayscale(bytes: &[u8], width: u32, height: u32) -> Result<Vec<f64>, String> {
    let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let resized = img.resize_exact(width, height, FilterType::Lanczos3);
    let gray = resized.to_luma8();
    Ok(gray.pixels().map(|p| p.0[0] as f64 / 255.0).collect())
}

/// Encodes a flat [0, 1] grayscale pixel vector as a PNG.
///
/// `pixels.len()` must equal `width * height`; values outside [0, 1] are
/// clamped (standardized datasets produce negatives).
pub fn encode_grayscale_png(pixels: &[f64], width: u32, height: u32) -> Result<Vec<u8>, String> {
    let expected = (width as usize) * (height as usize);
    if pixels.len() != expected {
        return Err(format!(
            "Pixel count mismatch: {}×{} needs {} values, got {}.",
            width, height, expected, pixels.len()
        ));
    }

    let bytes: Vec<u8> = pixels.iter()
        .map(|&px| (px.clamp(0.0, 1.0) * 255.0).round() as u8)
        .collect();
    let img = GrayImage::from_raw(width, height, bytes)
        .ok_or_else(|| "Failed to build image buffer from pixel data.".to_owned())?;

    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img)
        .write_to(&mut out, ImageOutputFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_roundtrip_preserves_geometry() {
        let pixels: Vec<f64> = (0..16).map(|i| i as f64 / 15.0).collect();
        let png = encode_grayscale_png(&pixels, 4, 4).unwrap();
        // PNG signature.
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);

        let decoded = decode_grayscale(&png, 4, 4).unwrap();
        assert_eq!(decoded.len(), 16);
        // Corners survive the roundtrip up to quantization.
        assert!(decoded[0] < 0.05);
        assert!(decoded[15] > 0.95);
    }

    #[test]
    fn encode_rejects_wrong_pixel_count() {
        let err = encode_grayscale_png(&[0.0; 5], 4, 4).unwrap_err();
        assert!(err.contains("mismatch"), "unexpected error: {}", err);
    }

    #[test]
    fn encode_clamps_out_of_range_values() {
        let png = encode_grayscale_png(&[-1.0, 2.0, 0.5, 0.5], 2, 2).unwrap();
        let decoded = decode_grayscale(&png, 2, 2).unwrap();
        assert!(decoded[0] < 0.01);
        assert!(decoded[1] > 0.99);
    }

    #[test]
    fn decode_rejects_garbage_bytes() {
        assert!(decode_grayscale(&[1, 2, 3, 4], 4, 4).is_err());
    }
}
