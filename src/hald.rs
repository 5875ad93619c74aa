//! HALD CLUT image decoding.
//!
//! A HALD LUT of level `n` is a square image of side `n^3` holding an `n^2`-resolution
//! cube: `side^2 = (n^3)^2 = n^6 = (n^2)^3 = res^3`, so pixel count equals vertex count
//! exactly and linear pixel index equals linear grid index in R-fastest order.

use crate::error::{Error, Result};
use crate::lut::grid::LutGrid;
use crate::png::{self, ColorType};
use crate::rgb::Rgb;

/// Decodes a HALD CLUT PNG into an `f64` [`LutGrid`] over the domain `[0, 1]`.
pub fn decode(input: &[u8]) -> Result<LutGrid<f64>> {
    let decoded = png::decode(input)?;
    if !decoded.chunk_crc_ok {
        log::warn!("HALD PNG decoded with one or more chunk CRC mismatches");
    }
    if !decoded.adler_ok {
        log::warn!("HALD PNG decoded with an Adler-32 mismatch");
    }

    let ihdr = &decoded.ihdr;
    if ihdr.width != ihdr.height {
        return Err(Error::FileFormatMismatch(format!(
            "HALD image must be square, got {}x{}",
            ihdr.width, ihdr.height
        )));
    }
    let side = ihdr.width as usize;
    let level = (side as f64).cbrt().round() as usize;
    if level * level * level != side {
        return Err(Error::FileFormatMismatch(format!(
            "HALD image side length {side} is not a perfect cube"
        )));
    }
    if level < 2 {
        return Err(Error::FileFormatMismatch(format!(
            "HALD level must be at least 2, got {level}"
        )));
    }
    let res = level * level;
    let pixel_count = side * side;

    let channels = match ihdr.color_type {
        ColorType::Rgb => 3usize,
        ColorType::Rgba => 4usize,
        ColorType::Grayscale | ColorType::GrayscaleAlpha => {
            return Err(Error::FileFormatMismatch(
                "HALD images must be RGB or RGBA".into(),
            ))
        }
    };
    let max_value = match ihdr.bit_depth {
        8 => 255.0f64,
        16 => 65535.0f64,
        other => {
            return Err(Error::FileFormatMismatch(format!(
                "unsupported HALD bit depth {other}"
            )))
        }
    };
    let bytes_per_channel = (ihdr.bit_depth / 8) as usize;
    let bytes_per_pixel = channels * bytes_per_channel;
    let expected_bytes = pixel_count * bytes_per_pixel;
    if decoded.pixels.len() < expected_bytes {
        return Err(Error::Truncated {
            needed: expected_bytes - decoded.pixels.len(),
            at: decoded.pixels.len(),
        });
    }

    let read_channel = |offset: usize| -> f64 {
        if bytes_per_channel == 1 {
            decoded.pixels[offset] as f64 / max_value
        } else {
            let hi = decoded.pixels[offset] as u16;
            let lo = decoded.pixels[offset + 1] as u16;
            ((hi << 8) | lo) as f64 / max_value
        }
    };

    let mut samples = vec![Rgb::splat(0.0); res * res * res];
    for i in 0..pixel_count {
        let base = i * bytes_per_pixel;
        let r = read_channel(base);
        let g = read_channel(base + bytes_per_channel);
        let b = read_channel(base + 2 * bytes_per_channel);
        samples[i] = Rgb::new(r, g, b);
    }

    log::debug!("decoded HALD level {} ({}x{} image, res={})", level, side, side, res);
    LutGrid::new_cubic(res, samples, Rgb::splat(0.0), Rgb::splat(1.0))
}
