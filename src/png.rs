//! PNG chunk demuxing and decode.
//!
//! Signature check, chunk iteration, IHDR parsing. The DEFLATE/zlib payload inside
//! IDAT is decoded with this crate's own [`crate::zlib`]/[`crate::deflate`] rather
//! than an external codec.

use crate::crc32::crc32;
use crate::error::{Error, Result};
use crate::filter;
use crate::zlib;

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorType {
    Grayscale,
    Rgb,
    GrayscaleAlpha,
    Rgba,
}

impl ColorType {
    fn from_byte(b: u8) -> Result<(ColorType, u8)> {
        match b {
            0 => Ok((ColorType::Grayscale, 1)),
            2 => Ok((ColorType::Rgb, 3)),
            4 => Ok((ColorType::GrayscaleAlpha, 2)),
            6 => Ok((ColorType::Rgba, 4)),
            _ => Err(Error::FileFormatMismatch(format!(
                "unsupported PNG color type {b} (only grayscale, grayscale+alpha, RGB and RGBA are)"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct IHDR {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub channels: u8,
}

/// A decoded PNG: header metadata, fully reconstructed (unfiltered) pixel bytes, and
/// an integrity report (chunk CRC-32 / Adler-32 status).
#[derive(Clone, Debug)]
pub struct DecodedPng {
    pub ihdr: IHDR,
    pub pixels: Vec<u8>,
    pub chunk_crc_ok: bool,
    pub adler_ok: bool,
}

struct Chunk<'a> {
    kind: [u8; 4],
    data: &'a [u8],
}

fn iter_chunks(body: &[u8]) -> Result<Vec<(Chunk<'_>, bool)>> {
    let mut chunks = Vec::new();
    let mut offset = 0usize;
    while offset < body.len() {
        if offset + 8 > body.len() {
            return Err(Error::Truncated {
                needed: offset + 8 - body.len(),
                at: offset,
            });
        }
        let length = u32::from_be_bytes(body[offset..offset + 4].try_into().unwrap()) as usize;
        let mut kind = [0u8; 4];
        kind.copy_from_slice(&body[offset + 4..offset + 8]);
        let data_start = offset + 8;
        let data_end = data_start + length;
        if data_end + 4 > body.len() {
            return Err(Error::Truncated {
                needed: data_end + 4 - body.len(),
                at: data_end,
            });
        }
        let data = &body[data_start..data_end];
        let expected_crc =
            u32::from_be_bytes(body[data_end..data_end + 4].try_into().unwrap());
        log::debug!("PNG chunk: {}", String::from_utf8_lossy(&kind));

        let mut crc_input = Vec::with_capacity(4 + data.len());
        crc_input.extend_from_slice(&kind);
        crc_input.extend_from_slice(data);
        let actual_crc = crc32(&crc_input);
        let crc_ok = actual_crc == expected_crc;
        if !crc_ok {
            log::warn!(
                "chunk {} CRC mismatch: expected {:#010x}, got {:#010x}",
                String::from_utf8_lossy(&kind),
                expected_crc,
                actual_crc
            );
        }

        chunks.push((Chunk { kind, data }, crc_ok));
        offset = data_end + 4;
        if &kind == b"IEND" {
            break;
        }
    }
    Ok(chunks)
}

/// Decodes a PNG file's bytes into header metadata and reconstructed pixel bytes.
pub fn decode(input: &[u8]) -> Result<DecodedPng> {
    if input.len() < 8 || input[..8] != SIGNATURE {
        return Err(Error::NotPng);
    }
    let chunks = iter_chunks(&input[8..])?;

    let (ihdr_chunk, _) = chunks
        .first()
        .filter(|(c, _)| &c.kind == b"IHDR")
        .ok_or_else(|| Error::FileFormatMismatch("first chunk must be IHDR".into()))?;
    if ihdr_chunk.data.len() < 13 {
        return Err(Error::Truncated {
            needed: 13 - ihdr_chunk.data.len(),
            at: 0,
        });
    }
    let width = u32::from_be_bytes(ihdr_chunk.data[0..4].try_into().unwrap());
    let height = u32::from_be_bytes(ihdr_chunk.data[4..8].try_into().unwrap());
    let bit_depth = ihdr_chunk.data[8];
    let (color_type, channels) = ColorType::from_byte(ihdr_chunk.data[9])?;
    let compression_method = ihdr_chunk.data[10];
    let filter_method = ihdr_chunk.data[11];
    let interlace_method = ihdr_chunk.data[12];
    if compression_method != 0 || filter_method != 0 {
        return Err(Error::FileFormatMismatch(
            "unsupported PNG compression/filter method".into(),
        ));
    }
    if interlace_method != 0 {
        return Err(Error::FileFormatMismatch(
            "interlaced PNGs are not supported".into(),
        ));
    }
    log::debug!(
        "PNG IHDR: {}x{} bit_depth={} channels={}",
        width,
        height,
        bit_depth,
        channels
    );

    let mut idat = Vec::new();
    let mut chunk_crc_ok = true;
    for (chunk, crc_ok) in &chunks {
        if &chunk.kind == b"IDAT" {
            idat.extend_from_slice(chunk.data);
        }
        chunk_crc_ok &= crc_ok;
    }

    let decoded = zlib::decode(&idat)?;
    let row_bytes = filter::bpp_bytes(channels, bit_depth) * width as usize;
    let bpp = filter::bpp_bytes(channels, bit_depth).max(1);
    let pixels = filter::unfilter(&decoded.data, row_bytes, bpp)?;

    Ok(DecodedPng {
        ihdr: IHDR {
            width,
            height,
            bit_depth,
            color_type,
            channels,
        },
        pixels,
        chunk_crc_ok,
        adler_ok: decoded.adler_ok,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_signature() {
        let data = vec![0u8; 16];
        assert!(matches!(decode(&data), Err(Error::NotPng)));
    }

    #[test]
    fn color_type_maps_to_channel_count() {
        assert_eq!(ColorType::from_byte(0).unwrap().1, 1);
        assert_eq!(ColorType::from_byte(2).unwrap().1, 3);
        assert_eq!(ColorType::from_byte(4).unwrap().1, 2);
        assert_eq!(ColorType::from_byte(6).unwrap().1, 4);
        assert!(ColorType::from_byte(3).is_err());
    }
}
