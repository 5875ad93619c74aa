//! zlib stream framing (RFC 1950) around the raw DEFLATE bitstream.
//!
//! A 2-byte header, the raw DEFLATE payload, then a big-endian Adler-32 trailer. A
//! checksum mismatch is reported but does not fail decoding on its own: callers get
//! the decoded bytes plus an integrity flag.

use crate::bitstream::BitCursor;
use crate::deflate;
use crate::error::{Error, Result};

const ADLER_MODULUS: u32 = 65521;

/// Outcome of a zlib decode: the inflated bytes plus whether the trailing Adler-32
/// checksum matched.
#[derive(Clone, Debug)]
pub struct Decoded {
    pub data: Vec<u8>,
    pub adler_ok: bool,
}

/// Computes the Adler-32 checksum (RFC 1950 §9) of `data`.
pub fn adler32(data: &[u8]) -> u32 {
    let mut a: u32 = 1;
    let mut b: u32 = 0;
    for &byte in data {
        a = (a + byte as u32) % ADLER_MODULUS;
        b = (b + a) % ADLER_MODULUS;
    }
    (b << 16) | a
}

/// Decodes a full zlib stream: 2-byte header, DEFLATE payload, 4-byte Adler-32
/// trailer (big-endian).
pub fn decode(input: &[u8]) -> Result<Decoded> {
    if input.len() < 6 {
        return Err(Error::Truncated {
            needed: 6 - input.len(),
            at: 0,
        });
    }
    let cmf = input[0];
    let flg = input[1];
    if (cmf as u16 * 256 + flg as u16) % 31 != 0 {
        return Err(Error::BadZlibHeader);
    }
    if cmf & 0x0F != 8 {
        return Err(Error::BadZlibHeader);
    }
    let window_log = (cmf >> 4) & 0x0F;
    if window_log > 7 {
        return Err(Error::BadZlibHeader);
    }
    if flg & 0x20 != 0 {
        return Err(Error::PresetDictUnsupported);
    }
    log::debug!("zlib header: cmf={:#04x} flg={:#04x}", cmf, flg);

    let trailer_start = input.len() - 4;
    let body = &input[2..trailer_start];
    let expected_adler = u32::from_be_bytes([
        input[trailer_start],
        input[trailer_start + 1],
        input[trailer_start + 2],
        input[trailer_start + 3],
    ]);

    let mut cursor = BitCursor::new(body);
    let mut data = Vec::new();
    deflate::decode_blocks(&mut cursor, &mut data)?;

    let actual_adler = adler32(&data);
    let adler_ok = actual_adler == expected_adler;
    if !adler_ok {
        log::warn!(
            "Adler-32 mismatch: expected {:#010x}, got {:#010x}",
            expected_adler,
            actual_adler
        );
    }
    Ok(Decoded { data, adler_ok })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adler32_matches_known_vector() {
        // "Wikipedia" -> 0x11E60398 per RFC 1950 worked examples in common references.
        assert_eq!(adler32(b"Wikipedia"), 0x11E6_0398);
    }

    #[test]
    fn empty_input_adler_is_one() {
        assert_eq!(adler32(b""), 1);
    }

    #[test]
    fn rejects_non_deflate_cm() {
        // cmf low nibble = 7 (not 8 = deflate)
        let data = [0x07u8, 0x00, 0, 0, 0, 1];
        assert!(matches!(decode(&data), Err(Error::BadZlibHeader)));
    }

    #[test]
    fn rejects_preset_dictionary() {
        // cmf=0x78 (cm=8, cinfo=7), flg with FDICT bit set and correct check value
        let cmf = 0x78u8;
        let mut flg = 0x20u8;
        // find an flg value with FDICT set that also satisfies the mod-31 check
        while (cmf as u16 * 256 + flg as u16) % 31 != 0 {
            flg += 1;
        }
        let data = [cmf, flg, 0, 0, 0, 1];
        assert!(matches!(decode(&data), Err(Error::PresetDictUnsupported)));
    }

    #[test]
    fn decodes_stored_block_with_correct_adler() {
        let payload = b"Hi";
        let adler = adler32(payload);
        let mut body = vec![0b0000_0001u8];
        body.push(2);
        body.push(0);
        body.push(!2u8);
        body.push(0xFF);
        body.extend_from_slice(payload);

        let mut data = vec![0x78u8, 0x01];
        // fix flg to satisfy header check with FLEVEL=0, FDICT=0
        let cmf = data[0];
        let mut flg = 0x00u8;
        while (cmf as u16 * 256 + flg as u16) % 31 != 0 {
            flg += 1;
        }
        data[1] = flg;
        data.extend_from_slice(&body);
        data.extend_from_slice(&adler.to_be_bytes());

        let decoded = decode(&data).unwrap();
        assert_eq!(decoded.data, payload);
        assert!(decoded.adler_ok);
    }
}
