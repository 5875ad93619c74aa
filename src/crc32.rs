//! CRC-32 (ISO 3309 / PNG, reflected polynomial 0xEDB88320) used to validate PNG chunks.

const POLY: u32 = 0xEDB8_8320;

fn table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (n, entry) in table.iter_mut().enumerate() {
        let mut c = n as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 { POLY ^ (c >> 1) } else { c >> 1 };
        }
        *entry = c;
    }
    table
}

/// Computes the CRC-32 of `data` using the reflected polynomial 0xEDB88320, an
/// initial value of all-ones and a final XOR of all-ones.
pub fn crc32(data: &[u8]) -> u32 {
    let table = table();
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = table[index] ^ (crc >> 8);
    }
    crc ^ 0xFFFF_FFFF
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_known_vector() {
        let expected = u32::from_be_bytes(hex::decode("cbf43926").unwrap().try_into().unwrap());
        assert_eq!(crc32(b"123456789"), expected);
    }

    #[test]
    fn empty_input_is_zero() {
        assert_eq!(crc32(b""), 0);
    }

    #[test]
    fn ihdr_like_buffer() {
        // "IHDR" + width=512 + height=512 + bit_depth=8 + color_type=2 + 0,0,0
        let mut data = Vec::new();
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&512u32.to_be_bytes());
        data.extend_from_slice(&512u32.to_be_bytes());
        data.extend_from_slice(&[8, 2, 0, 0, 0]);
        assert_eq!(crc32(&data), 0x7B1A_43AD);
    }
}
