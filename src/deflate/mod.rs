//! DEFLATE block decoder (RFC 1951).
//!
//! One function per block type, all dispatching off the same 3-bit header, with
//! `log::debug!`/`log::trace!` tracing for visibility into block-by-block progress.

pub mod tables;

use crate::bitstream::BitCursor;
use crate::error::{Error, Result};
use crate::huffman::{Tree, MAX_CL_CODE_LENGTH, MAX_CODE_LENGTH};
use tables::{CL_ORDER, DISTANCE_TABLE, END_OF_BLOCK, LENGTH_TABLE, MAX_WINDOW_SIZE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockType {
    Stored,
    Fixed,
    Dynamic,
}

#[derive(Clone, Copy, Debug)]
pub struct BlockHeader {
    pub is_final: bool,
    pub block_type: BlockType,
}

/// Decodes every DEFLATE block in `cursor` into `output`, stopping after the block
/// with `BFINAL=1` completes. `cursor` must be positioned at the first block header.
pub fn decode_blocks(cursor: &mut BitCursor, output: &mut Vec<u8>) -> Result<()> {
    loop {
        let header = read_block_header(cursor)?;
        log::debug!(
            "deflate block: final={} type={:?}",
            header.is_final,
            header.block_type
        );
        match header.block_type {
            BlockType::Stored => decode_stored(cursor, output)?,
            BlockType::Fixed => {
                let lit_tree = Tree::build(&tables::fixed_litlen_lengths(), MAX_CODE_LENGTH)?;
                let dist_tree = Tree::build(&tables::fixed_distance_lengths(), MAX_CODE_LENGTH)?;
                decode_symbols(cursor, output, &lit_tree, &dist_tree)?;
            }
            BlockType::Dynamic => decode_dynamic(cursor, output)?,
        }
        if header.is_final {
            break;
        }
    }
    Ok(())
}

fn read_block_header(cursor: &mut BitCursor) -> Result<BlockHeader> {
    let is_final = cursor.read_bits(1)? == 1;
    let block_type = match cursor.read_bits(2)? {
        0 => BlockType::Stored,
        1 => BlockType::Fixed,
        2 => BlockType::Dynamic,
        3 => return Err(Error::ReservedBtype),
        _ => unreachable!(),
    };
    Ok(BlockHeader {
        is_final,
        block_type,
    })
}

fn decode_stored(cursor: &mut BitCursor, output: &mut Vec<u8>) -> Result<()> {
    cursor.align_to_byte();
    let len = cursor.read_bits(16)?;
    let nlen = cursor.read_bits(16)?;
    if nlen != (!len) & 0xFFFF {
        return Err(Error::CorruptStored);
    }
    let bytes = cursor.read_aligned_bytes(len as usize)?;
    output.extend_from_slice(bytes);
    Ok(())
}

/// Shared literal/length symbol loop for FIXED and DYNAMIC blocks.
fn decode_symbols(
    cursor: &mut BitCursor,
    output: &mut Vec<u8>,
    lit_tree: &Tree,
    dist_tree: &Tree,
) -> Result<()> {
    loop {
        let symbol = cursor.read_huffman(lit_tree)?;
        if symbol < END_OF_BLOCK {
            output.push(symbol as u8);
        } else if symbol == END_OF_BLOCK {
            return Ok(());
        } else if symbol <= 285 {
            let (extra_bits, base_len) = LENGTH_TABLE[(symbol - 257) as usize];
            let length =
                base_len + if extra_bits > 0 { cursor.read_bits(extra_bits)? } else { 0 };

            let dist_symbol = cursor.read_huffman(dist_tree)?;
            if dist_symbol as usize >= DISTANCE_TABLE.len() {
                return Err(Error::ReservedCode);
            }
            let (dist_extra, dist_base) = DISTANCE_TABLE[dist_symbol as usize];
            let distance = dist_base
                + if dist_extra > 0 {
                    cursor.read_bits(dist_extra)?
                } else {
                    0
                };

            let max_distance = output.len().min(MAX_WINDOW_SIZE);
            if distance == 0 || distance as usize > max_distance {
                return Err(Error::BadDistance {
                    distance: distance as usize,
                    max: max_distance,
                });
            }
            log::trace!("back-reference: distance={} length={}", distance, length);
            copy_backreference(output, distance as usize, length as usize);
        } else {
            // 286, 287: reserved, must not appear.
            return Err(Error::ReservedCode);
        }
    }
}

/// Copies `length` bytes from `distance` bytes behind the current end of `output`,
/// one byte at a time so overlapping references (`length > distance`) see bytes they
/// themselves just emitted.
fn copy_backreference(output: &mut Vec<u8>, distance: usize, length: usize) {
    let start = output.len() - distance;
    for i in 0..length {
        let byte = output[start + i];
        output.push(byte);
    }
}

/// Encode direction is out of scope for this crate; callers get an explicit error
/// rather than a silent no-op.
pub fn encode_blocks(_input: &[u8]) -> Result<Vec<u8>> {
    Err(Error::NotImplemented("DEFLATE encoding is not implemented"))
}

fn decode_dynamic(cursor: &mut BitCursor, output: &mut Vec<u8>) -> Result<()> {
    let hlit = cursor.read_bits(5)? + tables::MIN_HLIT;
    let hdist = cursor.read_bits(5)? + tables::MIN_HDIST;
    let hclen = cursor.read_bits(4)? + tables::MIN_HCLEN;

    let mut cl_lens = vec![0u16; 19];
    for &position in CL_ORDER.iter().take(hclen as usize) {
        cl_lens[position] = cursor.read_bits(3)? as u16;
    }
    let cl_tree = Tree::build(&cl_lens, MAX_CL_CODE_LENGTH)?;

    let total = (hlit + hdist) as usize;
    let mut lens: Vec<u16> = Vec::with_capacity(total);
    while lens.len() < total {
        let symbol = cursor.read_huffman(&cl_tree)?;
        match symbol {
            0..=15 => lens.push(symbol),
            16 => {
                let repeat = 3 + cursor.read_bits(2)?;
                let previous = *lens.last().ok_or(Error::InvalidCode)?;
                for _ in 0..repeat {
                    lens.push(previous);
                }
            }
            17 => {
                let repeat = 3 + cursor.read_bits(3)?;
                for _ in 0..repeat {
                    lens.push(0);
                }
            }
            18 => {
                let repeat = 11 + cursor.read_bits(7)?;
                for _ in 0..repeat {
                    lens.push(0);
                }
            }
            _ => return Err(Error::InvalidCode),
        }
    }
    if lens.len() != total {
        return Err(Error::InvalidCode);
    }

    let (lit_lens, dist_lens) = lens.split_at(hlit as usize);
    let lit_tree = Tree::build(lit_lens, MAX_CODE_LENGTH)?;
    let dist_tree = Tree::build(dist_lens, MAX_CODE_LENGTH)?;
    decode_symbols(cursor, output, &lit_tree, &dist_tree)
}
