// File: src/core/codec.rs
//! Printable encoding of ascending follower lists.
//!
//! The writer turns `[1, 2, 3, 5, 80]` into gaps `[1, 1, 1, 2, 75]`, drops one
//! from each gap (`[0, 0, 0, 1, 74]`), folds the run of zeros into a single
//! run token and prints the rest as base-32 varints, giving `"bA*B"`.
//!
//! * value byte: `< 0x60`; payload in the low 5 bits, low chunk first; bit
//!   `0x20` set means another chunk follows.
//! * run byte: `>= 0x60`; low 5 bits hold the number of zero gaps minus one.
//!
//! Encoded lines never contain `\n`, which keeps one list per corpus line.

use crate::core::sequence::IdSequence;
use crate::core::types::WordId;
use crate::error::{PhraseError, Result};

const RUN_MARKER: u8 = 0x60;
const CONTINUATION: u8 = 0x20;
const FINAL_CHUNK: u8 = 0x40;
const PAYLOAD_MASK: u8 = 0x1f;
const CHUNK_BITS: u32 = 5;
/// Longest run of zero gaps one run byte can carry.
const MAX_RUN: usize = (PAYLOAD_MASK as usize) + 1;

/// Decodes an encoded follower list back into its ascending ids.
pub fn decode(encoded: &[u8]) -> Result<IdSequence> {
    let mut out = IdSequence::with_capacity(encoded.len());
    let mut pos = 0;
    let mut total: WordId = 0;
    let mut zero_run = 0usize;

    while pos < encoded.len() || zero_run > 0 {
        let delta = if zero_run > 0 {
            zero_run -= 1;
            0
        } else if encoded[pos] >= RUN_MARKER {
            // The run byte itself accounts for the first zero gap.
            zero_run = (encoded[pos] & PAYLOAD_MASK) as usize;
            pos += 1;
            0
        } else {
            let (value, next) = read_varint(encoded, pos)?;
            pos = next;
            value
        };

        total = total
            .checked_add(delta)
            .and_then(|t| t.checked_add(1))
            .ok_or(PhraseError::DecodeFault { offset: pos, reason: "id overflows" })?;
        out.push(total);
    }
    Ok(out)
}

fn read_varint(encoded: &[u8], start: usize) -> Result<(usize, usize)> {
    let mut value = 0usize;
    let mut shift = 0u32;
    let mut pos = start;
    loop {
        let byte = *encoded.get(pos).ok_or(PhraseError::DecodeFault {
            offset: pos,
            reason: "continuation bit set on final byte",
        })?;
        let chunk = (byte & PAYLOAD_MASK) as usize;
        if shift >= usize::BITS || (chunk << shift) >> shift != chunk {
            return Err(PhraseError::DecodeFault { offset: pos, reason: "varint overflows" });
        }
        value |= chunk << shift;
        pos += 1;
        if byte & CONTINUATION == 0 {
            return Ok((value, pos));
        }
        shift += CHUNK_BITS;
    }
}

/// Encodes strictly ascending, non-zero ids. Inverse of [`decode`].
pub fn encode(ids: &[WordId]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(ids.len());
    let mut prev: WordId = 0;
    let mut run = 0usize;

    for &id in ids {
        if id <= prev {
            return Err(PhraseError::corrupt(format!(
                "follower list not strictly ascending at id {}",
                id
            )));
        }
        let gap = id - prev - 1;
        prev = id;
        if gap == 0 {
            run += 1;
            if run == MAX_RUN {
                flush_run(&mut out, &mut run);
            }
        } else {
            flush_run(&mut out, &mut run);
            write_varint(&mut out, gap);
        }
    }
    flush_run(&mut out, &mut run);
    Ok(out)
}

fn flush_run(out: &mut Vec<u8>, run: &mut usize) {
    if *run > 0 {
        out.push(RUN_MARKER | (*run - 1) as u8);
        *run = 0;
    }
}

fn write_varint(out: &mut Vec<u8>, mut value: usize) {
    loop {
        let chunk = (value as u8) & PAYLOAD_MASK;
        value >>= CHUNK_BITS;
        if value == 0 {
            out.push(FINAL_CHUNK | chunk);
            return;
        }
        out.push(CONTINUATION | chunk);
    }
}
