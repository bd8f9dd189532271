// SPDX-License-Identifier: MIT OR Apache-2.0

#![allow(dead_code)]

/// Reads fuzz input front to back, yielding zeros once exhausted.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn next_u8(&mut self) -> u8 {
        let out = self.data.get(self.pos).copied().unwrap_or(0);
        self.pos = self.pos.saturating_add(1);
        out
    }

    pub fn next_i16(&mut self) -> i16 {
        i16::from_le_bytes([self.next_u8(), self.next_u8()])
    }

    /// Next `len` bytes, zero-padded past the end of input.
    pub fn take_padded(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.next_u8()).collect()
    }
}

/// Maps `seed` into `min..=max`.
pub fn bounded(seed: u8, min: usize, max: usize) -> usize {
    if max <= min {
        return min;
    }
    min + usize::from(seed) % (max - min + 1)
}

/// Little-endian f64s from 8-byte chunks, at most `limit` of them.
pub fn decode_f64_chunks(bytes: &[u8], limit: usize) -> Vec<f64> {
    bytes
        .chunks_exact(8)
        .take(limit)
        .map(|chunk| {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect()
}
