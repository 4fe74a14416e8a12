// Copyright 2024-2026 The Pedersen-RS Authors.
//
// Code is licensed under GPLv3.0 License.

//! Chunking and padding of secrets.
//!
//! Secrets larger than the group order cannot be a single polynomial
//! intercept, so the byte string is cut into chunks that each map to an
//! integer strictly below q. The mapping must be lossless for leading
//! zero bytes too, so every chunk carries a 4-byte trailer holding its
//! leading-zero count: pad(c) = (int(c) << 32) | zeros(c).

use crate::big::Int;
use crate::errors::Result;

/// Bytes reserved at the end of every chunk for the leading-zeros count.
pub(crate) const TRAILER_BYTES: usize = 4;

fn leading_zeros(buf: &[u8]) -> u64 {
    buf.iter().take_while(|b| **b == 0).count() as u64
}

/// Number of secret bytes per chunk for the given subgroup order.
pub(crate) fn part_len(order: &Int) -> usize {
    let len = (order.bit_length() / 8).saturating_sub(TRAILER_BYTES);

    if len == 0 {
        1
    } else {
        len
    }
}

/// Maps chunk bytes to an integer, recording the leading-zero count in
/// the low 32 bits.
pub(crate) fn pad(buf: &[u8]) -> Int {
    let zeros = Int::from_u64(leading_zeros(buf));
    let n = Int::from_bytes_be(buf);

    let mut padded = n.lshift(TRAILER_BYTES * 8).bitor(&zeros);
    padded.set_constant_time();

    padded
}

/// Inverts [`pad`]: emits the recorded number of zero bytes followed by
/// the minimal big-endian bytes of the remaining value.
pub(crate) fn unpad(n: &Int) -> Result<Vec<u8>> {
    let mask = Int::from_u64(0x0000_0000_FFFF_FFFF);
    let zeros = n.bitand(&mask).to_u64().unwrap_or(0) as usize;

    let value = n.rshift(TRAILER_BYTES * 8);

    let mut out = vec![0u8; zeros];
    out.extend_from_slice(&value.to_bytes_be());

    Ok(out)
}

/// Cuts a secret into padded sub-q integers. The final chunk may be
/// shorter than the others.
pub(crate) fn split_secret(secret: &[u8], order: &Int) -> Vec<Int> {
    let part_len = part_len(order);
    let part_count = (secret.len() + part_len - 1) / part_len;

    let mut chunks = Vec::with_capacity(part_count);

    for part in secret.chunks(part_len) {
        chunks.push(pad(part));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Int {
        Int::from_dec_str("8817354639505262309").unwrap()
    }

    #[test]
    fn test_part_len() {
        // 63-bit order: 7 whole bytes minus the 4-byte trailer
        assert_eq!(part_len(&order()), 3);
        // a full 64-bit order leaves one more byte per chunk
        assert_eq!(part_len(&Int::from_dec_str("17634709279010524619").unwrap()), 4);
        // tiny orders still move one byte per chunk
        assert_eq!(part_len(&Int::from_u64(0xffff)), 1);
    }

    #[test]
    fn test_pad_unpad_roundtrip() {
        let cases: [&[u8]; 7] = [
            b"",
            b"\x00",
            b"\x00\x00\x00",
            b"\x01\x02\x03",
            b"\x00\x00\x01\x02",
            b"\xff\xff\xff\xff",
            b"\x00\x2d",
        ];

        for case in cases {
            let padded = pad(case);
            assert_eq!(unpad(&padded).unwrap(), case, "case {case:?}");
        }
    }

    #[test]
    fn test_pad_records_zeros() {
        let padded = pad(b"\x00\x00\x07");
        // low 32 bits hold the zero count
        assert_eq!(padded.bitand(&Int::from_u64(0xffffffff)), Int::from_u64(2));
        assert_eq!(padded.rshift(32), Int::from_u64(7));
    }

    #[test]
    fn test_split_secret_chunk_count() {
        let order = order();

        assert_eq!(split_secret(b"abc", &order).len(), 1);
        assert_eq!(split_secret(b"test", &order).len(), 2);
        assert_eq!(split_secret(&[0u8; 128], &order).len(), 43);
    }

    #[test]
    fn test_split_secret_reassembles() {
        let order = order();
        let secret = [0x00, 0x00, 0x2d, 0x33, 0x00, 0x00, 0xe7, 0x00, 0x00, 0x1c];

        let chunks = split_secret(&secret, &order);

        let mut reassembled = Vec::new();
        for chunk in &chunks {
            reassembled.extend_from_slice(&unpad(chunk).unwrap());
        }

        assert_eq!(reassembled, secret);
    }

    #[test]
    fn test_chunks_stay_below_order_for_typical_data() {
        let order = order();

        for chunk in split_secret(b"The quick brown fox jumps over the lazy dog", &order) {
            assert!(chunk < order);
            assert!(chunk.is_constant_time());
        }
    }
}
