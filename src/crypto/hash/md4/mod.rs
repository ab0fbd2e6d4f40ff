//! MD4 message digest, RFC 1320.

pub mod soft;

pub use soft::Md4;

use std::io::{self, Read};

use super::digest::Digest;

const INITIAL_STATE: [u32; 4] = [
    0x67452301,
    0xEFCDAB89,
    0x98BADCFE,
    0x10325476,
];

/// Additive constant of each round. Round 1 adds nothing.
const ROUND_CONSTANTS: [u32; 3] = [
    0x00000000,
    0x5A827999,
    0x6ED9EBA1,
];

/// Message word consumed by each of the 16 steps of a round.
const MESSAGE_INDEX: [[usize; 16]; 3] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15],
    [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15],
];

/// Left rotation of each step, cycling every four steps.
const SHIFTS: [[u32; 4]; 3] = [
    [3, 7, 11, 19],
    [3, 5, 9, 13],
    [3, 9, 11, 15],
];

#[inline(always)]
pub fn compute<T: AsRef<[u8]>>(data: T) -> Digest {
    Digest::new(Md4::oneshot(data))
}

/// Digests everything `reader` yields until EOF.
///
/// Returns the digest and the number of bytes consumed. Read errors abort the
/// computation and are returned unchanged.
pub fn process<R: Read>(mut reader: R) -> io::Result<(Digest, u64)> {
    let mut md4 = Md4::new();
    let mut buf = vec![0u8; super::ed2k::BUF_SIZE];
    let mut total = 0u64;
    loop {
        let n = crate::utils::read_full(&mut reader, &mut buf)?;
        if n == 0 {
            break;
        }
        md4.update(&buf[..n]);
        total += n as u64;
    }
    Ok((Digest::new(md4.finalize()), total))
}
