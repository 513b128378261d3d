//! MD4 (RFC 1320) message digest.
//!
//! MD4 is broken: full collisions can be produced by hand. It is kept only because legacy
//! content-addressing schemes (eDonkey2000 file and chunk hashes, among others) mandate it.
//! Do NOT use it for anything security-sensitive.
//!
//! The engine is a single pure function. Whole blocks are read straight from the caller's
//! buffer; only the padded tail is assembled in a small scratch area, so hashing never copies
//! the input.

use crate::error::{Error, Result};
use log::trace;

/// The size of the MD4 digest in bytes (128 bits = 16 bytes).
pub const MD4_OUTPUT_SIZE: usize = 16;

/// The size of one MD4 message block in bytes (512 bits).
pub const MD4_BLOCK_SIZE: usize = 64;

/// Offset of the 64-bit length field inside the final block.
const LENGTH_OFFSET: usize = 56;

/// The initial values for (A, B, C, D) from RFC 1320.
static INIT_A: u32 = 0x67452301;
static INIT_B: u32 = 0xEFCDAB89;
static INIT_C: u32 = 0x98BADCFE;
static INIT_D: u32 = 0x10325476;

/// Additive constant of round 2 (sqrt(2) * 2^30).
const ROUND2_K: u32 = 0x5A827999;
/// Additive constant of round 3 (sqrt(3) * 2^30).
const ROUND3_K: u32 = 0x6ED9EBA1;

/// Message word consumed at each step of round 2.
static ROUND2_ORDER: [usize; 16] = [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15];

/// Message word consumed at each step of round 3 (bit-reversed step index).
static ROUND3_ORDER: [usize; 16] = [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15];

/// The amount of left rotation performed in each MD4 step, grouped by round.
#[rustfmt::skip]
static S: [u32; 48] = [
    // Round 1
    3, 7, 11, 19,  3, 7, 11, 19,  3, 7, 11, 19,  3, 7, 11, 19,
    // Round 2
    3, 5, 9, 13,   3, 5, 9, 13,   3, 5, 9, 13,   3, 5, 9, 13,
    // Round 3
    3, 9, 11, 15,  3, 9, 11, 15,  3, 9, 11, 15,  3, 9, 11, 15,
];

/// Running state (A, B, C, D), owned by exactly one `md4_digest` call.
#[derive(Debug, Clone)]
struct State {
    a: u32,
    b: u32,
    c: u32,
    d: u32,
}

impl State {
    fn new() -> Self {
        Self {
            a: INIT_A,
            b: INIT_B,
            c: INIT_C,
            d: INIT_D,
        }
    }

    /// Processes a 512-bit (64-byte) block, updating the state.
    /// The block is divided into 16 32-bit words in little-endian.
    fn process_block(&mut self, block: &[u8]) {
        debug_assert_eq!(block.len(), MD4_BLOCK_SIZE);

        let mut x = [0u32; 16];
        for (word, bytes) in x.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }

        let (mut a, mut b, mut c, mut d) = (self.a, self.b, self.c, self.d);

        for i in 0..48 {
            let (f, k, constant) = match i / 16 {
                // F: select c or d by b
                0 => ((b & c) | (!b & d), i, 0),
                // G: majority
                1 => ((b & c) | (b & d) | (c & d), ROUND2_ORDER[i % 16], ROUND2_K),
                // H: parity
                _ => (b ^ c ^ d, ROUND3_ORDER[i % 16], ROUND3_K),
            };

            let temp = a
                .wrapping_add(f)
                .wrapping_add(x[k])
                .wrapping_add(constant)
                .rotate_left(S[i]);

            a = d;
            d = c;
            c = b;
            b = temp;
        }

        self.a = self.a.wrapping_add(a);
        self.b = self.b.wrapping_add(b);
        self.c = self.c.wrapping_add(c);
        self.d = self.d.wrapping_add(d);
    }

    fn into_digest(self) -> [u8; MD4_OUTPUT_SIZE] {
        let mut output = [0u8; MD4_OUTPUT_SIZE];
        output[0..4].copy_from_slice(&self.a.to_le_bytes());
        output[4..8].copy_from_slice(&self.b.to_le_bytes());
        output[8..12].copy_from_slice(&self.c.to_le_bytes());
        output[12..16].copy_from_slice(&self.d.to_le_bytes());
        output
    }
}

/// Length of `len` bytes in bits, or `InputTooLarge` if it overflows the 64-bit length field.
pub(crate) fn bit_length(len: usize) -> Result<u64> {
    u64::try_from(len)
        .ok()
        .and_then(|bytes| bytes.checked_mul(8))
        .ok_or(Error::InputTooLarge { len })
}

/// Computes the MD4 digest of `data` in a single shot.
///
/// Fails only with [`Error::InputTooLarge`], when the input's bit length cannot be encoded in
/// the 64-bit length field. No partial digest is ever returned.
///
/// ```
/// let digest = ed2k::md4_digest(b"abc").unwrap();
/// assert_eq!(digest[..4], [0xa4, 0x48, 0x01, 0x7a]);
/// ```
pub fn md4_digest(data: &[u8]) -> Result<[u8; MD4_OUTPUT_SIZE]> {
    let bit_len = bit_length(data.len())?;
    let mut state = State::new();

    let mut blocks = data.chunks_exact(MD4_BLOCK_SIZE);
    for block in &mut blocks {
        state.process_block(block);
    }

    // 0x80 terminator, zero fill, then the bit length; spills into a second block
    // when the tail leaves no room for the length field.
    let tail = blocks.remainder();
    let mut scratch = [0u8; 2 * MD4_BLOCK_SIZE];
    scratch[..tail.len()].copy_from_slice(tail);
    scratch[tail.len()] = 0x80;
    let padded_len = if tail.len() < LENGTH_OFFSET {
        MD4_BLOCK_SIZE
    } else {
        2 * MD4_BLOCK_SIZE
    };
    scratch[padded_len - 8..padded_len].copy_from_slice(&bit_len.to_le_bytes());

    for block in scratch[..padded_len].chunks_exact(MD4_BLOCK_SIZE) {
        state.process_block(block);
    }

    trace!(
        "md4: hashed {} bytes in {} blocks",
        data.len(),
        data.len() / MD4_BLOCK_SIZE + padded_len / MD4_BLOCK_SIZE
    );

    Ok(state.into_digest())
}
