use super::{INITIAL_STATE, MESSAGE_INDEX, ROUND_CONSTANTS, SHIFTS};

const fn padding_block() -> [u8; Md4::BLOCK_LEN] {
    let mut block = [0u8; Md4::BLOCK_LEN];
    block[0] = 0x80;
    block
}

static PADDING: [u8; Md4::BLOCK_LEN] = padding_block();

#[derive(Clone, Copy)]
pub struct Md4 {
    state: [u32; 4],
    /// Message length in bits, counted as data arrives.
    count: u64,
    buffer: [u8; 64],
    offset: usize,
}

impl Md4 {
    pub const BLOCK_LEN: usize = 64;
    pub const DIGEST_LEN: usize = 16;

    const MLEN_SIZE: usize = core::mem::size_of::<u64>();
    const MLEN_OFFSET: usize = Self::BLOCK_LEN - Self::MLEN_SIZE;

    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            state: INITIAL_STATE,
            count: 0,
            buffer: [0; Self::BLOCK_LEN],
            offset: 0,
        }
    }

    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        self.count = self.count.wrapping_add((data.len() as u64) << 3);

        let mut i = 0usize;

        if self.offset + data.len() >= Self::BLOCK_LEN {
            if self.offset > 0 {
                let fill = Self::BLOCK_LEN - self.offset;
                self.buffer[self.offset..].copy_from_slice(&data[..fill]);
                transform(&mut self.state, &self.buffer);
                self.offset = 0;
                i = fill;
            }
            while i + Self::BLOCK_LEN <= data.len() {
                // SAFETY: i + BLOCK_LEN <= data.len()
                transform(&mut self.state, unsafe { crate::utils::slice_to_array_at(data, i) });
                i += Self::BLOCK_LEN;
            }
        }

        let remain = data.len() - i;
        debug_assert!(self.offset + remain < Self::BLOCK_LEN);
        self.buffer[self.offset..self.offset + remain].copy_from_slice(&data[i..]);
        self.offset += remain;
    }

    #[inline]
    pub fn finalize(mut self) -> [u8; Self::DIGEST_LEN] {
        // The length must be captured before the padding bumps the counter.
        let mlen_octets: [u8; Self::MLEN_SIZE] = self.count.to_le_bytes();

        let plen = if self.offset < Self::MLEN_OFFSET {
            Self::MLEN_OFFSET - self.offset
        } else {
            Self::BLOCK_LEN + Self::MLEN_OFFSET - self.offset
        };

        self.update(&PADDING[..plen]);
        debug_assert_eq!(self.offset, Self::MLEN_OFFSET);
        self.update(&mlen_octets);
        debug_assert_eq!(self.offset, 0);

        let mut output = [0u8; Self::DIGEST_LEN];
        output[0..4].copy_from_slice(&self.state[0].to_le_bytes());
        output[4..8].copy_from_slice(&self.state[1].to_le_bytes());
        output[8..12].copy_from_slice(&self.state[2].to_le_bytes());
        output[12..16].copy_from_slice(&self.state[3].to_le_bytes());
        output
    }

    #[inline(always)]
    pub fn oneshot<T: AsRef<[u8]>>(data: T) -> [u8; Self::DIGEST_LEN] {
        let mut md4 = Self::new();
        md4.update(data.as_ref());
        md4.finalize()
    }
}

impl Default for Md4 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::io::Write for Md4 {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[inline(always)]
fn f(x: u32, y: u32, z: u32) -> u32 {
    ((y ^ z) & x) ^ z
}

#[inline(always)]
fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

/// One 16-step round. Step `j` accumulates into word `(4 - j % 4) % 4`
/// (a, d, c, b, ...) and feeds the other three, in rotating order, to `func`.
#[inline(always)]
fn round(v: &mut [u32; 4], x: &[u32; 16], r: usize, func: fn(u32, u32, u32) -> u32) {
    let index = &MESSAGE_INDEX[r];
    let shift = &SHIFTS[r];
    let k = ROUND_CONSTANTS[r];

    crate::const_loop!(j, 0, 16, {
        let t = (4 - j % 4) % 4;
        let mixed = func(v[(t + 1) % 4], v[(t + 2) % 4], v[(t + 3) % 4]);
        v[t] = v[t]
            .wrapping_add(mixed)
            .wrapping_add(x[index[j]])
            .wrapping_add(k)
            .rotate_left(shift[j % 4]);
    });
}

/// The MD4 compression function.
#[inline(always)]
pub fn transform(state: &mut [u32; 4], block: &[u8; 64]) {
    let mut x = [0u32; 16];
    crate::const_loop!(i, 0, 16, {
        x[i] = u32::from_le_bytes([
            block[i * 4],
            block[i * 4 + 1],
            block[i * 4 + 2],
            block[i * 4 + 3],
        ]);
    });

    let mut v = *state;

    round(&mut v, &x, 0, f);
    round(&mut v, &x, 1, g);
    round(&mut v, &x, 2, h);

    state[0] = state[0].wrapping_add(v[0]);
    state[1] = state[1].wrapping_add(v[1]);
    state[2] = state[2].wrapping_add(v[2]);
    state[3] = state[3].wrapping_add(v[3]);
}
