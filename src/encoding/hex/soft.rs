use super::{HexError, LUT_DATA};

#[inline(always)]
pub(crate) fn encode_byte(input: u8, output: &mut [u8; 2]) {
    output[0] = LUT_DATA[(input >> 4) as usize];
    output[1] = LUT_DATA[(input & 0x0F) as usize];
}

#[inline(always)]
fn decode_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

pub fn encode(input: &[u8], output: &mut [u8]) -> Result<usize, HexError> {
    let required_output_len = input.len() * 2;
    if output.len() < required_output_len {
        return Err(HexError::OutputTooSmall {
            needed: required_output_len,
            available: output.len(),
        });
    }

    for (i, &byte) in input.iter().enumerate() {
        // SAFETY: i * 2 + 2 <= required_output_len <= output.len()
        let out_block = unsafe { crate::utils::slice_to_array_at_mut::<u8, 2>(output, i * 2) };
        encode_byte(byte, out_block);
    }

    Ok(required_output_len)
}

pub fn decode(input: &[u8], output: &mut [u8]) -> Result<usize, HexError> {
    if input.len() % 2 != 0 {
        return Err(HexError::OddLength(input.len()));
    }
    let required_output_len = input.len() / 2;
    if output.len() < required_output_len {
        return Err(HexError::OutputTooSmall {
            needed: required_output_len,
            available: output.len(),
        });
    }

    for (i, pair) in input.chunks_exact(2).enumerate() {
        let hi = decode_nibble(pair[0])
            .ok_or(HexError::InvalidCharacter { index: i * 2, byte: pair[0] })?;
        let lo = decode_nibble(pair[1])
            .ok_or(HexError::InvalidCharacter { index: i * 2 + 1, byte: pair[1] })?;
        output[i] = (hi << 4) | lo;
    }

    Ok(required_output_len)
}
