mod soft;

use core::fmt;

static LUT_DATA: [u8; 16] = *b"0123456789abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HexError {
    /// The output slice cannot hold the result.
    OutputTooSmall { needed: usize, available: usize },
    /// Hex input must come in pairs of digits.
    OddLength(usize),
    /// `byte` at `index` is not a hex digit.
    InvalidCharacter { index: usize, byte: u8 },
}

impl fmt::Display for HexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputTooSmall { needed, available } => {
                write!(f, "output too small: need {needed} bytes, have {available}")
            }
            Self::OddLength(len) => write!(f, "odd number of hex digits ({len})"),
            Self::InvalidCharacter { index, byte } => {
                write!(f, "invalid hex character {:?} at offset {index}", char::from(*byte))
            }
        }
    }
}

impl std::error::Error for HexError {}

/// Encode input bytes as lowercase hex into the output slice.
/// Returns the number of bytes written (always `2 * input.len()`).
pub fn encode_slice(input: &[u8], output: &mut [u8]) -> Result<usize, HexError> {
    soft::encode(input, output)
}

pub fn encode(input: &[u8]) -> String {
    let mut output = vec![0u8; input.len() * 2];
    // Sized for the input, so this cannot fail.
    let written = encode_slice(input, &mut output).unwrap_or(0);
    output.truncate(written);
    // SAFETY: every byte comes from LUT_DATA, which is ASCII.
    unsafe { String::from_utf8_unchecked(output) }
}

/// Decode hex digits (either case) into the output slice.
/// Returns the number of bytes written (always `input.len() / 2`).
pub fn decode_slice(input: &[u8], output: &mut [u8]) -> Result<usize, HexError> {
    soft::decode(input, output)
}

pub fn decode<T: AsRef<[u8]>>(input: T) -> Result<Vec<u8>, HexError> {
    let input = input.as_ref();
    let mut output = vec![0u8; input.len() / 2];
    let written = decode_slice(input, &mut output)?;
    output.truncate(written);
    Ok(output)
}
