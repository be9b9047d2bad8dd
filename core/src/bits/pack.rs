use crate::bits::types::{BitSequence, BitsError};
use crate::constants::BITS_PER_CHAR;

/// Expand text into bits, 8 per character, most significant bit first.
///
/// The output length is always `8 * text.chars().count()`.
///
/// # Errors
/// `BitsError::NotOctet` if a character lies above U+00FF. Base64 text never does.
pub fn pack(text: &str) -> Result<BitSequence, BitsError> {
    let mut bits = BitSequence::with_capacity(text.len() * BITS_PER_CHAR);
    for (index, ch) in text.chars().enumerate() {
        let code = u8::try_from(u32::from(ch)).map_err(|_| BitsError::NotOctet { ch, index })?;
        bits.push_octet(code);
    }
    Ok(bits)
}

/// Byte-level variant of [`pack`]; used for the payload header and framed text.
pub fn pack_bytes(bytes: &[u8]) -> BitSequence {
    let mut bits = BitSequence::with_capacity(bytes.len() * BITS_PER_CHAR);
    for &b in bytes {
        bits.push_octet(b);
    }
    bits
}
