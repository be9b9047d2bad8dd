use crate::bits::types::BitSequence;
use crate::constants::BITS_PER_CHAR;

#[inline]
fn octets(bits: &BitSequence) -> impl Iterator<Item = u8> + '_ {
    // chunks_exact drops the incomplete trailing group
    bits.as_slice()
        .chunks_exact(BITS_PER_CHAR)
        .map(|group| group.iter().fold(0u8, |acc, &bit| (acc << 1) | u8::from(bit)))
}

/// Regroup bits into text using the header-less rule.
///
/// - 8-bit groups are read left to right; a trailing group shorter than 8 bits is discarded.
/// - A group equal to zero is treated as padding and dropped.
/// - Every other group becomes the character with that code point.
///
/// Zero groups inside the data are indistinguishable from padding and are lost
/// as well. Base64 text never contains NUL, so this only bites payloads that
/// were not produced by this crate; header-framed payloads use [`unpack_bytes`].
pub fn unpack(bits: &BitSequence) -> String {
    octets(bits)
        .filter(|&b| b != 0)
        .map(char::from)
        .collect()
}

/// Regroup bits into bytes without any zero filtering.
/// A trailing group shorter than 8 bits is discarded.
pub fn unpack_bytes(bits: &BitSequence) -> Vec<u8> {
    octets(bits).collect()
}
