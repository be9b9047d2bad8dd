//! pipeline/payload.rs
//! Bytes <-> bits, through the text representation and payload framing.
//!
//! Encode: bytes -> base64 text -> (header + text | text) -> bits.
//! Decode: bits -> recovered bytes -> framing auto-detect -> text -> bytes.

use tracing::debug;

use crate::bits::{pack, pack_bytes, unpack, unpack_bytes, BitSequence};
use crate::config::Framing;
use crate::headers::{decode_payload, encode_payload, is_framed};
use crate::text::{bytes_to_text, text_to_bytes, Alphabet};
use crate::types::BitreelError;

/// Turn file content into the bit sequence that gets rendered.
pub fn encode_payload_bits(
    bytes: &[u8],
    framing: Framing,
    alphabet: Alphabet,
) -> Result<BitSequence, BitreelError> {
    let text = bytes_to_text(bytes, alphabet);
    let bits = match framing {
        Framing::Header => pack_bytes(&encode_payload(&text, alphabet)),
        Framing::Legacy => pack(&text)?,
    };
    debug!(bytes = bytes.len(), text_len = text.len(), bits = bits.len(), ?framing, "payload packed");
    Ok(bits)
}

/// Recover file content from parsed bits.
///
/// A header-framed payload carries its own length, CRC and alphabet. Anything
/// else is treated as bare text: zero octets are dropped (which removes frame
/// padding) and the rest is decoded with `fallback`.
pub fn decode_payload_bits(bits: &BitSequence, fallback: Alphabet) -> Result<Vec<u8>, BitreelError> {
    let raw = unpack_bytes(bits);
    if is_framed(&raw) {
        let (header, text) = decode_payload(&raw)?;
        debug!(text_len = header.text_len, alphabet = ?header.alphabet(), "header-framed payload");
        return text_to_bytes(text, header.alphabet());
    }

    let text = unpack(bits);
    debug!(text_len = text.len(), "legacy payload");
    text_to_bytes(text, fallback)
}
