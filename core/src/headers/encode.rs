//! headers/encode.rs
//!
//! Payload header encoding.
//!
//! - Serializes `PayloadHeader` into a fixed 20-byte buffer in little-endian order.
//! - Field order must match `types.rs` and `decode.rs`.

use byteorder::{ByteOrder, LittleEndian};

use crate::headers::types::{PayloadHeader, PAYLOAD_HEADER_LEN};
use crate::text::Alphabet;

/// Serialize a `PayloadHeader` into its 20-byte wire form.
///
/// Layout:
///
/// ```text
/// [ magic      (4) ]
/// [ version    (1) ]
/// [ reserved   (1) ]
/// [ flags      (2) ]
/// [ text_len   (8) ]
/// [ text_crc32 (4) ]
/// ```
#[inline]
pub fn encode_header_le(h: &PayloadHeader) -> [u8; PAYLOAD_HEADER_LEN] {
    let mut out = [0u8; PAYLOAD_HEADER_LEN];

    out[0..4].copy_from_slice(&h.magic);
    out[4] = h.version;
    out[5] = h.reserved;
    LittleEndian::write_u16(&mut out[6..8], h.flags.bits());
    LittleEndian::write_u64(&mut out[8..16], h.text_len);
    LittleEndian::write_u32(&mut out[16..20], h.text_crc32);

    out
}

/// Prefix `text` with its header. The result is what gets packed into bits.
pub fn encode_payload(text: &str, alphabet: Alphabet) -> Vec<u8> {
    let header = PayloadHeader::for_text(text, alphabet);
    let mut out = Vec::with_capacity(PAYLOAD_HEADER_LEN + text.len());
    out.extend_from_slice(&encode_header_le(&header));
    out.extend_from_slice(text.as_bytes());
    out
}
