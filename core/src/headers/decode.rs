//! headers/decode.rs
//!
//! Payload header decoding.
//!
//! - Deserializes the fixed 20-byte prefix and validates it.
//! - Slices exactly `text_len` bytes of text; anything after is frame padding.
//! - Verifies the text CRC before handing the text back.

use byteorder::{ByteOrder, LittleEndian};

use crate::constants::PAYLOAD_MAGIC;
use crate::headers::types::{HeaderError, PayloadFlags, PayloadHeader};

/// True when `buf` starts like a header-framed payload.
///
/// Only the first magic byte is checked: it cannot start a base64 text, so a
/// legacy payload never matches. Full validation happens in [`decode_header_le`].
#[inline]
pub fn is_framed(buf: &[u8]) -> bool {
    buf.first() == Some(&PAYLOAD_MAGIC[0])
}

/// Deserialize and validate the header at the start of `buf`.
pub fn decode_header_le(buf: &[u8]) -> Result<PayloadHeader, HeaderError> {
    if buf.len() < PayloadHeader::LEN {
        return Err(HeaderError::Truncated { have: buf.len(), need: PayloadHeader::LEN });
    }

    let mut magic = [0u8; 4];
    magic.copy_from_slice(&buf[0..4]);

    let raw_flags = LittleEndian::read_u16(&buf[6..8]);
    let flags = PayloadFlags::from_bits(raw_flags).ok_or(HeaderError::UnknownFlags(raw_flags))?;

    let header = PayloadHeader {
        magic,
        version: buf[4],
        reserved: buf[5],
        flags,
        text_len: LittleEndian::read_u64(&buf[8..16]),
        text_crc32: LittleEndian::read_u32(&buf[16..20]),
    };
    header.validate()?;

    Ok(header)
}

/// Split a header-framed payload into its header and text bytes.
///
/// Trailing bytes past `text_len` (zero padding from the last frame) are ignored.
pub fn decode_payload(buf: &[u8]) -> Result<(PayloadHeader, &[u8]), HeaderError> {
    let header = decode_header_le(buf)?;

    let text_len = usize::try_from(header.text_len)
        .map_err(|_| HeaderError::LengthOverflow(header.text_len))?;
    let end = PayloadHeader::LEN
        .checked_add(text_len)
        .ok_or(HeaderError::LengthOverflow(header.text_len))?;
    if buf.len() < end {
        return Err(HeaderError::Truncated { have: buf.len(), need: end });
    }

    let text = &buf[PayloadHeader::LEN..end];
    let crc = crc32fast::hash(text);
    if crc != header.text_crc32 {
        return Err(HeaderError::CrcMismatch { have: header.text_crc32, need: crc });
    }

    Ok((header, text))
}
