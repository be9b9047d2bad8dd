//! headers/types.rs
//! Payload header struct, flags, and errors.
//!
//! Notes:
//! - Little-endian for every multi-byte integer.
//! - Fixed 20-byte length so the decoder knows where the text starts.
//! - The first magic byte is outside every base64 alphabet; decode uses it to
//!   tell header-framed payloads from legacy ones.

use std::fmt;

use crate::constants::{flags, PAYLOAD_MAGIC, PAYLOAD_VERSION};
use crate::text::Alphabet;

/// Fixed header size in bytes.
pub const PAYLOAD_HEADER_LEN: usize = 20;

bitflags::bitflags! {
    /// Payload flags (unknown bits are rejected on decode).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PayloadFlags: u16 {
        /// Text uses the URL-safe base64 alphabet instead of the standard one.
        const URL_SAFE = flags::URL_SAFE;
    }
}

impl PayloadFlags {
    pub fn for_alphabet(alphabet: Alphabet) -> Self {
        match alphabet {
            Alphabet::Standard => PayloadFlags::empty(),
            Alphabet::UrlSafe => PayloadFlags::URL_SAFE,
        }
    }

    pub fn alphabet(self) -> Alphabet {
        if self.contains(PayloadFlags::URL_SAFE) {
            Alphabet::UrlSafe
        } else {
            Alphabet::Standard
        }
    }
}

/// Length-delimited prefix of every header-framed payload.
///
/// Padding after `text_len` characters is structurally outside the payload, so
/// no value is ever used as a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayloadHeader {
    pub magic: [u8; 4],      // 0..4   magic marker
    pub version: u8,         // 4      format version
    pub reserved: u8,        // 5      must be zero
    pub flags: PayloadFlags, // 6..8   alphabet and future bits
    pub text_len: u64,       // 8..16  characters of text that follow
    pub text_crc32: u32,     // 16..20 CRC32 over the text bytes
}

impl PayloadHeader {
    pub const LEN: usize = PAYLOAD_HEADER_LEN;

    /// Build the header describing `text`.
    pub fn for_text(text: &str, alphabet: Alphabet) -> Self {
        Self {
            magic: PAYLOAD_MAGIC,
            version: PAYLOAD_VERSION,
            reserved: 0,
            flags: PayloadFlags::for_alphabet(alphabet),
            text_len: text.len() as u64,
            text_crc32: crc32fast::hash(text.as_bytes()),
        }
    }

    pub fn alphabet(&self) -> Alphabet {
        self.flags.alphabet()
    }

    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.magic != PAYLOAD_MAGIC {
            return Err(HeaderError::InvalidMagic { have: self.magic });
        }
        if self.version != PAYLOAD_VERSION {
            return Err(HeaderError::UnsupportedVersion(self.version));
        }
        if self.reserved != 0 {
            return Err(HeaderError::ReservedNonZero(self.reserved));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub enum HeaderError {
    /// Fewer bytes than a header (or than `text_len` promises).
    Truncated { have: usize, need: usize },
    InvalidMagic { have: [u8; 4] },
    UnsupportedVersion(u8),
    ReservedNonZero(u8),
    UnknownFlags(u16),
    /// `text_len` does not fit in memory on this platform.
    LengthOverflow(u64),
    CrcMismatch { have: u32, need: u32 },
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use HeaderError::*;
        match self {
            Truncated { have, need } =>
                write!(f, "payload truncated: {} < {} bytes", have, need),
            InvalidMagic { have } =>
                write!(f, "invalid payload magic: {:02x?}", have),
            UnsupportedVersion(v) =>
                write!(f, "unsupported payload version: {}", v),
            ReservedNonZero(v) =>
                write!(f, "reserved byte must be zero, got 0x{:02x}", v),
            UnknownFlags(bits) =>
                write!(f, "unknown payload flags: 0x{:04x}", bits),
            LengthOverflow(len) =>
                write!(f, "payload length {} exceeds addressable memory", len),
            CrcMismatch { have, need } =>
                write!(f, "text crc32 mismatch: header 0x{:08x}, computed 0x{:08x}", have, need),
        }
    }
}

impl std::error::Error for HeaderError {}
