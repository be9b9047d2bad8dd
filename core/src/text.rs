//! text.rs
//! Reversible byte -> text transform.
//!
//! Every base64 character is a single 8-bit code point, so the text can be packed
//! one byte per character and recovered exactly, zero bytes included.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE},
    Engine,
};
use serde::{Deserialize, Serialize};

use crate::types::BitreelError;

/// Base64 alphabet used for the text representation. Both variants keep `=` padding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Alphabet {
    #[default]
    Standard,
    UrlSafe,
}

impl Alphabet {
    fn engine(self) -> &'static base64::engine::GeneralPurpose {
        match self {
            Alphabet::Standard => &STANDARD,
            Alphabet::UrlSafe => &URL_SAFE,
        }
    }
}

/// Encode raw bytes into the printable text representation.
pub fn bytes_to_text(bytes: &[u8], alphabet: Alphabet) -> String {
    alphabet.engine().encode(bytes)
}

/// Reverse [`bytes_to_text`].
///
/// # Errors
/// `DecodeAlphabet` when `text` contains characters or padding the alphabet rejects.
pub fn text_to_bytes<T: AsRef<[u8]>>(text: T, alphabet: Alphabet) -> Result<Vec<u8>, BitreelError> {
    Ok(alphabet.engine().decode(text.as_ref())?)
}
