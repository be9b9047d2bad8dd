//! headers/mod.rs
//! Length-delimited payload framing.
//!
//! Notes:
//! - A fixed 20-byte header precedes the text in the bit sequence.
//! - `text_len` makes last-frame padding structurally distinct from data, so
//!   zero bytes never need to be treated as padding.
//! - Payloads without the header are decoded with the legacy zero-dropping rule.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
