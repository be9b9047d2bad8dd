//! Bit-packing primitives.
//!
//! Responsibilities:
//! - Expand text/bytes into an MSB-first bit sequence
//! - Regroup bits into 8-bit units
//!
//! Non-responsibilities:
//! - Frame geometry
//! - Payload framing (see `headers`)

pub mod types;
pub mod pack;
pub mod unpack;

pub use types::{BitSequence, BitsError};
pub use pack::{pack, pack_bytes};
pub use unpack::{unpack, unpack_bytes};
