//! Encode/decode orchestration.
//!
//! Responsibilities:
//! - Per-file encode (`Codec::encode_file`) and decode (`Codec::decode_video`)
//! - Batches over explicit path lists with cancellation and a report
//! - Input enumeration for directory-driven callers
//!
//! Non-responsibilities:
//! - Interactive mode selection (CLI)
//! - Container formats (see `video`)

pub mod types;
pub mod payload;
pub mod codec;
pub mod batch;

pub use types::{BatchReport, CancelToken, DecodeOutcome, EncodeOutcome, FileOutcome, Mode};
pub use payload::{decode_payload_bits, encode_payload_bits};
pub use codec::{is_partial, partial_video_path, Codec};
pub use batch::collect_inputs;
