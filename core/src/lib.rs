//! bitreel-core
//!
//! Byte stream <-> monochrome bitmap frames <-> video container.
//! No CLI, no terminal I/O.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;

// Codec layers, leaves first
pub mod text;
pub mod bits;
pub mod headers;
pub mod frame;
pub mod sidecar;
pub mod video;
pub mod telemetry;

// Orchestration
pub mod pipeline;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::config::{BackendConfig, CodecConfig, Framing};
    pub use crate::frame::{Frame, FrameGeometry};
    pub use crate::pipeline::{
        collect_inputs, BatchReport, CancelToken, Codec, DecodeOutcome, EncodeOutcome, FileOutcome, Mode,
    };
    pub use crate::sidecar::{FileSidecarStore, MemorySidecarStore, OverwritePolicy, SidecarStore};
    pub use crate::text::Alphabet;
    pub use crate::types::{BitreelError, Result};
    pub use crate::video::{FfmpegVideo, MemoryVideo, VideoBackend, Y4mVideo};
}
