//! Frame codec.
//!
//! Responsibilities:
//! - Chunk a bit sequence into fixed-size monochrome frames (zero-padded last frame)
//! - Threshold frames back into bits
//! - Optional scoped worker pool for both directions
//!
//! Non-responsibilities:
//! - Containers and codecs (see `video`)
//! - Payload framing

pub mod types;
pub mod render;
pub mod parse;
pub mod parallel;

pub use types::{Frame, FrameError, FrameGeometry};
pub use render::render_frames;
pub use parse::{parse_frame, parse_frame_sequence};
pub use parallel::{effective_workers, parse_frame_sequence_par, render_frames_par};
