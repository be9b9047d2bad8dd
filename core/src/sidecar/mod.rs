//! Sidecar identity records.
//!
//! The container and its naming scheme cannot always carry the original file
//! name verbatim, so each generated video gets a record mapping its identifier
//! (the video file name) back to the source file name.

pub mod types;
pub mod file;
pub mod memory;

pub use types::{validate_original_name, OverwritePolicy, SidecarError, SidecarRecord, SidecarStore};
pub use file::FileSidecarStore;
pub use memory::MemorySidecarStore;
