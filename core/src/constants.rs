/// Payload header magic. The first byte sits outside every base64 alphabet, so a
/// header-framed payload can never be mistaken for a legacy base64 payload.
pub const PAYLOAD_MAGIC: [u8; 4] = [0xB1, b'R', b'L', 0x01];
pub const PAYLOAD_VERSION: u8 = 1;

/// Default frame geometry (256 x 256 = 65536 bits per frame).
pub const DEFAULT_FRAME_WIDTH: u32 = 256;
pub const DEFAULT_FRAME_HEIGHT: u32 = 256;

/// One frame per time unit.
pub const DEFAULT_FPS: u32 = 1;

/// Pixels at or above this intensity read back as bit `1`.
pub const DEFAULT_THRESHOLD: u8 = 127;

/// Rendered pixel intensities.
pub const PIXEL_ON: u8 = 255;
pub const PIXEL_OFF: u8 = 0;

pub const BITS_PER_CHAR: usize = 8;

/// Naming: `<original_name>_video.<ext>` and `<video file name>.meta`.
pub const DEFAULT_VIDEO_SUFFIX: &str = "_video";
pub const DEFAULT_SIDECAR_EXTENSION: &str = "meta";

/// Suffix for in-progress outputs; renamed away on success, removed on failure.
pub const PARTIAL_SUFFIX: &str = "partial";

/// Container extensions per backend.
pub const Y4M_EXTENSION: &str = "y4m";
pub const DEFAULT_FFMPEG_CONTAINER: &str = "mkv";
pub const DEFAULT_FFMPEG_CODEC: &str = "ffv1";
pub const FFMPEG_BINARY: &str = "ffmpeg";

/// Default scoped workers for frame rendering and parsing (0 = one per CPU).
pub const DEFAULT_WORKERS: usize = 1;
/// Frames in flight per worker channel.
pub const FRAME_QUEUE_CAP: usize = 8;

/// Default batch directories.
pub mod dirs {
    pub const INPUT_TEXT: &str = "input_text";
    pub const OUTPUT_VIDEO: &str = "output_video";
    pub const INPUT_VIDEO: &str = "input_video";
    pub const OUTPUT_TEXT: &str = "output_text";
}

/// Payload flag bits (mirrored in `headers::PayloadFlags`).
pub mod flags {
    pub const URL_SAFE: u16 = 0x0001;
}
