use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH};

/// Frame size in pixels. One pixel carries one bit.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

impl Default for FrameGeometry {
    fn default() -> Self {
        Self { width: DEFAULT_FRAME_WIDTH, height: DEFAULT_FRAME_HEIGHT }
    }
}

impl FrameGeometry {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Bits carried by one frame (`width * height`).
    #[inline]
    pub fn bits_per_frame(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Frames needed for `bit_len` bits: `ceil(bit_len / bits_per_frame)`, 0 for no bits.
    #[inline]
    pub fn frame_count(&self, bit_len: usize) -> usize {
        match self.bits_per_frame() {
            0 => 0,
            cap => bit_len.div_ceil(cap),
        }
    }

    pub fn validate(&self) -> Result<(), FrameError> {
        if self.width == 0 || self.height == 0 {
            return Err(FrameError::InvalidGeometry(*self));
        }
        (self.width as usize)
            .checked_mul(self.height as usize)
            .ok_or(FrameError::InvalidGeometry(*self))?;
        Ok(())
    }
}

impl fmt::Display for FrameGeometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// One monochrome bitmap, single channel, row-major.
///
/// Rendered frames only hold 0 and 255; frames read back from a lossy container
/// may hold anything, which is what the threshold in `parse_frame` is for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub(crate) geometry: FrameGeometry,
    pub(crate) pixels: Vec<u8>,
}

impl Frame {
    /// Wrap an 8-bit grayscale buffer of exactly `width * height` pixels.
    pub fn from_gray(geometry: FrameGeometry, pixels: Vec<u8>) -> Result<Self, FrameError> {
        let expected = geometry.bits_per_frame();
        if pixels.len() != expected {
            return Err(FrameError::LengthMismatch { expected, actual: pixels.len() });
        }
        Ok(Self { geometry, pixels })
    }

    /// Build from interleaved 3-channel pixels. Channels are identical by
    /// construction, so the first one is kept.
    pub fn from_rgb24(geometry: FrameGeometry, rgb: &[u8]) -> Result<Self, FrameError> {
        let expected = geometry.bits_per_frame() * 3;
        if rgb.len() != expected {
            return Err(FrameError::LengthMismatch { expected, actual: rgb.len() });
        }
        let pixels = rgb.chunks_exact(3).map(|px| px[0]).collect();
        Ok(Self { geometry, pixels })
    }

    pub fn geometry(&self) -> FrameGeometry {
        self.geometry
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Replicate the intensity channel into three identical channels.
    pub fn to_rgb24(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3);
        for &p in &self.pixels {
            out.extend_from_slice(&[p, p, p]);
        }
        out
    }
}

#[derive(Debug)]
pub enum FrameError {
    InvalidGeometry(FrameGeometry),
    LengthMismatch { expected: usize, actual: usize },
    GeometryMismatch { expected: FrameGeometry, actual: FrameGeometry },
    /// A render/parse worker went away before delivering every frame.
    Worker(&'static str),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use FrameError::*;
        match self {
            InvalidGeometry(g) =>
                write!(f, "invalid frame geometry: {}", g),
            LengthMismatch { expected, actual } =>
                write!(f, "pixel buffer length mismatch: expected {}, got {}", expected, actual),
            GeometryMismatch { expected, actual } =>
                write!(f, "frame geometry mismatch: expected {}, got {}", expected, actual),
            Worker(msg) =>
                write!(f, "frame worker error: {}", msg),
        }
    }
}

impl std::error::Error for FrameError {}
