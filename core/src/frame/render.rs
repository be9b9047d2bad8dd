use crate::bits::BitSequence;
use crate::constants::{PIXEL_OFF, PIXEL_ON};
use crate::frame::types::{Frame, FrameError, FrameGeometry};

/// Render one chunk of at most `bits_per_frame` bits; the remainder is zero padding.
pub(crate) fn render_chunk(chunk: &[bool], geometry: FrameGeometry) -> Frame {
    let cap = geometry.bits_per_frame();
    debug_assert!(chunk.len() <= cap);

    let mut pixels = vec![PIXEL_OFF; cap];
    for (px, &bit) in pixels.iter_mut().zip(chunk) {
        if bit {
            *px = PIXEL_ON;
        }
    }

    Frame { geometry, pixels }
}

/// Split `bits` into frames of `width * height` bits, row-major.
///
/// - Bit `1` renders as 255, bit `0` as 0.
/// - The last frame is right-padded with `0` bits.
/// - Exactly `ceil(len / (width * height))` frames; an empty sequence renders no frames.
pub fn render_frames(bits: &BitSequence, geometry: FrameGeometry) -> Result<Vec<Frame>, FrameError> {
    geometry.validate()?;

    Ok(bits
        .as_slice()
        .chunks(geometry.bits_per_frame())
        .map(|chunk| render_chunk(chunk, geometry))
        .collect())
}
