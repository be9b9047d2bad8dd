use crate::bits::BitSequence;
use crate::frame::types::Frame;

/// Threshold one frame back into bits, row-major.
///
/// Intensity `>= threshold` reads as `1`, anything else as `0`. Drift from a
/// lossy container is tolerated as long as it does not cross the threshold;
/// nothing beyond this binary decision is attempted.
pub fn parse_frame(frame: &Frame, threshold: u8) -> BitSequence {
    frame.pixels().iter().map(|&px| px >= threshold).collect()
}

/// Concatenate [`parse_frame`] over `frames` in order.
pub fn parse_frame_sequence(frames: &[Frame], threshold: u8) -> BitSequence {
    let total = frames.iter().map(|f| f.pixels().len()).sum();
    let mut bits = BitSequence::with_capacity(total);
    for frame in frames {
        bits.extend(frame.pixels().iter().map(|&px| px >= threshold));
    }
    bits
}
