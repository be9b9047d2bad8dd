//! Scoped worker pool for frame rendering and parsing.
//!
//! Each file's frames are independent, so workers pull frame indices from a
//! bounded channel and send results back tagged with their index. The caller
//! thread reassembles them in frame order. Output is identical to the
//! sequential `render_frames` / `parse_frame_sequence`.

use std::collections::BTreeMap;
use std::thread;

use crossbeam::channel::bounded;
use tracing::debug;

use crate::bits::BitSequence;
use crate::constants::FRAME_QUEUE_CAP;
use crate::frame::parse::{parse_frame, parse_frame_sequence};
use crate::frame::render::{render_chunk, render_frames};
use crate::frame::types::{Frame, FrameError, FrameGeometry};

/// Reorders out-of-order worker results by frame index.
struct OrderedCollector<T> {
    next: usize,
    pending: BTreeMap<usize, T>,
    done: Vec<T>,
}

impl<T> OrderedCollector<T> {
    fn with_capacity(total: usize) -> Self {
        Self { next: 0, pending: BTreeMap::new(), done: Vec::with_capacity(total) }
    }

    fn push(&mut self, index: usize, item: T) {
        self.pending.insert(index, item);
        while let Some(item) = self.pending.remove(&self.next) {
            self.done.push(item);
            self.next += 1;
        }
    }

    fn finish(self, expected: usize) -> Result<Vec<T>, FrameError> {
        if self.done.len() != expected || !self.pending.is_empty() {
            return Err(FrameError::Worker("missing frame results"));
        }
        Ok(self.done)
    }
}

/// Resolve a configured worker count: 0 means one per CPU.
pub fn effective_workers(configured: usize) -> usize {
    match configured {
        0 => num_cpus::get().max(1),
        n => n,
    }
}

/// Parallel [`render_frames`]. Falls back to the sequential path for one worker or one frame.
pub fn render_frames_par(
    bits: &BitSequence,
    geometry: FrameGeometry,
    workers: usize,
) -> Result<Vec<Frame>, FrameError> {
    geometry.validate()?;

    let cap = geometry.bits_per_frame();
    let total = geometry.frame_count(bits.len());
    let workers = effective_workers(workers).min(total);
    if workers <= 1 {
        return render_frames(bits, geometry);
    }
    debug!(frames = total, workers, "rendering frames in parallel");

    let slice = bits.as_slice();
    let (job_tx, job_rx) = bounded::<usize>(FRAME_QUEUE_CAP * workers);
    let (out_tx, out_rx) = bounded::<(usize, Frame)>(FRAME_QUEUE_CAP * workers);

    thread::scope(|scope| {
        scope.spawn(move || {
            for index in 0..total {
                if job_tx.send(index).is_err() {
                    break;
                }
            }
        });

        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = out_tx.clone();
            scope.spawn(move || {
                for index in rx.iter() {
                    let start = index * cap;
                    let end = (start + cap).min(slice.len());
                    if tx.send((index, render_chunk(&slice[start..end], geometry))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(out_tx);

        let mut collector = OrderedCollector::with_capacity(total);
        for (index, frame) in out_rx.iter() {
            collector.push(index, frame);
        }
        collector.finish(total)
    })
}

/// Parallel [`parse_frame_sequence`].
pub fn parse_frame_sequence_par(
    frames: &[Frame],
    threshold: u8,
    workers: usize,
) -> Result<BitSequence, FrameError> {
    let total = frames.len();
    let workers = effective_workers(workers).min(total);
    if workers <= 1 {
        return Ok(parse_frame_sequence(frames, threshold));
    }
    debug!(frames = total, workers, "parsing frames in parallel");

    let (job_tx, job_rx) = bounded::<usize>(FRAME_QUEUE_CAP * workers);
    let (out_tx, out_rx) = bounded::<(usize, BitSequence)>(FRAME_QUEUE_CAP * workers);

    let parts = thread::scope(|scope| {
        scope.spawn(move || {
            for index in 0..total {
                if job_tx.send(index).is_err() {
                    break;
                }
            }
        });

        for _ in 0..workers {
            let rx = job_rx.clone();
            let tx = out_tx.clone();
            scope.spawn(move || {
                for index in rx.iter() {
                    if tx.send((index, parse_frame(&frames[index], threshold))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(out_tx);

        let mut collector = OrderedCollector::with_capacity(total);
        for (index, bits) in out_rx.iter() {
            collector.push(index, bits);
        }
        collector.finish(total)
    })?;

    let mut bits = BitSequence::with_capacity(frames.iter().map(|f| f.pixels().len()).sum());
    for mut part in parts {
        bits.append(&mut part);
    }
    Ok(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collector_reorders() {
        let mut c = OrderedCollector::with_capacity(3);
        c.push(2, 'c');
        c.push(0, 'a');
        c.push(1, 'b');
        assert_eq!(c.finish(3).unwrap(), vec!['a', 'b', 'c']);
    }

    #[test]
    fn collector_reports_gaps() {
        let mut c = OrderedCollector::with_capacity(3);
        c.push(0, 1);
        c.push(2, 3);
        assert!(matches!(c.finish(3), Err(FrameError::Worker(_))));
    }
}
