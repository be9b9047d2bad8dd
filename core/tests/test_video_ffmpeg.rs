// ffmpeg backend. Skipped on machines without an `ffmpeg` on PATH.

#[cfg(test)]
mod tests {
    use std::process::{Command, Stdio};

    use bitreel_core::bits::pack_bytes;
    use bitreel_core::constants::DEFAULT_THRESHOLD;
    use bitreel_core::frame::{parse_frame_sequence, render_frames, FrameGeometry};
    use bitreel_core::video::{FfmpegVideo, VideoError, VideoSink, VideoSource};

    fn have_ffmpeg() -> bool {
        Command::new("ffmpeg")
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    #[test]
    fn lossless_round_trip() {
        if !have_ffmpeg() {
            eprintln!("ffmpeg not found, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mkv");
        let g = FrameGeometry::new(32, 16);
        let frames = render_frames(&pack_bytes(b"through an external encoder"), g).unwrap();

        let video = FfmpegVideo::default();
        video.write_video(&path, g, &frames, 1).unwrap();
        let back = video.read_frames(&path, g).unwrap();
        assert_eq!(back.len(), frames.len());
        assert_eq!(
            parse_frame_sequence(&back, DEFAULT_THRESHOLD),
            parse_frame_sequence(&frames, DEFAULT_THRESHOLD)
        );
    }

    #[test]
    fn same_pixel_count_other_shape_is_a_mismatch() {
        if !have_ffmpeg() {
            eprintln!("ffmpeg not found, skipping");
            return;
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.mkv");
        let wide = FrameGeometry::new(32, 16);
        let frames = render_frames(&pack_bytes(&[0x5A; 16]), wide).unwrap();

        let video = FfmpegVideo::default();
        video.write_video(&path, wide, &frames, 1).unwrap();
        let err = video.read_frames(&path, FrameGeometry::new(16, 32)).unwrap_err();
        assert!(matches!(err, VideoError::GeometryMismatch { actual, .. } if actual == wide));
    }
}
