// Y4M backend on disk.

#[cfg(test)]
mod tests {
    use std::fs;

    use bitreel_core::bits::pack_bytes;
    use bitreel_core::frame::{render_frames, FrameGeometry};
    use bitreel_core::video::{VideoError, VideoSink, VideoSource, Y4mVideo};

    #[test]
    fn frames_survive_a_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.y4m");
        let g = FrameGeometry::new(16, 8);
        let frames = render_frames(&pack_bytes(&[0xA5; 40]), g).unwrap();
        assert_eq!(frames.len(), 3);

        let video = Y4mVideo::new();
        video.write_video(&path, g, &frames, 1).unwrap();
        assert_eq!(video.read_frames(&path, g).unwrap(), frames);
    }

    #[test]
    fn file_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.y4m");
        let g = FrameGeometry::new(2, 2);
        let frames = render_frames(&[true, false, false, true].into_iter().collect(), g).unwrap();
        Y4mVideo::new().write_video(&path, g, &frames, 1).unwrap();

        let mut expected = b"YUV4MPEG2 W2 H2 F1:1 Ip A1:1 Cmono\nFRAME\n".to_vec();
        expected.extend_from_slice(&[255, 0, 0, 255]);
        assert_eq!(fs::read(&path).unwrap(), expected);
    }

    #[test]
    fn zero_frame_video_reads_back_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.y4m");
        let g = FrameGeometry::new(4, 4);
        Y4mVideo::new().write_video(&path, g, &[], 1).unwrap();
        assert!(Y4mVideo::new().read_frames(&path, g).unwrap().is_empty());
    }

    #[test]
    fn geometry_must_match_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.y4m");
        let g = FrameGeometry::new(4, 4);
        let frames = render_frames(&pack_bytes(b"ab"), g).unwrap();
        Y4mVideo::new().write_video(&path, g, &frames, 1).unwrap();

        let err = Y4mVideo::new().read_frames(&path, FrameGeometry::new(8, 2)).unwrap_err();
        assert!(matches!(err, VideoError::GeometryMismatch { .. }));
    }

    #[test]
    fn not_a_y4m_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.y4m");
        fs::write(&path, b"RIFF....AVI \n").unwrap();
        let err = Y4mVideo::new().read_frames(&path, FrameGeometry::new(4, 4)).unwrap_err();
        assert!(matches!(err, VideoError::Malformed(_)));
    }

    #[test]
    fn missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let err = Y4mVideo::new()
            .read_frames(&dir.path().join("nope.y4m"), FrameGeometry::new(4, 4))
            .unwrap_err();
        assert!(matches!(err, VideoError::Io(_)));
    }
}
