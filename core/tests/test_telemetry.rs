// Batch telemetry as reported by the pipeline.

#[cfg(test)]
mod tests {
    use std::fs;

    use bitreel_core::prelude::*;
    use bitreel_core::telemetry::Stage;

    #[test]
    fn batch_counters_match_outcomes() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("in");
        fs::create_dir_all(&input).unwrap();
        fs::write(input.join("one.txt"), b"abc").unwrap();
        fs::write(input.join("two.txt"), b"defgh").unwrap();

        let config = CodecConfig { width: 8, height: 8, ..CodecConfig::default() };
        let videos = tmp.path().join("v");
        let codec = Codec::with_sidecar_dir(config, &videos).unwrap();
        let inputs = collect_inputs(&input, None).unwrap();
        let report = codec.encode_batch(&inputs, &videos, &CancelToken::new());

        let c = &report.telemetry.counters;
        assert_eq!(c.files_encoded, 2);
        assert_eq!(c.payload_bytes, 8);
        // header + base64 text, 8 bits per byte: (20 + 4) * 8 + (20 + 8) * 8
        assert_eq!(c.bits, 416);
        assert_eq!(c.frames, 3 + 4);
        assert_eq!(c.files_seen(), 2);
        assert!(report.telemetry.stage_times.get(Stage::Render) <= report.telemetry.elapsed);
        assert!(report.telemetry.sanity_check());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "encode");
        assert_eq!(json["outcomes"][0]["status"], "encoded");
        assert_eq!(json["outcomes"][0]["frames"], 3);
    }
}
