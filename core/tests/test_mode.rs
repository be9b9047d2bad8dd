// Mode parsing.

#[cfg(test)]
mod tests {
    use bitreel_core::pipeline::Mode;
    use bitreel_core::types::BitreelError;

    #[test]
    fn accepts_both_modes_loosely() {
        for s in ["encode", "ENCODE", "  Encode\n"] {
            assert_eq!(s.parse::<Mode>().unwrap(), Mode::Encode);
        }
        for s in ["decode", "Decode", "\tdecode "] {
            assert_eq!(s.parse::<Mode>().unwrap(), Mode::Decode);
        }
    }

    #[test]
    fn anything_else_is_invalid_mode() {
        for s in ["", "enc", "encoder", "both", "decode encode"] {
            match s.parse::<Mode>() {
                Err(BitreelError::InvalidMode(got)) => assert_eq!(got, s.trim()),
                other => panic!("{:?} parsed as {:?}", s, other),
            }
        }
    }

    #[test]
    fn default_directories() {
        assert_eq!(Mode::Encode.default_dirs(), ("input_text", "output_video"));
        assert_eq!(Mode::Decode.default_dirs(), ("input_video", "output_text"));
        assert_eq!(Mode::Decode.to_string(), "decode");
    }
}
