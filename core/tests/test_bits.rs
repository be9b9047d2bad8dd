// Bit packing and the text layer together: every base64 character is one
// octet, so zero bytes survive as long as they go through the text first.

#[cfg(test)]
mod tests {
    use bitreel_core::bits::{pack, pack_bytes, unpack, unpack_bytes, BitSequence};
    use bitreel_core::text::{bytes_to_text, text_to_bytes, Alphabet};

    #[test]
    fn ab_zero_through_text_is_32_bits() {
        let text = bytes_to_text(b"AB\x00", Alphabet::Standard);
        assert_eq!(text, "QUIA");

        let bits = pack(&text).unwrap();
        assert_eq!(bits.len(), 32);

        let back = text_to_bytes(unpack(&bits), Alphabet::Standard).unwrap();
        assert_eq!(back, b"AB\x00");
    }

    #[test]
    fn raw_packing_loses_interior_zero_under_legacy_unpack() {
        let bits = pack_bytes(b"AB\x00C");
        assert_eq!(unpack(&bits), "ABC");
        assert_eq!(unpack_bytes(&bits), b"AB\x00C");
    }

    #[test]
    fn padding_to_frame_size_is_invisible() {
        let mut bits = pack("Zm9v").unwrap();
        bits.extend(std::iter::repeat(false).take(65536 - 32));
        assert_eq!(unpack(&bits), "Zm9v");
    }

    #[test]
    fn bits_per_char_is_eight() {
        let text = "abcdefg";
        assert_eq!(pack(text).unwrap().len(), text.len() * 8);
    }

    #[test]
    fn wide_character_is_rejected_with_position() {
        let err = pack("ab\u{263a}").unwrap_err();
        assert!(err.to_string().contains("index 2"), "{}", err);
    }

    #[test]
    fn sequence_helpers() {
        let mut bits: BitSequence = vec![true, false, true].into();
        assert_eq!(bits.iter().filter(|b| **b).count(), 2);
        bits.push_octet(0xff);
        assert_eq!(bits.len(), 11);
        assert_eq!(bits.to_string(), "10111111111");
    }
}
