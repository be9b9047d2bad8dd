// Payload header wire format and validation.

#[cfg(test)]
mod tests {
    use bitreel_core::constants::PAYLOAD_MAGIC;
    use bitreel_core::headers::{
        decode_header_le, decode_payload, encode_header_le, encode_payload, is_framed, HeaderError,
        PayloadFlags, PayloadHeader, PAYLOAD_HEADER_LEN,
    };
    use bitreel_core::text::Alphabet;

    #[test]
    fn header_is_twenty_bytes_little_endian() {
        let h = PayloadHeader::for_text("QUIA", Alphabet::Standard);
        let wire = encode_header_le(&h);
        assert_eq!(wire.len(), PAYLOAD_HEADER_LEN);
        assert_eq!(&wire[0..4], &PAYLOAD_MAGIC);
        assert_eq!(wire[4], 1);
        assert_eq!(&wire[8..16], &4u64.to_le_bytes());
        assert_eq!(&wire[16..20], &crc32fast::hash(b"QUIA").to_le_bytes());
        assert_eq!(decode_header_le(&wire).unwrap(), h);
    }

    #[test]
    fn base64_text_never_looks_framed() {
        for c in b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/-_=" {
            assert!(!is_framed(&[*c]));
        }
        assert!(!is_framed(&[]));
        assert!(is_framed(&encode_payload("", Alphabet::Standard)));
    }

    #[test]
    fn url_safe_flag_round_trips() {
        let h = PayloadHeader::for_text("-_", Alphabet::UrlSafe);
        assert!(h.flags.contains(PayloadFlags::URL_SAFE));
        let back = decode_header_le(&encode_header_le(&h)).unwrap();
        assert_eq!(back.alphabet(), Alphabet::UrlSafe);
    }

    #[test]
    fn trailing_padding_is_ignored() {
        let mut buf = encode_payload("Zm9v", Alphabet::Standard);
        buf.extend_from_slice(&[0; 64]);
        let (h, text) = decode_payload(&buf).unwrap();
        assert_eq!(h.text_len, 4);
        assert_eq!(text, b"Zm9v");
    }

    #[test]
    fn corrupted_text_fails_crc() {
        let mut buf = encode_payload("Zm9v", Alphabet::Standard);
        buf[PAYLOAD_HEADER_LEN] = b'Y';
        assert!(matches!(decode_payload(&buf), Err(HeaderError::CrcMismatch { .. })));
    }

    #[test]
    fn truncated_text_is_reported() {
        let buf = encode_payload("Zm9vYmFy", Alphabet::Standard);
        let cut = &buf[..buf.len() - 2];
        assert!(matches!(decode_payload(cut), Err(HeaderError::Truncated { .. })));
    }

    #[test]
    fn bad_magic_version_and_flags() {
        let good = encode_header_le(&PayloadHeader::for_text("", Alphabet::Standard));

        let mut bad = good;
        bad[1] = b'X';
        assert!(matches!(decode_header_le(&bad), Err(HeaderError::InvalidMagic { .. })));

        let mut bad = good;
        bad[4] = 9;
        assert!(matches!(decode_header_le(&bad), Err(HeaderError::UnsupportedVersion(9))));

        let mut bad = good;
        bad[6] = 0x80;
        assert!(matches!(decode_header_le(&bad), Err(HeaderError::UnknownFlags(_))));

        assert!(matches!(
            decode_header_le(&good[..10]),
            Err(HeaderError::Truncated { have: 10, need: 20 })
        ));
    }
}
