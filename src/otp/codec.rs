//! RFC 4648 Base32 encoding for shared secrets.
//!
//! Encoding is uppercase and unpadded (what authenticator apps expect in an
//! `otpauth://` URI). Decoding is tolerant: case-insensitive, spaces and
//! dashes stripped, `=` padding optional.

use crate::otp::types::{OtpError, OtpErrorKind};

/// Encode raw bytes to Base32 (uppercase, no `=` padding).
pub fn encode(bytes: &[u8]) -> String {
    base32::encode(base32::Alphabet::Rfc4648 { padding: false }, bytes)
}

/// Decode a Base32 secret, tolerating spaces, dashes, lowercase and padding.
///
/// Fails with `InvalidEncoding` when the input contains a character outside
/// the RFC 4648 alphabet.
pub fn decode(text: &str) -> Result<Vec<u8>, OtpError> {
    let cleaned = normalize(text);
    base32::decode(base32::Alphabet::Rfc4648 { padding: false }, &cleaned).ok_or_else(|| {
        OtpError::new(OtpErrorKind::InvalidEncoding, "Invalid base-32 input")
            .with_detail(format!("{} characters after normalisation", cleaned.len()))
    })
}

/// Canonical form of a Base32 secret: uppercase, no spaces/dashes/padding.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '='))
        .collect::<String>()
        .to_uppercase()
}

/// Check whether a string decodes as Base32.
pub fn is_valid(text: &str) -> bool {
    !normalize(text).is_empty() && decode(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_known_vector() {
        // RFC 4648 §10 vectors, minus the padding this codec omits.
        assert_eq!(encode(b""), "");
        assert_eq!(encode(b"f"), "MY");
        assert_eq!(encode(b"fo"), "MZXQ");
        assert_eq!(encode(b"foo"), "MZXW6");
        assert_eq!(encode(b"foob"), "MZXW6YQ");
        assert_eq!(encode(b"fooba"), "MZXW6YTB");
        assert_eq!(encode(b"foobar"), "MZXW6YTBOI");
    }

    #[test]
    fn encode_is_uppercase_unpadded() {
        let out = encode(b"12345678901234567890");
        assert_eq!(out, "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ");
        assert!(!out.contains('='));
    }

    #[test]
    fn roundtrip_all_lengths_up_to_64() {
        for len in 0..=64usize {
            let bytes: Vec<u8> = (0..len).map(|i| (i * 37 % 256) as u8).collect();
            let text = encode(&bytes);
            assert_eq!(decode(&text).unwrap(), bytes, "roundtrip failed at len {}", len);
        }
    }

    #[test]
    fn decode_tolerates_formatting() {
        let clean = decode("JBSWY3DPEHPK3PXP").unwrap();
        assert_eq!(decode("jbswy3dpehpk3pxp").unwrap(), clean);
        assert_eq!(decode("JBSW Y3DP EHPK 3PXP").unwrap(), clean);
        assert_eq!(decode("JBSW-Y3DP-EHPK-3PXP").unwrap(), clean);
        assert_eq!(decode("JBSWY3DPEHPK3PXP====").unwrap(), clean);
    }

    #[test]
    fn decode_rejects_foreign_characters() {
        let err = decode("not-base32!").unwrap_err();
        assert_eq!(err.kind, OtpErrorKind::InvalidEncoding);
        assert!(decode("ABC0").is_err()); // '0' and '1' are not in the alphabet
        assert!(decode("ABC1").is_err());
    }

    #[test]
    fn decode_empty_is_empty() {
        assert_eq!(decode("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn is_valid_check() {
        assert!(is_valid("JBSWY3DPEHPK3PXP"));
        assert!(is_valid("jbsw y3dp ehpk 3pxp"));
        assert!(!is_valid(""));
        assert!(!is_valid("!!!"));
    }
}
