//! Conversion between textual digests and their raw bytes.

use base64::Engine;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IntegrityError, Result};

/// Text encodings a digest can be rendered in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestEncoding {
    #[default]
    Hex,
    Base64,
}

impl DigestEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            DigestEncoding::Hex => "hex",
            DigestEncoding::Base64 => "base64",
        }
    }

    pub fn from_name(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(DigestEncoding::Hex),
            "base64" => Ok(DigestEncoding::Base64),
            _ => Err(IntegrityError::UnsupportedEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for DigestEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestEncoding {
    type Err = IntegrityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Decode a hex digest into raw bytes.
///
/// Upper-case digits are accepted; odd lengths and non-hex characters are not.
pub fn to_bytes(hex_digest: &str) -> Result<Vec<u8>> {
    hex::decode(hex_digest).map_err(|e| IntegrityError::MalformedDigest(e.to_string()))
}

/// Lower-case hex rendering of raw digest bytes.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Decode a digest rendered in `encoding`.
///
/// Base64 input may be padded or unpadded.
pub fn decode_digest(text: &str, encoding: DigestEncoding) -> Result<Vec<u8>> {
    match encoding {
        DigestEncoding::Hex => to_bytes(text),
        DigestEncoding::Base64 => base64::engine::general_purpose::STANDARD
            .decode(text)
            .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(text))
            .map_err(|e| IntegrityError::MalformedDigest(e.to_string())),
    }
}

/// Render raw digest bytes in `encoding`.
pub fn encode_digest(bytes: &[u8], encoding: DigestEncoding) -> String {
    match encoding {
        DigestEncoding::Hex => to_hex(bytes),
        DigestEncoding::Base64 => base64::engine::general_purpose::STANDARD.encode(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_hex_characters() {
        let err = to_bytes("zzz").unwrap_err();
        assert!(matches!(err, IntegrityError::MalformedDigest(_)));
    }

    #[test]
    fn rejects_odd_length() {
        let err = to_bytes("abc").unwrap_err();
        assert!(matches!(err, IntegrityError::MalformedDigest(_)));
    }

    #[test]
    fn empty_string_is_empty_digest() {
        assert_eq!(to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn accepts_upper_case_and_emits_lower_case() {
        let bytes = to_bytes("DEADBEEF").unwrap();
        assert_eq!(bytes, vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(to_hex(&bytes), "deadbeef");
    }

    #[test]
    fn base64_accepts_unpadded() {
        let bytes = vec![1u8, 2, 3, 4];
        let padded = encode_digest(&bytes, DigestEncoding::Base64);
        assert!(padded.ends_with('='));
        let decoded = decode_digest(padded.trim_end_matches('='), DigestEncoding::Base64).unwrap();
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn base64_rejects_garbage() {
        let err = decode_digest("not base64!", DigestEncoding::Base64).unwrap_err();
        assert!(matches!(err, IntegrityError::MalformedDigest(_)));
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let err = DigestEncoding::from_name("latin1").unwrap_err();
        assert_eq!(err, IntegrityError::UnsupportedEncoding("latin1".into()));
        assert_eq!("BASE64".parse::<DigestEncoding>().unwrap(), DigestEncoding::Base64);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn hex_text_survives_decode_encode(s in "([0-9a-f]{2}){0,64}") {
            prop_assert_eq!(to_hex(&to_bytes(&s).unwrap()), s);
        }

        #[test]
        fn bytes_survive_encode_decode(bytes in proptest::collection::vec(any::<u8>(), 0..128)) {
            prop_assert_eq!(to_bytes(&to_hex(&bytes)).unwrap(), bytes);
        }
    }
}
