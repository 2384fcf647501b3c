//! Digest (hash) abstraction over the supported SHA family.

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest as _, Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;

use crate::codec::{self, DigestEncoding};
use crate::error::{IntegrityError, Result};

/// Supported digest algorithms.
///
/// The same algorithm is used to hash the content and, inside the signature
/// primitive, to hash that digest again before the RSA transform.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha1,
    #[default]
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 4] = [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    /// Returns the algorithm name in lowercase.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "sha1",
            DigestAlgorithm::Sha256 => "sha256",
            DigestAlgorithm::Sha384 => "sha384",
            DigestAlgorithm::Sha512 => "sha512",
        }
    }

    /// Parse algorithm from name string.
    pub fn from_name(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(DigestAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "sha384" | "sha-384" => Ok(DigestAlgorithm::Sha384),
            "sha512" | "sha-512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(IntegrityError::UnsupportedAlgorithm(s.to_string())),
        }
    }

    /// Output length in bytes for this algorithm.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = IntegrityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

/// Compute digest of the given data using the specified algorithm.
#[tracing::instrument(skip(data), fields(data_len = data.len(), alg = %algorithm))]
pub fn compute_digest(algorithm: DigestAlgorithm, data: &[u8]) -> Vec<u8> {
    match algorithm {
        DigestAlgorithm::Sha1 => Sha1::digest(data).to_vec(),
        DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
        DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
        DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
    }
}

/// Digest `content` and render it in `encoding`.
pub fn hash_content(content: &[u8], algorithm: DigestAlgorithm, encoding: DigestEncoding) -> String {
    codec::encode_digest(&compute_digest(algorithm, content), encoding)
}

/// Lower-case hex digest of `content`, the form the signing pipeline consumes.
pub fn hash_content_hex(content: &[u8], algorithm: DigestAlgorithm) -> String {
    hash_content(content, algorithm, DigestEncoding::Hex)
}

/// Whether `content` hashes to `expected_hex` under `algorithm`.
///
/// Digests that are not valid hex never match.
pub fn digest_matches(content: &[u8], algorithm: DigestAlgorithm, expected_hex: &str) -> bool {
    match codec::to_bytes(expected_hex) {
        Ok(expected) => compute_digest(algorithm, content) == expected,
        Err(_) => false,
    }
}

/// Like [`digest_matches`], but reports the mismatch as an error.
#[tracing::instrument(skip(content), fields(data_len = content.len(), alg = %algorithm))]
pub fn ensure_digest_matches(
    content: &[u8],
    algorithm: DigestAlgorithm,
    expected_hex: &str,
) -> Result<()> {
    let expected = codec::to_bytes(expected_hex)?;
    let actual = compute_digest(algorithm, content);
    if actual != expected {
        return Err(IntegrityError::DigestMismatch {
            expected: expected_hex.to_lowercase(),
            actual: codec::to_hex(&actual),
        });
    }
    Ok(())
}

/// Encode digest as SRI string (e.g., `sha256-<base64>`).
pub fn encode_sri(algorithm: DigestAlgorithm, digest: &[u8]) -> String {
    format!(
        "{}-{}",
        algorithm.name(),
        codec::encode_digest(digest, DigestEncoding::Base64)
    )
}

/// Parse SRI string into (algorithm, digest bytes).
pub fn parse_sri(sri: &str) -> Result<(DigestAlgorithm, Vec<u8>)> {
    let Some((alg_str, b64)) = sri.split_once('-') else {
        return Err(IntegrityError::MalformedDigest(
            "expected 'algorithm-base64'".to_string(),
        ));
    };
    let algorithm = DigestAlgorithm::from_name(alg_str)?;
    let digest = codec::decode_digest(b64, DigestEncoding::Base64)?;
    if digest.len() != algorithm.output_len() {
        return Err(IntegrityError::MalformedDigest(format!(
            "length mismatch for {}: expected {}, got {}",
            algorithm,
            algorithm.output_len(),
            digest.len()
        )));
    }
    Ok((algorithm, digest))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn known_vectors() {
        let data = b"hello world";
        assert_eq!(
            hash_content_hex(data, DigestAlgorithm::Sha1),
            "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed"
        );
        assert_eq!(
            hash_content_hex(data, DigestAlgorithm::Sha256),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn output_lengths_match_algorithms() {
        for alg in DigestAlgorithm::ALL {
            assert_eq!(compute_digest(alg, b"abc").len(), alg.output_len());
            assert_eq!(hash_content_hex(b"abc", alg).len(), alg.output_len() * 2);
        }
    }

    #[test]
    fn rejects_unknown_algorithm() {
        let err = DigestAlgorithm::from_name("md5").unwrap_err();
        assert_eq!(err, IntegrityError::UnsupportedAlgorithm("md5".into()));
        assert_eq!("SHA-384".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Sha384);
    }

    #[test]
    fn default_is_sha256() {
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha256);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&DigestAlgorithm::Sha512).unwrap();
        assert_eq!(json, "\"sha512\"");
    }

    #[test]
    fn base64_encoding() {
        // sha256("") in base64
        assert_eq!(
            hash_content(b"", DigestAlgorithm::Sha256, DigestEncoding::Base64),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn near_duplicates_have_distinct_digests() {
        let base = b"The quick brown fox jumps over the lazy dog".to_vec();
        for alg in DigestAlgorithm::ALL {
            let reference = hash_content_hex(&base, alg);
            for byte in 0..base.len() {
                for bit in 0..8 {
                    let mut flipped = base.clone();
                    flipped[byte] ^= 1 << bit;
                    assert_ne!(hash_content_hex(&flipped, alg), reference);
                }
            }
        }
    }

    #[test]
    fn comparison_is_case_insensitive() {
        let hex = hash_content_hex(b"contract", DigestAlgorithm::Sha256);
        assert!(digest_matches(b"contract", DigestAlgorithm::Sha256, &hex.to_uppercase()));
        assert!(!digest_matches(b"contract!", DigestAlgorithm::Sha256, &hex));
        assert!(!digest_matches(b"contract", DigestAlgorithm::Sha256, "zz"));
    }

    #[test]
    fn mismatch_reports_both_digests() {
        let expected = hash_content_hex(b"a", DigestAlgorithm::Sha1);
        let err = ensure_digest_matches(b"b", DigestAlgorithm::Sha1, &expected).unwrap_err();
        match err {
            IntegrityError::DigestMismatch { expected: e, actual } => {
                assert_eq!(e, expected);
                assert_eq!(actual, hash_content_hex(b"b", DigestAlgorithm::Sha1));
            }
            other => panic!("Expected DigestMismatch, got {other:?}"),
        }
    }

    #[test]
    fn sri_round_trip() {
        let digest = compute_digest(DigestAlgorithm::Sha384, b"pdf");
        let sri = encode_sri(DigestAlgorithm::Sha384, &digest);
        assert!(sri.starts_with("sha384-"));
        let (alg, parsed) = parse_sri(&sri).unwrap();
        assert_eq!(alg, DigestAlgorithm::Sha384);
        assert_eq!(parsed, digest);
    }

    #[test]
    fn sri_rejects_wrong_length() {
        let sri = encode_sri(DigestAlgorithm::Sha512, &[0u8; 32]);
        assert!(matches!(
            parse_sri(&sri),
            Err(IntegrityError::MalformedDigest(_))
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn digest_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            for alg in DigestAlgorithm::ALL {
                prop_assert_eq!(hash_content_hex(&data, alg), hash_content_hex(&data, alg));
            }
        }
    }
}
