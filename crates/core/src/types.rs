//! Common types and result structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::digest::DigestAlgorithm;

/// RSA key pair, both halves PEM-encoded in PKCS#1 form.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPair {
    pub public_key: String,
    pub private_key: String,
    pub modulus_bits: usize,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("modulus_bits", &self.modulus_bits)
            .finish()
    }
}

/// Signature over a digest.
///
/// It says nothing about which content the digest came from, so callers keep
/// the content (or its digest) next to it for later verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Base64 (standard alphabet, padded) signature bytes.
    pub value: String,
    pub algorithm: DigestAlgorithm,
    pub signed_at: DateTime<Utc>,
}

/// Digest of some content together with the signature made over it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedDigest {
    pub digest_hex: String,
    pub signature: Signature,
}
