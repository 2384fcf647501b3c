//! Error taxonomy shared by every integrity operation.

use thiserror::Error;

/// Errors raised while hashing, encoding, signing or verifying.
///
/// A signature that simply fails to verify is not an error; verification
/// reports that as `Ok(false)`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("unsupported digest algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("unsupported digest encoding: {0}")]
    UnsupportedEncoding(String),

    #[error("malformed digest: {0}")]
    MalformedDigest(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("modulus length {requested} is below the minimum of {minimum} bits")]
    WeakKeySize { requested: usize, minimum: usize },

    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}

pub type Result<T> = std::result::Result<T, IntegrityError>;
