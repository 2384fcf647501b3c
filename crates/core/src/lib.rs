//! Core integrity primitives: digest computation, digest codecs and shared types.
//!
//! This crate has no key material handling and no I/O; the RSA backend and the CLI build on it.

pub mod codec;
pub mod digest;
pub mod error;
pub mod types;

pub use codec::{DigestEncoding, decode_digest, encode_digest, to_bytes, to_hex};
pub use digest::{
    DigestAlgorithm, compute_digest, digest_matches, encode_sri, ensure_digest_matches,
    hash_content, hash_content_hex, parse_sri,
};
pub use error::{IntegrityError, Result};
pub use types::*;
