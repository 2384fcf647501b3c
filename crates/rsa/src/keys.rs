//! Parsing and encoding of RSA keys in PEM form.
//!
//! Keys are written as PKCS#1 (`RSA PUBLIC KEY` / `RSA PRIVATE KEY`). On input,
//! PKCS#8 and SPKI PEM are accepted as a fallback.

use contract_sign_core::{IntegrityError, Result};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPublicKey, LineEnding};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// Parse a PEM-encoded RSA private key.
#[tracing::instrument(skip(pem), fields(pem_len = pem.len()))]
pub fn load_private_key(pem: &str) -> Result<RsaPrivateKey> {
    let pem = pem.trim();
    RsaPrivateKey::from_pkcs1_pem(pem).or_else(|pkcs1_err| {
        tracing::debug!("Not a PKCS#1 private key, trying PKCS#8");
        RsaPrivateKey::from_pkcs8_pem(pem)
            .map_err(|_| IntegrityError::InvalidPrivateKey(pkcs1_err.to_string()))
    })
}

/// Parse a PEM-encoded RSA public key.
#[tracing::instrument(skip(pem), fields(pem_len = pem.len()))]
pub fn load_public_key(pem: &str) -> Result<RsaPublicKey> {
    let pem = pem.trim();
    RsaPublicKey::from_pkcs1_pem(pem).or_else(|pkcs1_err| {
        tracing::debug!("Not a PKCS#1 public key, trying SPKI");
        RsaPublicKey::from_public_key_pem(pem)
            .map_err(|_| IntegrityError::InvalidPublicKey(pkcs1_err.to_string()))
    })
}

/// PKCS#1 PEM rendering of a public key.
pub fn encode_public_key(key: &RsaPublicKey) -> Result<String> {
    key.to_pkcs1_pem(LineEnding::LF)
        .map_err(|e| IntegrityError::InvalidPublicKey(e.to_string()))
}

/// Derive the PKCS#1 public key PEM that pairs with `private_key_pem`.
#[tracing::instrument(skip(private_key_pem))]
pub fn public_key_from_private(private_key_pem: &str) -> Result<String> {
    let private_key = load_private_key(private_key_pem)?;
    encode_public_key(&private_key.to_public_key())
}
