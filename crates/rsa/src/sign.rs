//! RSASSA-PKCS1-v1_5 signing of document digests.

use base64::Engine;
use chrono::Utc;
use contract_sign_core::{
    DigestAlgorithm, IntegrityError, Result, Signature, SignedDigest, hash_content_hex, to_bytes,
};
use rsa::RsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::signature::{SignatureEncoding, Signer};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::keys::load_private_key;

/// Sign a hex digest with a PEM-encoded RSA private key.
///
/// The decoded digest bytes are handed to the signature primitive as the
/// message, so the primitive hashes them again with `algorithm` before
/// padding: the signed value is `hash(algorithm, digest_bytes)`.
#[tracing::instrument(skip(private_key_pem), fields(alg = %algorithm))]
pub fn sign_digest(
    digest_hex: &str,
    algorithm: DigestAlgorithm,
    private_key_pem: &str,
) -> Result<Signature> {
    let signed_at = Utc::now();
    let digest = to_bytes(digest_hex)?;
    let private_key = load_private_key(private_key_pem)?;

    let raw = sign_message(private_key, algorithm, &digest)?;
    let value = base64::engine::general_purpose::STANDARD.encode(&raw);

    tracing::info!(sig_len = raw.len(), "Signature created");

    Ok(Signature {
        value,
        algorithm,
        signed_at,
    })
}

/// Hash `content` and sign the resulting digest.
#[tracing::instrument(skip(content, private_key_pem), fields(data_len = content.len(), alg = %algorithm))]
pub fn sign_content(
    content: &[u8],
    algorithm: DigestAlgorithm,
    private_key_pem: &str,
) -> Result<SignedDigest> {
    let digest_hex = hash_content_hex(content, algorithm);
    let signature = sign_digest(&digest_hex, algorithm, private_key_pem)?;
    Ok(SignedDigest {
        digest_hex,
        signature,
    })
}

fn sign_message(
    private_key: RsaPrivateKey,
    algorithm: DigestAlgorithm,
    message: &[u8],
) -> Result<Vec<u8>> {
    let signature = match algorithm {
        DigestAlgorithm::Sha1 => SigningKey::<Sha1>::new(private_key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        DigestAlgorithm::Sha256 => SigningKey::<Sha256>::new(private_key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        DigestAlgorithm::Sha384 => SigningKey::<Sha384>::new(private_key)
            .try_sign(message)
            .map(|s| s.to_vec()),
        DigestAlgorithm::Sha512 => SigningKey::<Sha512>::new(private_key)
            .try_sign(message)
            .map(|s| s.to_vec()),
    };
    // The only way the primitive refuses is a modulus too small for the DigestInfo.
    signature.map_err(|e| IntegrityError::InvalidPrivateKey(e.to_string()))
}
