//! RSASSA-PKCS1-v1_5 verification of document digests.

use base64::Engine;
use contract_sign_core::{
    DigestAlgorithm, IntegrityError, Result, Signature, hash_content_hex, to_bytes,
};
use rsa::RsaPublicKey;
use rsa::pkcs1v15::{Signature as Pkcs1v15Signature, VerifyingKey};
use rsa::signature::Verifier;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::keys::load_public_key;

/// Check a base64 signature over a hex digest against a PEM-encoded public key.
///
/// Mirrors [`crate::sign_digest`]: the digest bytes are re-hashed with
/// `algorithm` inside the primitive. A signature that does not verify yields
/// `Ok(false)`; errors are reserved for inputs that cannot be interpreted.
#[tracing::instrument(skip(public_key_pem, signature_b64), fields(alg = %algorithm))]
pub fn verify_digest(
    algorithm: DigestAlgorithm,
    digest_hex: &str,
    public_key_pem: &str,
    signature_b64: &str,
) -> Result<bool> {
    let digest = to_bytes(digest_hex)?;
    let signature = decode_signature(signature_b64)?;
    let public_key = load_public_key(public_key_pem)?;

    let valid = verify_message(public_key, algorithm, &digest, &signature);
    if valid {
        tracing::info!("Signature verified");
    } else {
        tracing::warn!("Signature did not verify");
    }
    Ok(valid)
}

/// Verify a [`Signature`] using the algorithm it was made with.
pub fn verify_signature(
    signature: &Signature,
    digest_hex: &str,
    public_key_pem: &str,
) -> Result<bool> {
    verify_digest(
        signature.algorithm,
        digest_hex,
        public_key_pem,
        &signature.value,
    )
}

/// Hash `content` and check the signature over the resulting digest.
#[tracing::instrument(skip(content, public_key_pem, signature_b64), fields(data_len = content.len(), alg = %algorithm))]
pub fn verify_content(
    content: &[u8],
    algorithm: DigestAlgorithm,
    public_key_pem: &str,
    signature_b64: &str,
) -> Result<bool> {
    let digest_hex = hash_content_hex(content, algorithm);
    verify_digest(algorithm, &digest_hex, public_key_pem, signature_b64)
}

/// Decode signature text as stored on disk.
///
/// Surrounding whitespace is ignored; padded and unpadded base64 are accepted.
pub fn decode_signature(signature_b64: &str) -> Result<Vec<u8>> {
    let text = signature_b64.trim();
    base64::engine::general_purpose::STANDARD
        .decode(text)
        .or_else(|_| base64::engine::general_purpose::STANDARD_NO_PAD.decode(text))
        .map_err(|e| IntegrityError::MalformedSignature(e.to_string()))
}

fn verify_message(
    public_key: RsaPublicKey,
    algorithm: DigestAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> bool {
    let Ok(signature) = Pkcs1v15Signature::try_from(signature) else {
        return false;
    };
    let outcome = match algorithm {
        DigestAlgorithm::Sha1 => VerifyingKey::<Sha1>::new(public_key).verify(message, &signature),
        DigestAlgorithm::Sha256 => {
            VerifyingKey::<Sha256>::new(public_key).verify(message, &signature)
        }
        DigestAlgorithm::Sha384 => {
            VerifyingKey::<Sha384>::new(public_key).verify(message, &signature)
        }
        DigestAlgorithm::Sha512 => {
            VerifyingKey::<Sha512>::new(public_key).verify(message, &signature)
        }
    };
    if let Err(e) = &outcome {
        tracing::debug!(error = %e, "PKCS#1 v1.5 verification failed");
    }
    outcome.is_ok()
}
