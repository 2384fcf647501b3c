//! RSA backend: PKCS#1 key pairs and RSASSA-PKCS1-v1_5 signatures over document digests.
//!
//! Signing hands the decoded digest bytes to the primitive as the message, so
//! the value actually signed is `hash(algorithm, digest)`. Signatures made this
//! way do not verify under a "sign raw digest" (prehashed) primitive.

pub mod keygen;
pub mod keys;
pub mod sign;
pub mod verify;

pub use keygen::{DEFAULT_MODULUS_BITS, MIN_MODULUS_BITS, generate_key_pair};
pub use keys::{encode_public_key, load_private_key, load_public_key, public_key_from_private};
pub use sign::{sign_content, sign_digest};
pub use verify::{decode_signature, verify_content, verify_digest, verify_signature};
