//! JSON output formats.

use serde::Serialize;

#[derive(Serialize)]
pub struct HashJson<'a> {
    pub status: &'a str,
    pub command: &'a str,
    pub input: String,
    pub algorithm: &'a str,
    pub encoding: &'a str,
    pub digest: String,
    pub digest_sri: String,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<bool>,
}

#[derive(Serialize)]
pub struct KeygenJson<'a> {
    pub status: &'a str,
    pub command: &'a str,
    pub modulus_bits: usize,
    pub public_key: String,
    pub private_key: String,
}

#[derive(Serialize)]
pub struct SignJson<'a> {
    pub status: &'a str,
    pub command: &'a str,
    pub input: String,
    pub algorithm: &'a str,
    pub digest: String,
    pub signature: String,
    pub signed_at: String,
    pub signature_file: String,
    pub public_key: String,
    /// Set only when a fresh key pair was written.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    pub key_generated: bool,
}

#[derive(Serialize)]
pub struct VerifyJson<'a> {
    pub status: &'a str,
    pub command: &'a str,
    pub input: String,
    pub algorithm: &'a str,
    pub digest: String,
    pub public_key: String,
    pub signature_file: String,
    pub valid: bool,
}

#[derive(Serialize)]
pub struct ErrorJson<'a> {
    pub status: &'a str,
    pub error: String,
    pub causes: Vec<String>,
}
