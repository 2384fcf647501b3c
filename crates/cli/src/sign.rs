//! Sign command: hash a document, obtain a key and write the signature.

use anyhow::{Context, Result};
use console::style;
use contract_sign_core::{DigestAlgorithm, KeyPair, hash_content_hex};
use contract_sign_rsa::{generate_key_pair, public_key_from_private, sign_digest};
use std::path::PathBuf;

use crate::app::Outcome;
use crate::json::SignJson;
use crate::keystore::KeyDirectory;
use crate::util::{abbreviate, format_bytes, read_file, read_text, spinner};

/// Where the signing key came from.
enum KeySource {
    Generated(KeyPair),
    Provided {
        path: PathBuf,
        private_key: String,
        public_key: String,
    },
}

impl KeySource {
    fn private_key(&self) -> &str {
        match self {
            KeySource::Generated(pair) => &pair.private_key,
            KeySource::Provided { private_key, .. } => private_key,
        }
    }
}

pub fn sign_file(
    input: PathBuf,
    algorithm: String,
    output: PathBuf,
    key: Option<PathBuf>,
    bits: usize,
    json: bool,
) -> Result<Outcome> {
    eprintln!("{}", style("==> Signing document").cyan().bold());

    let algorithm = DigestAlgorithm::from_name(&algorithm)?;
    let keys = KeyDirectory::new(output);

    eprintln!("    Algorithm: {}", style(algorithm.name().to_uppercase()).cyan());
    eprintln!("    Key directory: {}", style(keys.root().display()).cyan());

    let data = read_file(&input, "document")?;

    let hashing = spinner(format!("Computing {} digest...", algorithm.name().to_uppercase()));
    let digest_hex = hash_content_hex(&data, algorithm);
    hashing.finish_with_message(format!(
        "[OK] Digest {}",
        style(abbreviate(&digest_hex, 16)).cyan()
    ));

    let source = match key {
        Some(path) => {
            let private_key = read_text(&path, "private key")?;
            let public_key = public_key_from_private(&private_key)
                .with_context(|| format!("Failed to load private key: {}", path.display()))?;
            eprintln!("    Using key: {}", style(path.display()).cyan());
            KeySource::Provided {
                path,
                private_key,
                public_key,
            }
        }
        None => {
            let generating = spinner(format!("Generating {}-bit RSA key pair...", bits));
            let pair = generate_key_pair(bits)?;
            generating.finish_with_message("[OK] Generated RSA key pair");
            KeySource::Generated(pair)
        }
    };

    let signing = spinner("Creating signature...");
    let signature = sign_digest(&digest_hex, algorithm, source.private_key())?;
    signing.finish_with_message(format!(
        "[OK] Created signature ({})",
        style(format_bytes(signature.value.len())).cyan()
    ));

    let private_key_path = match &source {
        KeySource::Generated(pair) => {
            keys.write_key_pair(pair)?;
            Some(keys.private_key_path())
        }
        KeySource::Provided { public_key, .. } => {
            keys.write_public_key(public_key)?;
            None
        }
    };
    let public_key_path = keys.public_key_path();
    let signature_path = keys.write_signature(&signature)?;

    eprintln!(
        "\n{} {}",
        style("[SUCCESS]").green().bold(),
        style("Signed successfully").cyan()
    );
    eprintln!("    Digest: {}", style(&digest_hex).cyan());
    eprintln!("    Signature: {}", style(abbreviate(&signature.value, 32)).cyan());
    eprintln!("    Signed at: {}", style(signature.signed_at.to_rfc3339()).cyan());
    eprintln!("    Public key: {}", style(public_key_path.display()).cyan());
    match (&source, &private_key_path) {
        (KeySource::Provided { path, .. }, _) => {
            eprintln!("    Private key (provided): {}", style(path.display()).cyan());
        }
        (KeySource::Generated(_), Some(path)) => {
            eprintln!("    Private key: {}", style(path.display()).cyan());
        }
        (KeySource::Generated(_), None) => {}
    }
    eprintln!("    Signature file: {}", style(signature_path.display()).cyan());

    if json {
        let payload = SignJson {
            status: "ok",
            command: "sign",
            input: input.display().to_string(),
            algorithm: algorithm.name(),
            digest: digest_hex,
            signature: signature.value.clone(),
            signed_at: signature.signed_at.to_rfc3339(),
            signature_file: signature_path.display().to_string(),
            public_key: public_key_path.display().to_string(),
            private_key: private_key_path.map(|p| p.display().to_string()),
            key_generated: matches!(source, KeySource::Generated(_)),
        };
        println!("{}", serde_json::to_string(&payload)?);
    } else {
        println!("{}", signature_path.display());
    }

    Ok(Outcome::Success)
}
