//! Hash, keygen and verify commands.

use anyhow::{Context, Result};
use console::style;
use contract_sign_core::{
    DigestAlgorithm, DigestEncoding, compute_digest, encode_digest, encode_sri, to_bytes, to_hex,
};
use contract_sign_rsa::{generate_key_pair, verify_digest};
use std::io::IsTerminal;
use std::path::PathBuf;

use crate::app::Outcome;
use crate::json::{HashJson, KeygenJson, VerifyJson};
use crate::keystore::KeyDirectory;
use crate::util::{abbreviate, format_bytes, read_file, read_text, spinner};

pub fn hash_file(
    input: PathBuf,
    algorithm: String,
    encoding: String,
    expected: Option<String>,
    json: bool,
) -> Result<Outcome> {
    eprintln!("{}", style("==> Computing document digest").cyan().bold());

    let algorithm = DigestAlgorithm::from_name(&algorithm)?;
    let encoding = DigestEncoding::from_name(&encoding)?;
    let expected = expected
        .map(|hex| to_bytes(&hex).context("Invalid --expected digest"))
        .transpose()?;

    let data = read_file(&input, "document")?;

    let hashing = spinner(format!("Computing {} digest...", algorithm.name().to_uppercase()));
    let digest = compute_digest(algorithm, &data);
    hashing.finish_and_clear();

    let rendered = encode_digest(&digest, encoding);
    let matches = expected.as_ref().map(|e| *e == digest);

    eprintln!("    Algorithm: {}", style(algorithm.name().to_uppercase()).cyan());
    eprintln!("    Digest: {}", style(&rendered).cyan());
    eprintln!("    Size: {}", style(format_bytes(data.len())).cyan());

    match (&expected, matches) {
        (Some(_), Some(true)) => eprintln!(
            "\n{} {}",
            style("[MATCH]").green().bold(),
            style("Digest matches the expected value").green()
        ),
        (Some(e), Some(false)) => eprintln!(
            "\n{} {} {}",
            style("[MISMATCH]").red().bold(),
            style("Expected").red(),
            style(to_hex(e)).red()
        ),
        _ => {}
    }

    if json {
        let payload = HashJson {
            status: if matches == Some(false) { "mismatch" } else { "ok" },
            command: "hash",
            input: input.display().to_string(),
            algorithm: algorithm.name(),
            encoding: encoding.name(),
            digest: rendered,
            digest_sri: encode_sri(algorithm, &digest),
            size: data.len(),
            matches,
        };
        println!("{}", serde_json::to_string(&payload)?);
    } else {
        println!("{}", rendered);
    }

    Ok(if matches == Some(false) {
        Outcome::Rejected
    } else {
        Outcome::Success
    })
}

pub fn keygen(output: PathBuf, bits: usize, json: bool) -> Result<Outcome> {
    eprintln!("{}", style("==> Generating RSA key pair").cyan().bold());

    let keys = KeyDirectory::new(output);
    let generating = spinner(format!("Generating {}-bit RSA key pair...", bits));
    let pair = generate_key_pair(bits)?;
    generating.finish_with_message("[OK] Generated RSA key pair");

    keys.write_key_pair(&pair)?;

    eprintln!(
        "\n{} {}",
        style("[SUCCESS]").green().bold(),
        style("Key pair written").cyan()
    );
    eprintln!("    Public key: {}", style(keys.public_key_path().display()).cyan());
    eprintln!("    Private key: {}", style(keys.private_key_path().display()).cyan());

    if json {
        let payload = KeygenJson {
            status: "ok",
            command: "keygen",
            modulus_bits: pair.modulus_bits,
            public_key: keys.public_key_path().display().to_string(),
            private_key: keys.private_key_path().display().to_string(),
        };
        println!("{}", serde_json::to_string(&payload)?);
    } else {
        println!("{}", keys.root().display());
    }

    Ok(Outcome::Success)
}

pub fn verify_file(
    input: PathBuf,
    algorithm: String,
    public_key: PathBuf,
    signature: PathBuf,
    json: bool,
) -> Result<Outcome> {
    eprintln!("{}", style("==> Verifying document signature").cyan().bold());

    let algorithm = DigestAlgorithm::from_name(&algorithm)?;
    let data = read_file(&input, "document")?;
    let public_key_pem = read_text(&public_key, "public key")?;
    let signature_b64 = read_text(&signature, "signature")?;

    let hashing = spinner(format!("Computing {} digest...", algorithm.name().to_uppercase()));
    let digest_hex = to_hex(&compute_digest(algorithm, &data));
    hashing.finish_with_message(format!(
        "[OK] Digest {}",
        style(abbreviate(&digest_hex, 16)).cyan()
    ));

    let verifying = spinner("Verifying signature...");
    let valid = verify_digest(algorithm, &digest_hex, &public_key_pem, &signature_b64)?;
    verifying.finish_and_clear();

    if valid {
        eprintln!(
            "\n{} {}",
            style("[VALID]").green().bold(),
            style("Signature verified; the document has not been modified").green()
        );
    } else {
        eprintln!(
            "\n{} {}",
            style("[INVALID]").red().bold(),
            style("Signature does not match; the document or key differs").red()
        );
    }
    eprintln!("    Algorithm: {}", style(algorithm.name().to_uppercase()).cyan());
    eprintln!("    Digest: {}", style(&digest_hex).cyan());
    eprintln!(
        "    Signature: {}",
        style(abbreviate(signature_b64.trim(), 32)).cyan()
    );
    eprintln!("    Public key: {}", style(public_key.display()).cyan());

    if json {
        let payload = VerifyJson {
            status: if valid { "ok" } else { "invalid" },
            command: "verify",
            input: input.display().to_string(),
            algorithm: algorithm.name(),
            digest: digest_hex,
            public_key: public_key.display().to_string(),
            signature_file: signature.display().to_string(),
            valid,
        };
        println!("{}", serde_json::to_string(&payload)?);
    } else if !std::io::stdout().is_terminal() {
        // Only print when stdout is piped (for pipeline composition)
        println!("{}", if valid { "OK" } else { "INVALID" });
    }

    Ok(if valid {
        Outcome::Success
    } else {
        Outcome::Rejected
    })
}
