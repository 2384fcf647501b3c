use clap::{Parser, Subcommand};
use contract_sign_rsa::DEFAULT_MODULUS_BITS;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "contract-sign",
    version,
    about = "Hash, sign and verify documents with RSA signatures",
    long_about = "Compute document digests and sign or verify them with RSA PKCS#1 v1.5 keys.\n\
                  Keys and signatures are kept as plain PEM/base64 files in a key directory."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output machine-readable JSON to stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the digest of a file
    Hash {
        /// Path to the file to hash
        input: PathBuf,

        /// Digest algorithm (sha1, sha256, sha384, sha512)
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,

        /// Output encoding of the digest (hex, base64)
        #[arg(short, long, default_value = "hex")]
        encoding: String,

        /// Expected hex digest; exits with status 1 if the file does not match
        #[arg(long)]
        expected: Option<String>,
    },

    /// Generate an RSA key pair into a key directory
    Keygen {
        /// Directory receiving public.pem and private.pem
        #[arg(short, long, env = "CONTRACT_SIGN_KEY_DIR", default_value = "./keys")]
        output: PathBuf,

        /// RSA modulus length in bits (at least 2048)
        #[arg(long, default_value_t = DEFAULT_MODULUS_BITS)]
        bits: usize,
    },

    /// Sign the digest of a file
    Sign {
        /// Path to the file to sign
        input: PathBuf,

        /// Digest algorithm (sha1, sha256, sha384, sha512)
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,

        /// Directory receiving signature.txt (and the keys, when generated)
        #[arg(short, long, env = "CONTRACT_SIGN_KEY_DIR", default_value = "./keys")]
        output: PathBuf,

        /// Existing private key (PEM); a new key pair is generated if omitted
        #[arg(short, long)]
        key: Option<PathBuf>,

        /// RSA modulus length in bits for a generated key pair
        #[arg(long, default_value_t = DEFAULT_MODULUS_BITS, conflicts_with = "key")]
        bits: usize,
    },

    /// Verify the signature over the digest of a file
    Verify {
        /// Path to the file to verify
        input: PathBuf,

        /// Digest algorithm the signature was made with
        #[arg(short, long, default_value = "sha256")]
        algorithm: String,

        /// Public key file (PEM)
        #[arg(short, long)]
        public_key: PathBuf,

        /// Signature file (base64 text)
        #[arg(short, long)]
        signature: PathBuf,
    },
}
