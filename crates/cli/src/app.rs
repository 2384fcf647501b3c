use crate::cli::{Cli, Commands};
use crate::json::ErrorJson;
use anyhow::Result;
use console::style;

/// Result of a command that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Signature invalid or digest mismatch.
    Rejected,
}

pub fn run(cli: Cli) -> Result<Outcome> {
    let json = cli.json;

    let result = match cli.command {
        Commands::Hash {
            input,
            algorithm,
            encoding,
            expected,
        } => crate::commands::hash_file(input, algorithm, encoding, expected, json),

        Commands::Keygen { output, bits } => crate::commands::keygen(output, bits, json),

        Commands::Sign {
            input,
            algorithm,
            output,
            key,
            bits,
        } => crate::sign::sign_file(input, algorithm, output, key, bits, json),

        Commands::Verify {
            input,
            algorithm,
            public_key,
            signature,
        } => crate::commands::verify_file(input, algorithm, public_key, signature, json),
    };

    if let Err(e) = &result {
        if json {
            let causes: Vec<String> = e.chain().skip(1).map(|c| c.to_string()).collect();
            let payload = ErrorJson {
                status: "error",
                error: e.to_string(),
                causes,
            };
            println!("{}", serde_json::to_string(&payload)?);
        } else {
            eprintln!("\n{} {}", style("[ERROR]").red().bold(), style(&e).red());

            for (i, cause) in e.chain().skip(1).enumerate() {
                if i == 0 {
                    eprintln!("\n    Caused by:");
                }
                eprintln!("      - {}", style(cause).red());
            }
            eprintln!();
        }
    }

    result
}
