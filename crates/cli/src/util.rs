//! CLI utility functions.

use anyhow::{Context, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::time::Duration;

pub fn format_bytes(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const KB_TO_MB_ROUNDING_THRESHOLD: usize = 1_048_525;

    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < KB_TO_MB_ROUNDING_THRESHOLD {
        format!("{:.1} KB", bytes as f64 / KB)
    } else {
        format!("{:.2} MB", bytes as f64 / MB)
    }
}

/// Steadily ticking spinner on stderr.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message(message.into());
    spinner
}

/// Read a whole file, reporting progress under `label`.
pub fn read_file(path: &Path, label: &str) -> Result<Vec<u8>> {
    let spinner = spinner(format!("Reading {} {}", label, style(path.display()).cyan()));
    let mut data = Vec::new();
    let mut file = BufReader::new(
        File::open(path).with_context(|| format!("Failed to open {}: {}", label, path.display()))?,
    );
    file.read_to_end(&mut data)
        .with_context(|| format!("Failed to read {}: {}", label, path.display()))?;
    spinner.finish_with_message(format!(
        "[OK] Read {} ({})",
        label,
        style(format_bytes(data.len())).cyan()
    ));
    Ok(data)
}

/// Read a UTF-8 text file such as a PEM key or a signature.
pub fn read_text(path: &Path, label: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}: {}", label, path.display()))
}

/// First `len` characters of `s`, followed by an ellipsis when truncated.
pub fn abbreviate(s: &str, len: usize) -> String {
    match s.char_indices().nth(len) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_displays_1024_kb_due_to_rounding() {
        for bytes in 1_048_560..1_048_576 {
            let s = format_bytes(bytes);
            assert!(
                !s.contains("KB") || !s.contains("1024.0"),
                "unexpected formatting for {bytes}: {s}"
            );
        }
    }

    #[test]
    fn boundary_at_rounding_threshold() {
        assert!(format_bytes(1_048_524).ends_with("KB"));
        assert!(format_bytes(1_048_525).ends_with("MB"));
        assert_eq!(format_bytes(1_048_576), "1.00 MB");
    }

    #[test]
    fn abbreviates_long_values_only() {
        assert_eq!(abbreviate("abcdef", 4), "abcd...");
        assert_eq!(abbreviate("abc", 4), "abc");
    }

    #[test]
    fn read_file_reports_missing_path() {
        let err = read_file(Path::new("/definitely/not/here.pdf"), "document").unwrap_err();
        assert!(err.to_string().contains("Failed to open document"));
    }
}
