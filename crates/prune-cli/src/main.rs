//! CLI binary for testprune: compare test functions across two Python files
//! and remove confirmed duplicates from the first, preserving formatting.

use anyhow::{Context, Result};
use clap::Parser;
use prune_core::engine::dedup;
use prune_core::error::PruneError;
use prune_core::extract::DEFAULT_PREFIX;
use prune_core::oracle::{IdenticalOracle, Oracle, Verdict};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "testprune",
    about = "Remove test functions from file1 that are equivalent to same-named tests in file2"
)]
struct Cli {
    /// File the confirmed duplicates are removed from.
    file1: PathBuf,

    /// File compared against. Never modified.
    file2: PathBuf,

    /// Name prefix a definition must have to count as a test.
    #[arg(short, long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Output path (defaults to file1 with `_cleaned` inserted before `.py`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip the prompt: treat byte-identical definitions as equivalent.
    #[arg(long)]
    auto: bool,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,
}

/// Terminal prompt oracle: shows both definitions, asks y/n, `q` aborts.
struct PromptOracle {
    file1: String,
    file2: String,
}

impl Oracle for PromptOracle {
    fn judge(&mut self, name: &str, left: &str, right: &str) -> Verdict {
        let rule = "=".repeat(80);
        println!("{rule}");
        println!("TEST: {name}");
        println!("{rule}");
        println!("\n--- FROM {} ---", self.file1);
        println!("{left}");
        println!("\n--- FROM {} ---", self.file2);
        println!("{right}");
        println!("\n{}", "-".repeat(80));
        print!("Are these equivalent? (y/n, q to quit): ");
        let _ = std::io::stdout().flush();

        let mut line = String::new();
        if std::io::stdin().lock().read_line(&mut line).is_err() || line.is_empty() {
            // EOF on stdin: treat like an explicit quit.
            return Verdict::Abort;
        }
        match line.trim().to_lowercase().as_str() {
            "y" | "yes" => {
                println!("✓ Marked '{name}' as equivalent\n");
                Verdict::Equivalent
            }
            "q" | "quit" => Verdict::Abort,
            _ => {
                println!("✗ Skipped '{name}'\n");
                Verdict::Distinct
            }
        }
    }
}

/// file1 with `_cleaned` before the `.py` suffix, or `.cleaned` appended.
fn default_output(file1: &Path) -> PathBuf {
    match file1.file_name().and_then(|n| n.to_str()) {
        Some(name) if name.ends_with(".py") => {
            let stem = &name[..name.len() - 3];
            file1.with_file_name(format!("{stem}_cleaned.py"))
        }
        _ => {
            let mut os = file1.as_os_str().to_os_string();
            os.push(".cleaned");
            PathBuf::from(os)
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let label1 = cli.file1.display().to_string();
    let label2 = cli.file2.display().to_string();

    let text1 = std::fs::read_to_string(&cli.file1)
        .with_context(|| format!("failed to read {label1}"))?;
    let text2 = std::fs::read_to_string(&cli.file2)
        .with_context(|| format!("failed to read {label2}"))?;

    let mut oracle: Box<dyn Oracle> = if cli.auto {
        Box::new(IdenticalOracle)
    } else {
        Box::new(PromptOracle {
            file1: label1.clone(),
            file2: label2.clone(),
        })
    };

    let outcome = match dedup(
        &label1,
        &text1,
        &label2,
        &text2,
        &cli.prefix,
        oracle.as_mut(),
    ) {
        Ok(outcome) => outcome,
        Err(e @ PruneError::Aborted { .. }) => {
            eprintln!("{e}");
            return Ok(());
        }
        Err(e) => return Err(e).context("deduplication failed"),
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "Found {} test(s) in {label1}, {} test(s) in {label2}, {} common name(s).",
            outcome.found_in_file1, outcome.found_in_file2, outcome.matched
        );
    }

    if !outcome.changed() {
        println!("No equivalent tests found. Nothing written.");
        return Ok(());
    }

    if !cli.json {
        println!(
            "\nSUMMARY: {} equivalent test(s) identified:",
            outcome.removed.len()
        );
        for name in &outcome.removed {
            println!("  - {name}");
        }
    }

    let output_path = cli.output.unwrap_or_else(|| default_output(&cli.file1));
    std::fs::write(&output_path, &outcome.output)
        .with_context(|| format!("failed to write {}", output_path.display()))?;
    println!(
        "\n✓ Removed {} test(s) from {label1}",
        outcome.removed.len()
    );
    println!("✓ Wrote modified file to: {}", output_path.display());

    Ok(())
}
