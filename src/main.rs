use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use aleron_lexer::scanner::{self, SourceBuffer};

#[derive(Parser, Debug)]
#[command(name = "aleron-lexer", about = "Tokenize an Aleron source file")]
struct Cli {
    /// Source file to tokenize
    file: PathBuf,

    /// Token output format
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    format: String,

    /// Render diagnostics as annotated source snippets
    #[arg(long)]
    fancy: bool,
}

/// Log to stderr when `RUST_LOG` is set, e.g. `RUST_LOG=aleron_lexer=trace`.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn read_source(path: &Path) -> Result<SourceBuffer> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read source file '{}'", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceBuffer::new(name, bytes))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let source = read_source(&cli.file)?;
    let result = scanner::scan(&source);

    if result.had_error {
        eprintln!("Lexer had errors");
        for diagnostic in result.diagnostics.into_iter().filter(|d| !d.is_ok()) {
            if cli.fancy {
                let report = miette::Report::new(diagnostic.with_source_code(&source));
                eprintln!("{report:?}");
            } else {
                eprintln!("{diagnostic}");
            }
        }
    }

    match cli.format.as_str() {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&result.tokens).context("serialize tokens to JSON")?
        ),
        _ => print!("{}", scanner::dump(&result.tokens)),
    }

    if result.had_error {
        bail!("lexing '{}' failed", source.name());
    }
    Ok(())
}
