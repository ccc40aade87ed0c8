use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use bibxml::{SourceFormat, convert_path, output_file_name};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Convert a BibTeX, RIS or reference-manager XML file into Word
/// bibliography XML.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Input file; `.bib`, `.ris` and `.xml` are recognized
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Where to write the result (defaults to `<input base name>.xml` next
    /// to the input)
    #[arg(short, long, value_name = "PATH", conflicts_with = "stdout")]
    output: Option<PathBuf>,

    /// Write the result to standard output
    #[arg(long)]
    stdout: bool,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn default_output(input: &Path) -> anyhow::Result<PathBuf> {
    let name = input
        .file_name()
        .and_then(|name| name.to_str())
        .context("input path has no usable file name")?;
    Ok(input.with_file_name(output_file_name(name)))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "bibxml=debug" } else { "bibxml=info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if SourceFormat::from_path(&args.input) == SourceFormat::Unsupported {
        info!(input = %args.input.display(), "unrecognized extension, writing an empty bibliography");
    }

    let xml = convert_path(&args.input)
        .with_context(|| format!("failed to convert {}", args.input.display()))?;

    if args.stdout {
        std::io::stdout()
            .lock()
            .write_all(&xml)
            .context("failed to write to stdout")?;
        return Ok(());
    }

    let output = match args.output {
        Some(path) => path,
        None => default_output(&args.input)?,
    };
    if output == args.input {
        bail!(
            "refusing to overwrite {}, pass --output or --stdout",
            args.input.display()
        );
    }

    fs::write(&output, &xml).with_context(|| format!("failed to write {}", output.display()))?;
    info!(output = %output.display(), "wrote bibliography");
    Ok(())
}
