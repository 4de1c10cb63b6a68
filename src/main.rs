//! Main entry point for the screenplay-import CLI application.
//!
//! Reads a local file or HTTP URL, imports it, and prints the result as a
//! formatted page or as JSON.

use anyhow::{Result, bail};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use screenplay_import::pipeline::decode_text;
use screenplay_import::style::render_plain;
use screenplay_import::{
    Cli, ImportOptions, ImportPipeline, InputFormat, ScreenplayStyles, ZipExtractor,
    build_document, cli::OutputFormat, looks_like_screenplay, open_source,
};

/// Application entry point.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let source = open_source(&cli.file)?;
    let data = source.read_all().await?;
    info!(source = %source.describe(), bytes = data.len(), "read input");

    // Import is CPU-bound; keep it off the async workers
    tokio::task::spawn_blocking(move || run(&cli, &data)).await?
}

/// Install the stderr log subscriber; RUST_LOG overrides the CLI verbosity.
fn init_tracing(cli: &Cli) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter()));

    if cli.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(cli: &Cli, data: &[u8]) -> Result<()> {
    let format = InputFormat::detect(data);

    if cli.list {
        if format != InputFormat::FadeIn {
            bail!("{} is not a ZIP archive", cli.file);
        }
        return list_entries(data);
    }

    if cli.probe {
        let text = match format {
            InputFormat::PlainText => decode_text(data),
            InputFormat::FadeIn => bail!("--probe expects a plain-text file"),
        };
        println!("{}", looks_like_screenplay(&text));
        return Ok(());
    }

    let pipeline = ImportPipeline::new(ImportOptions {
        entry_override: cli.entry.clone(),
        ..Default::default()
    });
    let elements = pipeline.import(data)?;

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&elements)?);
        }
        OutputFormat::Text => {
            let document = build_document(elements, &ScreenplayStyles, &cli.template);
            print!("{}", render_plain(&document, cli.width));
        }
    }

    Ok(())
}

/// Print one line per archive entry: method, sizes, name.
fn list_entries(data: &[u8]) -> Result<()> {
    let entries = ZipExtractor::new(data).list_entries()?;

    println!("{:>6}  {:>10}  {:>10}  Name", "Method", "Length", "Size");
    println!("{}", "-".repeat(50));
    for entry in &entries {
        println!(
            "{:>6}  {:>10}  {:>10}  {}",
            entry.compression_method.as_u16(),
            entry.uncompressed_size,
            entry.compressed_size,
            entry.name
        );
    }
    println!("{}", "-".repeat(50));
    println!("{} entries", entries.len());

    Ok(())
}
