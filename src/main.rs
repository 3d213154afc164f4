use std::fmt::Write as _;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use blocktext::{Config, OutputFormat, ParsedContent};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blocktext")]
#[command(about = "Flatten exported content blocks into text and image paths")]
struct Cli {
    /// File holding the raw stored content (reads stdin when omitted)
    input: Option<PathBuf>,

    /// Config file
    #[arg(short, long, default_value = "blocktext.toml")]
    config: PathBuf,

    /// What to print
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Strip markdown markers from the text
    #[arg(long)]
    plain: bool,

    /// Warn about image paths missing on disk
    #[arg(long)]
    check_images: bool,

    /// Print block counts per kind after the output
    #[arg(long)]
    stats: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    Images,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Images => OutputFormat::Images,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = effective_config(&cli)?;
    let raw = read_input(&cli)?;
    print!("{}", render(&cli, &config, &raw)?);

    Ok(())
}

/// Load the config file and lay the command-line flags over it.
fn effective_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load(&cli.config)?;
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    config.output.plain |= cli.plain;
    config.images.check_exists |= cli.check_images;
    Ok(config)
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    match &cli.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

/// Everything the command prints for one input.
fn render(cli: &Cli, config: &Config, raw: &str) -> anyhow::Result<String> {
    let content = blocktext::parse(Some(raw));
    let mut parsed = blocktext::content_to_parsed(&content);
    if config.output.plain {
        parsed.text = blocktext::to_plain_text(&parsed.text);
    }

    if config.images.check_exists {
        for missing in missing_images(&parsed, config) {
            tracing::warn!(path = %missing.display(), "image not found on disk");
        }
    }

    let mut out = String::new();
    match config.output.format {
        OutputFormat::Text => {
            out.push_str(&parsed.text);
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
        }
        OutputFormat::Images => {
            for path in &parsed.image_paths {
                writeln!(out, "{path}")?;
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&parsed).context("serializing output")?;
            writeln!(out, "{json}")?;
        }
    }

    if cli.stats {
        for (kind, count) in content.kind_counts() {
            writeln!(out, "{kind}\t{count}")?;
        }
    }

    Ok(out)
}

/// Image paths, resolved against the config, that do not exist on disk.
fn missing_images(parsed: &ParsedContent, config: &Config) -> Vec<PathBuf> {
    parsed
        .image_paths
        .iter()
        .map(|image_path| config.images.resolve(image_path))
        .filter(|resolved| !resolved.exists())
        .collect()
}
