//! legis CLI - Command-line interface
//!
//! Usage:
//!   legis segment <file> [--strategy legal-aware] [--chunk-size 800]
//!   legis extract <file> [--types person,statute]
//!   legis tokens <file>
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use legis_core::{ChunkMetadata, ChunkStrategy, EngineConfig, LoggingConfig};
use legis_extractor::ExtractOptions;
use legis_segmenter::{estimate_tokens, SegmentOptions};

#[derive(Parser, Debug)]
#[command(name = "legis")]
#[command(about = "Legal document segmentation and entity extraction")]
#[command(version)]
struct Cli {
    /// TOML configuration file (environment variables override it)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Split a document into chunks
    Segment {
        /// Text file to segment
        path: PathBuf,

        /// fixed, semantic, hierarchical or legal-aware
        #[arg(long)]
        strategy: Option<ChunkStrategy>,

        /// Target chunk size in chars
        #[arg(long)]
        chunk_size: Option<usize>,

        /// Overlap carried into the next chunk
        #[arg(long)]
        overlap: Option<usize>,

        /// Cut fixed windows at the raw size instead of sentence/paragraph ends
        #[arg(long)]
        no_respect_boundaries: bool,

        /// Document id copied into every chunk's metadata
        #[arg(long)]
        document_id: Option<String>,
    },
    /// Extract entities and relationships
    Extract {
        /// Text file to scan
        path: PathBuf,

        /// Entity types to scan, comma-separated (default: all)
        #[arg(long, value_delimiter = ',')]
        types: Option<Vec<String>>,
    },
    /// Estimate the token count of a document
    Tokens {
        /// Text file to measure
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(&config.logging);

    match cli.command {
        Commands::Segment {
            path,
            strategy,
            chunk_size,
            overlap,
            no_respect_boundaries,
            document_id,
        } => {
            let text = read_text(&path)?;

            let mut options = SegmentOptions::from_config(&config.segmenter);
            if let Some(strategy) = strategy {
                options = options.with_strategy(strategy);
            }
            if let Some(chunk_size) = chunk_size {
                options = options.with_chunk_size(chunk_size);
            }
            if let Some(overlap) = overlap {
                options = options.with_overlap(overlap);
            }
            if no_respect_boundaries {
                options = options.with_respect_boundaries(false);
            }
            if let Some(id) = document_id {
                options = options.with_metadata(ChunkMetadata::default().with_document_id(id));
            }
            options.validate()?;

            let chunks = legis_segmenter::segment(&text, &options);
            tracing::info!(
                path = %path.display(),
                strategy = %options.strategy,
                chunks = chunks.len(),
                "Segmented document"
            );
            println!("{}", serde_json::to_string_pretty(&chunks)?);
        }
        Commands::Extract { path, types } => {
            let text = read_text(&path)?;

            let mut options = ExtractOptions::from_config(&config.extractor);
            if let Some(names) = types {
                options = options.with_type_names(&names);
            }

            let result = legis_extractor::extract(&text, &options);
            tracing::info!(
                path = %path.display(),
                entities = result.summary.total,
                relationships = result.relationships.len(),
                "Extracted entities"
            );
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Tokens { path } => {
            let text = read_text(&path)?;
            let report = serde_json::json!({
                "bytes": text.len(),
                "characters": text.chars().count(),
                "estimated_tokens": estimate_tokens(&text),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?
            .with_env_override(),
        None => EngineConfig::from_env(),
    };
    config.context("invalid configuration in environment")
}

fn init_tracing(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    if config.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_segment_args() {
        let cli = Cli::try_parse_from([
            "legis",
            "segment",
            "brief.txt",
            "--strategy",
            "legal-aware",
            "--chunk-size",
            "500",
            "--no-respect-boundaries",
        ])
        .unwrap();

        match cli.command {
            Commands::Segment {
                strategy,
                chunk_size,
                no_respect_boundaries,
                ..
            } => {
                assert_eq!(strategy, Some(ChunkStrategy::LegalAware));
                assert_eq!(chunk_size, Some(500));
                assert!(no_respect_boundaries);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let parsed = Cli::try_parse_from(["legis", "segment", "a.txt", "--strategy", "bogus"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_parse_extract_types() {
        let cli = Cli::try_parse_from([
            "legis",
            "--config",
            "legis.toml",
            "extract",
            "a.txt",
            "--types",
            "person,statute",
        ])
        .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("legis.toml")));
        match cli.command {
            Commands::Extract { types, .. } => {
                assert_eq!(types, Some(vec!["person".to_string(), "statute".to_string()]));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
