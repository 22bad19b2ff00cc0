use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, LevelFilter};
use std::io::{self, Write};
use std::path::PathBuf;

use uniquery::config::Config;
use uniquery::document::export::{render, OutputFormat};
use uniquery::document::parser::InputFormat;
use uniquery::document::tree::Document;
use uniquery::file::loader::{load_file, load_from_stdin};
use uniquery::query::ResultMode;
use uniquery::runner::Runner;

/// uniquery - Query JSON and YAML documents with a compact path language
#[derive(Parser)]
#[command(name = "uniquery")]
#[command(version)]
#[command(about = "Query JSON and YAML documents with a compact path language", long_about = None)]
struct Cli {
    /// Query to evaluate (empty selects the whole document)
    #[arg(short, long, default_value = "")]
    query: String,

    /// JSON file to query
    #[arg(long, value_name = "FILE", conflicts_with_all = ["yaml", "file"])]
    json: Option<PathBuf>,

    /// YAML file to query
    #[arg(long, value_name = "FILE", conflicts_with = "file")]
    yaml: Option<PathBuf>,

    /// File to query, format taken from its extension (omit to read stdin)
    file: Option<PathBuf>,

    /// Format of standard input (default from config: json)
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Output format (default from config: json)
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Keep one result per canonical path
    #[arg(short, long)]
    unique: bool,

    /// Print the canonical path before each result
    #[arg(short, long)]
    paths: bool,

    /// Maximum recursion depth of an evaluation
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Log the parsed query
    #[arg(short, long)]
    verbose: bool,

    /// Write the effective settings to the config file and exit
    #[arg(long)]
    save_config: bool,
}

/// Initializes logging. `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn load_document(cli: &Cli, config: &Config) -> Result<Document> {
    if let Some(path) = &cli.json {
        load_file(path, Some(InputFormat::Json))
    } else if let Some(path) = &cli.yaml {
        load_file(path, Some(InputFormat::Yaml))
    } else if let Some(path) = &cli.file {
        load_file(path, cli.format)
    } else {
        load_from_stdin(config.input_format)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config; CLI flags override it
    let mut config = Config::load();
    config.verbose |= cli.verbose;
    config.unique |= cli.unique;
    config.show_paths |= cli.paths;
    if let Some(output) = cli.output {
        config.output_format = output;
    }
    if let Some(format) = cli.format {
        config.input_format = format;
    }
    if let Some(max_depth) = cli.max_depth {
        config.max_depth = max_depth;
    }

    init_logging(config.verbose);
    debug!("Effective configuration: {:?}", config);

    if cli.save_config {
        config.save().context("Failed to save config")?;
        if let Some(path) = Config::config_path() {
            info!("Saved configuration to {}", path.display());
        }
        return Ok(());
    }

    let doc = load_document(&cli, &config)?;

    let runner = Runner::new(config.runner_options());
    let mode = if config.unique {
        ResultMode::Deduplicated
    } else {
        ResultMode::Ordered
    };
    let results = runner
        .run_with_mode(&cli.query, &doc, mode)
        .with_context(|| format!("Query {:?} failed", cli.query))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, found) in results.iter().enumerate() {
        let text = render(&doc, found.node, config.output_format)?;
        if config.output_format == OutputFormat::Yaml && index > 0 {
            writeln!(out, "---")?;
        }
        if config.show_paths {
            let path = if found.path.is_empty() {
                "(root)"
            } else {
                found.path.as_str()
            };
            writeln!(out, "{}\t{}", path, text)?;
        } else {
            writeln!(out, "{}", text)?;
        }
    }
    out.flush()?;

    Ok(())
}
