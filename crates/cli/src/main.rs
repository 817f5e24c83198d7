//! subaudit - find recurring subscription charges in a bank statement
//!
//! Usage:
//!   subaudit scan statement.csv        Detect subscriptions in a CSV export
//!   subaudit demo                      Show the built-in sample result
//!   subaudit catalog                   List the merchant rules in match order

mod commands;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "subaudit", version, about = "Find recurring subscription charges in a bank statement CSV")]
struct Cli {
    /// TOML file of [[rule]] entries that replaces the built-in catalog
    #[arg(long, global = true, env = "SUBAUDIT_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect subscriptions in a statement
    Scan {
        /// Statement export (.csv, with a header row)
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Also write the report to this path (.json for JSON, CSV otherwise)
        #[arg(long)]
        export: Option<PathBuf>,

        /// Field delimiter (a single character, or "tab"); sniffed from the header when omitted
        #[arg(long, value_parser = parse_delimiter)]
        delimiter: Option<u8>,
    },
    /// Show a fixed sample result without reading any file
    Demo {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// List catalog rules in match order
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" => Ok(b'\t'),
        _ => match s.as_bytes() {
            [b] if b.is_ascii() && !b.is_ascii_alphanumeric() => Ok(*b),
            _ => Err(format!("expected a single punctuation character or \"tab\", got {s:?}")),
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).compact())
        .init();

    match cli.command {
        Commands::Scan {
            file,
            format,
            export,
            delimiter,
        } => {
            commands::cmd_scan(
                cli.catalog.as_deref(),
                &file,
                format,
                export.as_deref(),
                delimiter,
            )
            .await
        }
        Commands::Demo { format } => commands::cmd_demo(format),
        Commands::Catalog => commands::cmd_catalog(cli.catalog.as_deref()),
    }
}
