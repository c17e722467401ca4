//! Stacksheet - resolve a grid of numbers, references and postfix expressions

mod config;

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use stacksheet_core::{Document, StacksheetError};
use stacksheet_engine::engine::format_number;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use config::{Config, MAX_PRECISION, load_config};

#[derive(Debug, Parser)]
#[command(name = "stacksheet", version, about)]
struct Cli {
    /// Grid file to resolve; reads stdin when absent or `-`
    file: Option<PathBuf>,

    /// Evaluate a single cell text against an empty grid and print its value
    #[arg(short = 'c', long = "command", value_name = "EXPR")]
    command: Option<String>,

    /// Decimal places in output (overrides the config file)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=MAX_PRECISION as i64))]
    precision: Option<u8>,

    /// Config file (default: <config dir>/stacksheet/config.toml)
    #[arg(long, value_name = "PATH", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore any config file
    #[arg(long)]
    no_config: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env("STACKSHEET_LOG").unwrap_or_else(|_| {
        EnvFilter::new(match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

fn run(cli: &Cli, precision: usize) -> Result<(), StacksheetError> {
    if let Some(expr) = &cli.command {
        let value = Document::new().evaluate(expr)?;
        println!("{}", format_number(value, precision));
        return Ok(());
    }

    let mut doc = match cli.file.as_deref() {
        Some(path) if path.as_os_str() != "-" => Document::open(path)?,
        _ => Document::read_from(io::stdin().lock())?,
    };
    doc.resolve_all()?;
    doc.write_to(&mut io::stdout().lock(), precision)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    let config = if cli.no_config {
        Config::default()
    } else {
        let (config, warnings) = load_config(cli.config.as_deref());
        for warning in warnings {
            warn!("{}", warning);
        }
        config
    };
    let precision = cli.precision.map(usize::from).unwrap_or(config.precision);

    match run(&cli, precision) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = %e, "session failed");
            println!("{}", e.sheet_error());
            ExitCode::FAILURE
        }
    }
}
