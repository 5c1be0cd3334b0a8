//! wash-sale - Apply wash-sale adjustments to a CSV of stock lots.
//!
//! Reads a ledger CSV, washes every loss against its replacement lots, and
//! prints the result or writes it to a new CSV.
//!
//! # Usage
//!
//! ```bash
//! wash-sale lots.csv
//! wash-sale lots.csv -o washed.csv
//! wash-sale lots.csv --interactive
//! wash-sale lots.csv --expect washed.csv
//! ```

use crate::cmd::completions::ShellType;
use crate::logger::TermLogger;
use crate::render::{ColorChoice, LotTable, RenderConfig};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;
use washsale_core::{wash_all_lots, Highlights, Ledger, WashSession, WashSummary};
use washsale_csv::{read_ledger_file, write_ledger_file, CsvConfig};

/// Output format for the final ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text table (default)
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Apply wash-sale adjustments to a CSV of stock lots.
#[derive(Parser, Debug)]
#[command(name = "wash-sale")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The lots CSV file to process
    #[arg(value_name = "FILE", required_unless_present = "generate_completions")]
    pub file: Option<PathBuf>,

    /// Generate shell completions and exit
    #[arg(long, value_name = "SHELL", hide = true)]
    pub generate_completions: Option<ShellType>,

    /// Write the washed lots to this CSV file instead of printing them
    #[arg(short = 'o', long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Compare the result with an expected lots CSV (exit 1 if they differ)
    #[arg(long, value_name = "EXPECTED")]
    pub expect: Option<PathBuf>,

    /// Show every step and wait for Enter before continuing
    #[arg(short = 'i', long)]
    pub interactive: bool,

    /// When to color highlighted lots
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Write the legacy header spelling (Cnt,Sym,Desc,...)
    #[arg(long)]
    pub legacy_headers: bool,

    /// Output format for the final lots
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Suppress the start and final tables
    #[arg(short, long)]
    pub quiet: bool,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: WashSummary,
    lots: &'a Ledger,
}

fn run(args: &Args) -> Result<ExitCode> {
    let Some(file) = &args.file else {
        anyhow::bail!("no input file given");
    };
    if !file.exists() {
        anyhow::bail!("file not found: {}", file.display());
    }

    let csv_config = CsvConfig::builder()
        .legacy_headers(args.legacy_headers)
        .build();
    let render = RenderConfig::from_choice(args.color);
    let table_output = args.format == OutputFormat::Table;
    let mut stdout = io::stdout();

    let mut ledger = read_ledger_file(file, &csv_config)
        .with_context(|| format!("failed to read {}", file.display()))?;

    if table_output && !args.quiet {
        print_table(&mut stdout, "Start lots:", &ledger, render)?;
    }

    let summary = if args.interactive {
        let mut logger = TermLogger::stdio(render);
        WashSession::new(&mut logger).run(&mut ledger)
    } else {
        wash_all_lots(&mut ledger)
    }
    .context("wash computation failed")?;
    tracing::info!(
        washes = summary.washes,
        splits = summary.splits,
        unmatched = summary.unmatched_losses,
        lots = ledger.len(),
        "washed lots"
    );

    if let Some(output) = &args.output {
        write_ledger_file(&ledger, output, &csv_config)
            .with_context(|| format!("failed to write {}", output.display()))?;
    } else if table_output {
        if !args.quiet {
            print_table(&mut stdout, "Final lots:", &ledger, render)?;
        }
    } else {
        let output = JsonOutput {
            summary,
            lots: &ledger,
        };
        writeln!(stdout, "{}", serde_json::to_string_pretty(&output)?)?;
    }

    match &args.expect {
        Some(expected) => check_expected(&ledger, expected, args.quiet),
        None => Ok(ExitCode::SUCCESS),
    }
}

fn print_table<W: Write>(
    writer: &mut W,
    title: &str,
    ledger: &Ledger,
    render: RenderConfig,
) -> Result<()> {
    writeln!(writer, "{title}")?;
    write!(writer, "{}", LotTable::new(ledger, &Highlights::none(), render))?;
    Ok(())
}

fn check_expected(ledger: &Ledger, expected: &Path, quiet: bool) -> Result<ExitCode> {
    let expected_ledger = read_ledger_file(expected, &CsvConfig::default())
        .with_context(|| format!("failed to read {}", expected.display()))?;

    if *ledger == expected_ledger {
        if !quiet {
            eprintln!("Result matches {}", expected.display());
        }
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Result differs from {}", expected.display());
        Ok(ExitCode::from(1))
    }
}

fn init_tracing(verbose: bool) {
    if verbose {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .with_span_events(FmtSpan::CLOSE)
            .with_writer(io::stderr)
            .init();
    } else if let Ok(filter) = EnvFilter::try_from_default_env() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

/// Main entry point for the wash-sale command.
pub fn main() -> ExitCode {
    main_with_name("wash-sale")
}

/// Main entry point with custom binary name.
pub fn main_with_name(bin_name: &str) -> ExitCode {
    let args = Args::parse();

    // Handle shell completion generation
    if let Some(shell) = args.generate_completions {
        crate::cmd::completions::generate_completions::<Args>(shell, bin_name);
        return ExitCode::SUCCESS;
    }

    init_tracing(args.verbose);

    match run(&args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
