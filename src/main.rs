use anyhow::Context;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use clfstat::colors::{should_use_colors, ColorScheme};
use clfstat::config::{AnalyzerConfig, ColorMode, ReportFormat};
use clfstat::generate::{write_synthetic_log, GeneratorConfig};
use clfstat::report;
use clfstat::{Aggregator, AnalysisError};

#[derive(Parser)]
#[command(name = "clfstat")]
#[command(about = "Aggregate traffic statistics from Common Log Format access logs")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
struct Args {
    /// Log file to analyze (stdin when omitted or "-")
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Number of entries in ranked report sections
    #[arg(long, default_value = "5", value_name = "N")]
    top: usize,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// When to color the report
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorMode,

    /// Show processing details on stderr
    #[arg(long)]
    debug: bool,

    /// Buffer size for I/O
    #[arg(long, default_value = "65536", value_name = "BYTES")]
    buffer_size: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write a synthetic CLF access log
    Generate {
        /// Number of lines to produce
        #[arg(long, default_value = "10000", value_name = "N")]
        lines: u64,

        /// Output file (default: stdout)
        #[arg(short = 'o', long = "output")]
        output: Option<PathBuf>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("clfstat: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> anyhow::Result<i32> {
    if let Some(Command::Generate {
        lines,
        output,
        seed,
    }) = args.command
    {
        return generate(lines, output, seed);
    }

    let config = AnalyzerConfig {
        top_n: args.top,
        format: args.format,
        color: args.color,
        debug: args.debug,
        buffer_size: args.buffer_size,
    };

    // Set up input
    let input: Box<dyn BufRead> = match &args.input {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|source| AnalysisError::SourceUnavailable {
                path: path.display().to_string(),
                source,
            })?;
            Box::new(BufReader::with_capacity(config.buffer_size, file))
        }
        _ => {
            if config.debug {
                eprintln!("clfstat: reading from stdin");
            }
            Box::new(BufReader::with_capacity(config.buffer_size, io::stdin()))
        }
    };

    let mut aggregator = Aggregator::new();
    let stats = aggregator.consume(input)?;
    let snapshot = aggregator.snapshot();

    if config.debug {
        eprintln!(
            "clfstat: {} lines read, {} skipped in {}",
            stats.lines_seen,
            stats.lines_skipped,
            humantime::format_duration(stats.elapsed)
        );
    }

    if snapshot.is_empty() {
        eprintln!("clfstat: no valid log lines found");
        return Ok(2);
    }

    let mut output = io::BufWriter::new(io::stdout());
    match config.format {
        ReportFormat::Text => {
            let colors = ColorScheme::new(should_use_colors(config.color));
            report::render_text(&mut output, &snapshot, &config, &colors)?;
        }
        ReportFormat::Json => {
            report::render_json(&mut output, &snapshot)?;
        }
    }
    output.flush()?;

    Ok(0)
}

fn generate(lines: u64, output: Option<PathBuf>, seed: Option<u64>) -> anyhow::Result<i32> {
    let config = GeneratorConfig { lines, seed };

    match output {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("failed to create output file '{}'", path.display()))?;
            let mut out = io::BufWriter::new(file);
            write_synthetic_log(&mut out, &config)?;
            out.flush()?;
        }
        None => {
            let mut out = io::BufWriter::new(io::stdout());
            write_synthetic_log(&mut out, &config)?;
            out.flush()?;
        }
    }

    Ok(0)
}
