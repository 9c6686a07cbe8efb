use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use sieve::core::config::{self, CliOverrides, SieveConfig};
use sieve::core::validator::{tokenize, validate};

#[derive(Parser)]
#[command(name = "sieve", about = "Build boolean filter expressions from draggable chips")]
struct Args {
    /// Config file to use instead of ~/.sieve/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate EXPR, print the verdict and exit
    #[arg(long, value_name = "EXPR")]
    check: Option<String>,

    /// Log level written to sieve.log
    #[arg(long, default_value = "debug")]
    log_level: LevelFilter,

    /// Pointer travel before the insertion point starts moving
    #[arg(long)]
    drag_threshold: Option<f64>,

    /// Vertical slack around a row of chips
    #[arg(long)]
    row_tolerance: Option<f64>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(expr) = &args.check {
        let verdict = validate(&tokenize(expr));
        if verdict.is_valid() {
            println!("valid");
            return ExitCode::SUCCESS;
        }
        println!("{}", verdict.message());
        return ExitCode::FAILURE;
    }

    // Initialize file logger - writes to sieve.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("sieve.log") {
        let _ = WriteLogger::init(args.log_level, log_config, log_file);
    }

    let file_config = match config::load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            warn!("{}, using defaults", e);
            eprintln!("sieve: {}, using defaults", e);
            SieveConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            distance_threshold: args.drag_threshold,
            row_tolerance: args.row_tolerance,
        },
    );

    info!(
        "Sieve starting up with {} identifiers (threshold {}, tolerance {})",
        resolved.identifiers.len(),
        resolved.drag.distance_threshold,
        resolved.drag.row_tolerance
    );

    match sieve::tui::run(resolved) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("sieve: terminal error: {}", e);
            ExitCode::FAILURE
        }
    }
}
