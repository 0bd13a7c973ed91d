use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod batch;
mod error;
mod io;
mod parallel;
mod permutation;

use batch::Mode;
use error::ShuffleError;
use parallel::config::DEFAULT_WORKERS;
use parallel::{ParallelConfig, RunReport};

// --- Command Line Arguments ---

#[derive(Parser)]
#[command(name = "wordshuffle")]
#[command(about = "wordshuffle - shuffle the letters of words in parallel, and undo it")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Direction of the transformation
    #[arg(value_enum)]
    mode: CliMode,
    /// Input file (encrypt: one word per line; decrypt: word and permutation lines)
    input: PathBuf,
    /// Output file, written only when the whole run succeeds
    output: PathBuf,

    /// Number of worker threads
    #[arg(long, short = 'j', default_value_t = DEFAULT_WORKERS)]
    workers: usize,
    /// Run seed for reproducible permutations
    #[arg(long)]
    seed: Option<u64>,
    /// Abandon ranges still running after this many seconds
    #[arg(long)]
    timeout: Option<u64>,
    /// Print run statistics
    #[arg(long, short)]
    verbose: bool,
    /// Log level (error, warn, info, debug, trace); overrides RUST_LOG
    #[arg(long)]
    log_level: Option<log::LevelFilter>,
}

/// CLI mode selection
#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliMode {
    /// Shuffle each word and record its permutation
    Encrypt,
    /// Restore each word from its permutation
    Decrypt,
}

impl From<CliMode> for Mode {
    fn from(cli: CliMode) -> Self {
        match cli {
            CliMode::Encrypt => Mode::Encrypt,
            CliMode::Decrypt => Mode::Decrypt,
        }
    }
}

fn init_logging(args: &Args) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "info" } else { "warn" }),
    );
    if let Some(level) = args.log_level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).init();
}

fn build_config(args: &Args) -> Result<ParallelConfig, ShuffleError> {
    if args.workers == 0 {
        return Err(ShuffleError::Configuration(
            "--workers must be at least 1".to_string(),
        ));
    }

    Ok(ParallelConfig::default()
        .with_workers(args.workers)
        .with_seed_option(args.seed)
        .with_timeout_option(args.timeout.map(Duration::from_secs)))
}

/// Load, transform and write one batch.
fn shuffle_file(
    input: &Path,
    output: &Path,
    mode: Mode,
    config: &ParallelConfig,
    verbose: bool,
) -> Result<()> {
    let mut batch = io::load(input, mode)?;
    info!("Loaded {} words from {}", batch.len(), input.display());

    let report = parallel::run(&mut batch, config)?;
    if verbose {
        print_run_statistics(&report);
    }

    report.ensure_complete()?;
    batch.ensure_well_formed()?;

    io::write(output, &batch)
        .with_context(|| format!("{} results were not saved", batch.len()))?;
    info!("Wrote {} results to {}", batch.len(), output.display());

    Ok(())
}

/// Print run statistics
fn print_run_statistics(report: &RunReport) {
    let stats = &report.statistics;
    println!("Run Statistics:");
    println!("  State: {:?}", report.state);
    println!("  Run seed: {}", report.run_seed);
    println!("  Workers: {}", stats.workers_spawned);
    println!(
        "  Slots processed: {}/{} ({:.1}%)",
        stats.slots_processed,
        stats.slots_total,
        stats.completion_rate() * 100.0
    );
    println!("  Malformed permutations: {}", stats.slots_malformed);
    println!("  Elapsed time: {:?}", stats.elapsed_time);
    for worker in &report.workers {
        println!(
            "  Worker {}: {} slots {} in {:?}",
            worker.worker_id, worker.processed, worker.range, worker.elapsed_time
        );
    }
    for failure in &report.failures {
        println!("  Failed: {}", failure);
    }
}

// --- Main Function ---
fn main() {
    let args = Args::parse();
    init_logging(&args);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let mode = Mode::from(args.mode);
    match shuffle_file(&args.input, &args.output, mode, &config, args.verbose) {
        Ok(()) => {}
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
