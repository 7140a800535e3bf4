// this_file: src/main.rs

//! textrail CLI: lays text along curved guide paths.
//!
//! Reads JSON job specifications, formats each job's text along its
//! guide, and outputs JSONL results to stdout.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use textrail::{process_job, JobSpec};

/// textrail: text-along-path layout engine
#[derive(Parser)]
#[command(name = "textrail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a job specification and emit JSONL results
    Render {
        /// Input file path (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<Utf8PathBuf>,

        /// Jitter seed applied to every job, overriding per-job seeds
        #[arg(long)]
        seed: Option<u64>,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate a JSON job specification from a file (or stdin if omitted)
    Validate {
        /// Input file path (reads stdin if not provided)
        #[arg(short, long)]
        input: Option<Utf8PathBuf>,
    },

    /// Print version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            seed,
            verbose,
        } => {
            init_logging(verbose);
            run_render(input, seed)?;
        }
        Commands::Validate { input } => {
            init_logging(false);
            run_validate(input)?;
        }
        Commands::Version => {
            println!("textrail {}", env!("CARGO_PKG_VERSION"));
            println!("Text-along-path layout engine");
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_millis()
        .init();
}

/// Read the spec from file or stdin.
fn read_spec(input: Option<Utf8PathBuf>) -> anyhow::Result<JobSpec> {
    let json = if let Some(path) = input {
        std::fs::read_to_string(path.as_std_path())?
    } else {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    };
    let spec: JobSpec = serde_json::from_str(&json)?;
    Ok(spec)
}

/// Process every job in order, one JSONL result line per job. Jitter
/// state belongs to a single job, so jobs run sequentially.
fn run_render(input: Option<Utf8PathBuf>, seed: Option<u64>) -> anyhow::Result<()> {
    let spec = read_spec(input)?;
    spec.validate()?;
    log::info!("Loaded {} job(s)", spec.jobs.len());

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for job in &spec.jobs {
        let result = process_job(job, seed);
        let json = serde_json::to_string(&result)?;
        writeln!(handle, "{}", json)?;
        handle.flush()?;
        log::debug!("Processed job '{}' ({})", job.id, result.status);
    }

    log::info!("Render complete ({} jobs)", spec.jobs.len());
    Ok(())
}

/// Validate a JSON spec from file or stdin and print summary.
fn run_validate(input: Option<Utf8PathBuf>) -> anyhow::Result<()> {
    let spec = read_spec(input)?;
    spec.validate()?;
    println!("✓ Valid job specification");
    println!("  Version: {}", spec.version);
    println!("  Jobs: {}", spec.jobs.len());
    Ok(())
}
