//! fibx CLI
//!
//! Computes Fibonacci values through the fibext extension and times the
//! extension entry point against direct recursion.

use clap::{CommandFactory, Parser as ClapParser, Subcommand};
use clap_complete::{Shell, generate};
use fibx::{Algorithm, BenchConfig, compute, resolve_config_path, run_all};
use std::io;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "fibx")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute and time naive recursive Fibonacci", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the n-th Fibonacci number
    Compute {
        /// Fibonacci index (values <= 1 are returned unchanged)
        #[arg(allow_hyphen_values = true)]
        n: i32,

        #[arg(short, long, value_enum, default_value_t = Algorithm::Naive)]
        algorithm: Algorithm,
    },

    /// Time the extension entry point against direct recursion
    Bench {
        /// Index for the built-in comparison (ignored with a config)
        #[arg(default_value_t = 30)]
        n: i32,

        /// Bench config (TOML); falls back to $FIBX_BENCH_CONFIG
        #[arg(long, value_name = "PATH")]
        config: Option<PathBuf>,

        /// Repetitions per case for the built-in comparison
        #[arg(short, long, default_value_t = 1)]
        iterations: u32,

        /// Emit one JSON report instead of BENCH lines
        #[arg(long)]
        json: bool,
    },

    /// Show where i32 results stop being exact
    Boundary,

    /// Generate shell completion scripts
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("fibx=warn,fibext=warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compute { n, algorithm } => run_compute(n, algorithm),
        Commands::Bench {
            n,
            config,
            iterations,
            json,
        } => run_bench(n, config, iterations, json),
        Commands::Boundary => run_boundary(),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "fibx", &mut io::stdout());
        }
    }
}

fn run_compute(n: i32, algorithm: Algorithm) {
    let start = Instant::now();
    match compute(algorithm, n) {
        Ok(value) => {
            info!(
                n,
                algorithm = algorithm.as_str(),
                elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
                "computed"
            );
            println!("{}", value);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_bench(n: i32, config_path: Option<PathBuf>, iterations: u32, json: bool) {
    if iterations == 0 {
        eprintln!("Error: --iterations must be at least 1");
        process::exit(1);
    }

    let config = match resolve_config_path(config_path) {
        Some(path) => {
            info!(path = %path.display(), "loading bench config");
            match BenchConfig::load(&path) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    process::exit(1);
                }
            }
        }
        None => BenchConfig::comparison(n, iterations),
    };

    let report = match run_all(&config) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    if json {
        match report.to_json() {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    } else {
        for line in report.to_lines() {
            println!("{}", line);
        }
    }

    if !report.passed() {
        process::exit(1);
    }
}

fn run_boundary() {
    let max = fibext_core::MAX_EXACT_INDEX;
    println!("max exact index: {}", max);
    println!("fib({}) = {}", max, fibext_core::nth_fibonacci_iterative(max));
    println!(
        "fib({}) = {} (wrapped)",
        max + 1,
        fibext_core::nth_fibonacci_iterative(max + 1)
    );
}
