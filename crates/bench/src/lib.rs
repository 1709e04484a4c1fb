//! fibx: drive and time the fibext extension
//!
//! - `config`: bench cases loaded from TOML
//! - `runner`: executes cases and formats results

pub mod config;
pub mod runner;

pub use config::{Algorithm, BenchCase, BenchConfig, CONFIG_ENV_VAR, resolve_config_path};
pub use runner::{BenchReport, BenchResult, compute, run_all, run_case};
