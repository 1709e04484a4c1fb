//! Bench configuration
//!
//! ```toml
//! [[case]]
//! name = "fib-naive-30"
//! n = 30
//! algorithm = "naive"
//! iterations = 1
//! expected = 832040
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Environment variable consulted when `--config` is not given
pub const CONFIG_ENV_VAR: &str = "FIBX_BENCH_CONFIG";

/// How a case computes its value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Plain double recursion, called directly
    #[default]
    Naive,
    /// Linear-time reference
    Iterative,
    /// Through the extension's host entry point (argument conversion included)
    Extension,
}

impl Algorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Naive => "naive",
            Algorithm::Iterative => "iterative",
            Algorithm::Extension => "extension",
        }
    }
}

fn default_iterations() -> u32 {
    1
}

/// One timed computation
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchCase {
    pub name: String,
    /// Fibonacci index
    pub n: i32,
    #[serde(default)]
    pub algorithm: Algorithm,
    /// Times to repeat the computation inside one measurement
    #[serde(default = "default_iterations")]
    pub iterations: u32,
    /// Value the case must produce; mismatches fail the run
    pub expected: Option<i64>,
}

impl BenchCase {
    pub fn new(name: impl Into<String>, n: i32, algorithm: Algorithm) -> Self {
        BenchCase {
            name: name.into(),
            n,
            algorithm,
            iterations: 1,
            expected: None,
        }
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_expected(mut self, expected: i64) -> Self {
        self.expected = Some(expected);
        self
    }
}

/// A set of bench cases
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BenchConfig {
    #[serde(rename = "case", default)]
    pub cases: Vec<BenchCase>,
}

impl BenchConfig {
    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self, String> {
        let config: Self =
            toml::from_str(content).map_err(|e| format!("Failed to parse bench config: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
        Self::from_toml(&content)
    }

    /// The side-by-side run: extension entry point vs. direct recursion
    ///
    /// Both cases expect the reference value, wrapped if `n` is past the
    /// `i32` boundary.
    pub fn comparison(n: i32, iterations: u32) -> Self {
        let expected = i64::from(fibext_core::nth_fibonacci_iterative(n));
        BenchConfig {
            cases: vec![
                BenchCase::new(format!("extension-{}", n), n, Algorithm::Extension)
                    .with_iterations(iterations)
                    .with_expected(expected),
                BenchCase::new(format!("naive-{}", n), n, Algorithm::Naive)
                    .with_iterations(iterations)
                    .with_expected(expected),
            ],
        }
    }

    fn validate(&self) -> Result<(), String> {
        if self.cases.is_empty() {
            return Err("Bench config must define at least one [[case]]".to_string());
        }
        let mut seen = HashSet::new();
        for (idx, case) in self.cases.iter().enumerate() {
            if case.name.trim().is_empty() {
                return Err(format!("Bench case {} has empty name", idx + 1));
            }
            if !seen.insert(case.name.as_str()) {
                return Err(format!("Duplicate bench case name '{}'", case.name));
            }
            if case.iterations == 0 {
                return Err(format!(
                    "Bench case '{}' must run at least one iteration",
                    case.name
                ));
            }
        }
        Ok(())
    }
}

/// `--config` if given, else `$FIBX_BENCH_CONFIG` if set and non-empty
pub fn resolve_config_path(cli: Option<PathBuf>) -> Option<PathBuf> {
    cli.or_else(|| {
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_case() {
        let config = BenchConfig::from_toml(
            r#"
            [[case]]
            name = "fib-naive-30"
            n = 30
            algorithm = "naive"
            iterations = 3
            expected = 832040
            "#,
        )
        .unwrap();
        assert_eq!(
            config.cases,
            vec![
                BenchCase::new("fib-naive-30", 30, Algorithm::Naive)
                    .with_iterations(3)
                    .with_expected(832_040)
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let config = BenchConfig::from_toml("[[case]]\nname = \"a\"\nn = 5\n").unwrap();
        let case = &config.cases[0];
        assert_eq!(case.algorithm, Algorithm::Naive);
        assert_eq!(case.iterations, 1);
        assert_eq!(case.expected, None);
    }

    #[test]
    fn test_rejects_empty_config() {
        let err = BenchConfig::from_toml("").unwrap_err();
        assert!(err.contains("at least one"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = BenchConfig::from_toml(
            "[[case]]\nname = \"a\"\nn = 1\n[[case]]\nname = \"a\"\nn = 2\n",
        )
        .unwrap_err();
        assert!(err.contains("Duplicate"));
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let err =
            BenchConfig::from_toml("[[case]]\nname = \"a\"\nn = 1\niterations = 0\n").unwrap_err();
        assert!(err.contains("at least one iteration"));
    }

    #[test]
    fn test_rejects_unknown_algorithm() {
        let err = BenchConfig::from_toml("[[case]]\nname = \"a\"\nn = 1\nalgorithm = \"matrix\"\n")
            .unwrap_err();
        assert!(err.starts_with("Failed to parse bench config"));
    }

    #[test]
    fn test_comparison_cases() {
        let config = BenchConfig::comparison(20, 2);
        assert_eq!(config.cases.len(), 2);
        assert_eq!(config.cases[0].name, "extension-20");
        assert_eq!(config.cases[0].algorithm, Algorithm::Extension);
        assert_eq!(config.cases[1].name, "naive-20");
        assert!(config.cases.iter().all(|c| c.expected == Some(6765)));
        assert!(config.cases.iter().all(|c| c.iterations == 2));
    }

    #[test]
    fn test_comparison_past_boundary_expects_wrapped_value() {
        let config = BenchConfig::comparison(47, 1);
        assert_eq!(config.cases[0].expected, Some(-1_323_752_223));
    }
}
