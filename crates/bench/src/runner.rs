//! Timed execution of bench cases
//!
//! Output format: `BENCH:fibonacci:<name>:<result>:<time_ms>`

use crate::config::{Algorithm, BenchCase, BenchConfig};
use fibext::{Fibonacci, HostValue};
use serde::Serialize;
use std::hint::black_box;
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of one case
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BenchResult {
    pub name: String,
    pub algorithm: Algorithm,
    pub n: i32,
    pub iterations: u32,
    pub result: i32,
    pub elapsed_ms: u64,
    pub expected: Option<i64>,
}

impl BenchResult {
    /// True when there is no expectation or the result meets it
    pub fn matches_expected(&self) -> bool {
        self.expected
            .is_none_or(|expected| expected == i64::from(self.result))
    }

    pub fn bench_line(&self) -> String {
        format!(
            "BENCH:fibonacci:{}:{}:{}",
            self.name, self.result, self.elapsed_ms
        )
    }

    /// `ERROR: expected <e>, got <r>` for a failed expectation
    pub fn mismatch_line(&self) -> Option<String> {
        match self.expected {
            Some(expected) if !self.matches_expected() => Some(format!(
                "ERROR: expected {}, got {}",
                expected, self.result
            )),
            _ => None,
        }
    }
}

/// Results of a whole config
#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub cases: Vec<BenchResult>,
    pub failures: usize,
}

impl BenchReport {
    pub fn passed(&self) -> bool {
        self.failures == 0
    }

    /// One BENCH line per case, each followed by its mismatch line if any
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.cases.len());
        for result in &self.cases {
            lines.push(result.bench_line());
            if let Some(line) = result.mismatch_line() {
                lines.push(line);
            }
        }
        lines
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to encode report: {}", e))
    }
}

/// Compute `n` once with the given algorithm
pub fn compute(algorithm: Algorithm, n: i32) -> Result<i32, String> {
    match algorithm {
        Algorithm::Naive => Ok(fibext_core::nth_fibonacci(n)),
        Algorithm::Iterative => Ok(fibext_core::nth_fibonacci_iterative(n)),
        Algorithm::Extension => match Fibonacci::call(HostValue::Integer(i64::from(n))) {
            Ok(HostValue::Integer(value)) => i32::try_from(value)
                .map_err(|_| format!("extension returned out-of-range value {}", value)),
            Ok(other) => Err(format!("extension returned non-integer {:?}", other)),
            Err(e) => Err(e.to_string()),
        },
    }
}

/// Run one case, timing all of its iterations together
pub fn run_case(case: &BenchCase) -> Result<BenchResult, String> {
    debug!(
        name = %case.name,
        n = case.n,
        algorithm = case.algorithm.as_str(),
        iterations = case.iterations,
        "running bench case"
    );
    let start = Instant::now();
    let mut result = 0;
    for _ in 0..case.iterations {
        result = compute(case.algorithm, black_box(case.n))?;
    }
    let elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(name = %case.name, result, elapsed_ms, "bench case finished");

    Ok(BenchResult {
        name: case.name.clone(),
        algorithm: case.algorithm,
        n: case.n,
        iterations: case.iterations,
        result,
        elapsed_ms,
        expected: case.expected,
    })
}

/// Run every case in order
pub fn run_all(config: &BenchConfig) -> Result<BenchReport, String> {
    let cases = config
        .cases
        .iter()
        .map(run_case)
        .collect::<Result<Vec<_>, _>>()?;
    let failures = cases.iter().filter(|r| !r.matches_expected()).count();
    Ok(BenchReport { cases, failures })
}
