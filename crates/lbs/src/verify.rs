use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::error;

use crate::config::BenchConfig;
use crate::error::BenchResult;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Mismatch {
    pub observed: f64,
    pub expected: f64,
}

/// One invocation of a case: iteration count, measured time and the
/// verification verdict.
#[derive(Debug)]
pub struct Run {
    iterations: u64,
    config: BenchConfig,
    elapsed: Duration,
    mismatches: Vec<Mismatch>,
}

impl Run {
    pub fn new(iterations: u64, config: BenchConfig) -> Self {
        Self {
            iterations,
            config,
            elapsed: Duration::ZERO,
            mismatches: Vec::new(),
        }
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// `iterations × per_op`, the total a correct loop accumulates.
    pub fn expected(&self, per_op: f64) -> f64 {
        self.iterations as f64 * per_op
    }

    /// Run `op` exactly `iterations` times and add the wall time to the run.
    ///
    /// Only the loop is timed; setup and verification stay outside.
    pub fn measure<F>(&mut self, mut op: F) -> BenchResult<()>
    where
        F: FnMut() -> BenchResult<()>,
    {
        let start = Instant::now();
        for _ in 0..self.iterations {
            op()?;
        }
        self.elapsed += start.elapsed();
        Ok(())
    }

    /// Compare exactly; a mismatch is recorded and logged, never raised.
    pub fn expect(&mut self, observed: f64, expected: f64) -> bool {
        if observed == expected {
            return true;
        }
        error!(observed, expected, "verification failed");
        self.mismatches.push(Mismatch { observed, expected });
        false
    }

    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn into_parts(self) -> (Duration, Vec<Mismatch>) {
        (self.elapsed, self.mismatches)
    }
}
