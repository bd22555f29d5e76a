use crate::error::{BenchError, BenchResult};

/// Settings shared by every case of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// How many times a single operation is unrolled into one snippet body.
    pub repetition: usize,
    /// Iterations per case when the runner drives the loop itself.
    /// Criterion picks its own counts and ignores this.
    pub iterations: u64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            repetition: 50,
            iterations: 10_000,
        }
    }
}

impl BenchConfig {
    pub const REPETITION_VAR: &'static str = "LBS_REPETITION";
    pub const ITERATIONS_VAR: &'static str = "LBS_ITERATIONS";

    /// Defaults overridden by `LBS_REPETITION` / `LBS_ITERATIONS`.
    pub fn from_env() -> BenchResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> BenchResult<Self> {
        let mut config = Self::default();
        if let Some(raw) = lookup(Self::REPETITION_VAR) {
            config.repetition = parse_var(Self::REPETITION_VAR, &raw)?;
        }
        if let Some(raw) = lookup(Self::ITERATIONS_VAR) {
            config.iterations = parse_var(Self::ITERATIONS_VAR, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> BenchResult<()> {
        if self.repetition == 0 {
            return Err(BenchError::Config("repetition must be at least 1".into()));
        }
        if self.iterations == 0 {
            return Err(BenchError::Config("iterations must be at least 1".into()));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, raw: &str) -> BenchResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| BenchError::Config(format!("{key}={raw:?} is not a positive integer")))
}
