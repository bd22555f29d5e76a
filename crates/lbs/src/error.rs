use luars::{LuaError, LuaResult, LuaVM};

use crate::code_cache::SnippetHandle;

pub type BenchResult<T> = Result<T, BenchError>;

/// Errors that mean a fixture is broken and the measurement is meaningless.
///
/// A wrong accumulated value is not one of these: it is recorded on the
/// [`Run`](crate::Run) as a [`Mismatch`](crate::Mismatch) instead.
#[derive(Debug, thiserror::Error)]
pub enum BenchError {
    #[error("snippet failed to compile: {message}")]
    Compile { message: String },
    #[error("lua error: {message}")]
    Runtime { message: String },
    #[error("no snippet loaded under handle {0}")]
    UnknownSnippet(SnippetHandle),
    #[error("fixture error: {0}")]
    Fixture(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BenchError {
    /// Classify an interpreter error, keeping the message the VM recorded.
    pub fn lua(vm: &mut LuaVM, err: LuaError) -> Self {
        let full = vm.into_full_error(err);
        let message = full.message().to_string();
        match full.kind() {
            LuaError::CompileError => BenchError::Compile { message },
            _ => BenchError::Runtime { message },
        }
    }
}

pub(crate) trait LuaResultExt<T> {
    fn bench_err(self, vm: &mut LuaVM) -> BenchResult<T>;
}

impl<T> LuaResultExt<T> for LuaResult<T> {
    fn bench_err(self, vm: &mut LuaVM) -> BenchResult<T> {
        self.map_err(|e| BenchError::lua(vm, e))
    }
}

/// Report a fatal fixture error and terminate the process.
pub fn die(err: BenchError) -> ! {
    tracing::error!(error = %err, "benchmark fixture is broken");
    std::process::exit(2);
}
