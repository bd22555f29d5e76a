// Lua Bindings Shootout
// Plain embedding-API micro-benchmarks against the luars runtime

#[cfg(test)]
mod test;

pub mod cases;
pub mod code_cache;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod registry;
pub mod snippets;
pub mod state;
pub mod verify;

pub use code_cache::{CodeCache, SnippetHandle, do_string, repeated_code};
pub use config::BenchConfig;
pub use error::{BenchError, BenchResult, die};
pub use registry::{Case, CaseFn, Outcome, Registry};
pub use state::create_state;
pub use verify::{Mismatch, Run};
