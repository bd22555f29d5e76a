// Benchmark: raw embedding-API interop cost against luars
//
// One criterion benchmark per registered case. Each sample builds a fresh
// interpreter, times only the case's measured loop and verifies the total.
// Set LBS_REPETITION to change how many operations a snippet unrolls.

use std::cell::RefCell;
use std::time::Duration;

use criterion::Criterion;
use lbs::{BenchConfig, Mismatch, Registry, die};

fn main() {
    tracing_subscriber::fmt::init();

    let config = BenchConfig::from_env().unwrap_or_else(|e| die(e));
    let registry = Registry::builtin();
    let failures: RefCell<Vec<(&'static str, Mismatch)>> = RefCell::new(Vec::new());

    let mut c = Criterion::default().configure_from_args();
    {
        let mut group = c.benchmark_group("plain_api");
        for case in registry.iter() {
            group.bench_function(case.name, |b| {
                b.iter_custom(|iters| {
                    let outcome = case.execute(iters, &config).unwrap_or_else(|e| die(e));
                    failures
                        .borrow_mut()
                        .extend(outcome.mismatches.iter().map(|m| (case.name, *m)));
                    outcome.elapsed.max(Duration::from_nanos(1))
                })
            });
        }
        group.finish();
    }
    c.final_summary();

    let failures = failures.into_inner();
    if !failures.is_empty() {
        for (name, m) in &failures {
            tracing::error!(case = name, observed = m.observed, expected = m.expected, "verification failed");
        }
        eprintln!("{} verification failure(s)", failures.len());
        std::process::exit(1);
    }
}
