use clap::Parser;
use serde::Serialize;
use tracing::Level;

use lbs::{BenchConfig, BenchError, Outcome, Registry};

/// Run the interop micro-benchmarks once each and verify their results.
#[derive(Debug, Parser)]
#[command(name = "lbs")]
struct CmdOpts {
    /// Measured operations per case
    #[arg(long, short = 'n', default_value_t = BenchConfig::default().iterations)]
    iterations: u64,

    /// Operations unrolled into one snippet body
    #[arg(long, short = 'r', default_value_t = BenchConfig::default().repetition)]
    repetition: usize,

    /// Only run cases whose name contains this text
    #[arg(long, short)]
    filter: Option<String>,

    /// Print case names and exit
    #[arg(long)]
    list: bool,

    /// Print one JSON object per case instead of a table
    #[arg(long)]
    json: bool,

    /// Log fixture setup and snippet loading
    #[arg(long, short)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let opts = CmdOpts::parse();
    init_logging(opts.verbose);

    let registry = Registry::builtin();
    let cases: Vec<_> = registry.matching(opts.filter.as_deref()).collect();
    if cases.is_empty() {
        eprintln!("no case matches {:?}", opts.filter.as_deref().unwrap_or(""));
        std::process::exit(2);
    }

    if opts.list {
        for case in cases {
            println!("{}", case.name);
        }
        return;
    }

    let config = BenchConfig {
        iterations: opts.iterations,
        repetition: opts.repetition,
    };
    match run(&cases, &config, opts.json) {
        Ok(0) => {}
        Ok(failed) => {
            eprintln!("{failed} case(s) failed verification");
            std::process::exit(1);
        }
        Err(e) => lbs::die(e),
    }
}

/// Run each case once; returns how many failed verification.
fn run(cases: &[&lbs::Case], config: &BenchConfig, json: bool) -> Result<usize, BenchError> {
    config.validate()?;
    let mut failed = 0;
    for case in cases {
        let outcome = case.execute(config.iterations, config)?;
        if json {
            print_json(&outcome);
        } else {
            print_line(&outcome);
        }
        if !outcome.passed() {
            failed += 1;
        }
    }
    Ok(failed)
}

fn print_line(outcome: &Outcome) {
    let verdict = if outcome.passed() { "ok" } else { "FAILED" };
    println!(
        "{:<32} {:>12.1} ns/iter  {}",
        outcome.name,
        outcome.ns_per_iter(),
        verdict
    );
    for m in &outcome.mismatches {
        println!("    expected {} got {}", m.expected, m.observed);
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    #[serde(flatten)]
    outcome: &'a Outcome,
    ns_per_iter: f64,
    passed: bool,
}

fn print_json(outcome: &Outcome) {
    let line = JsonLine {
        outcome,
        ns_per_iter: outcome.ns_per_iter(),
        passed: outcome.passed(),
    };
    match serde_json::to_string(&line) {
        Ok(text) => println!("{text}"),
        Err(e) => tracing::error!(case = outcome.name, error = %e, "cannot encode outcome"),
    }
}
