use std::time::Duration;

use ahash::AHashMap;
use serde::Serialize;
use tracing::debug;

use crate::cases;
use crate::config::BenchConfig;
use crate::error::BenchResult;
use crate::verify::{Mismatch, Run};

pub type CaseFn = fn(&mut Run) -> BenchResult<()>;

#[derive(Debug, Clone, Copy)]
pub struct Case {
    pub name: &'static str,
    pub func: CaseFn,
}

impl Case {
    pub const fn new(name: &'static str, func: CaseFn) -> Self {
        Self { name, func }
    }

    /// Run the case once with `iterations` measured operations.
    pub fn execute(&self, iterations: u64, config: &BenchConfig) -> BenchResult<Outcome> {
        let mut run = Run::new(iterations, config.clone());
        (self.func)(&mut run)?;
        let (elapsed, mismatches) = run.into_parts();
        let outcome = Outcome {
            name: self.name,
            iterations,
            elapsed,
            mismatches,
        };
        debug!(
            case = self.name,
            iterations,
            ns_per_iter = outcome.ns_per_iter(),
            passed = outcome.passed(),
            "case finished"
        );
        Ok(outcome)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub name: &'static str,
    pub iterations: u64,
    pub elapsed: Duration,
    pub mismatches: Vec<Mismatch>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn ns_per_iter(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.iterations as f64
    }
}

const BUILTIN: &[Case] = &[
    Case::new("global_string_get", cases::global_string_get),
    Case::new("global_string_set", cases::global_string_set),
    Case::new("table_get", cases::table_get),
    Case::new("table_set", cases::table_set),
    Case::new("table_chained_get", cases::table_chained_get),
    Case::new("table_chained_set", cases::table_chained_set),
    Case::new("c_function", cases::c_function),
    Case::new("c_through_lua_function", cases::c_through_lua_function),
    Case::new("lua_function", cases::lua_function),
    Case::new("member_function_call", cases::member_function_call),
    Case::new("userdata_variable_access", cases::userdata_variable_access),
    Case::new(
        "userdata_variable_access_large",
        cases::userdata_variable_access_large,
    ),
    Case::new(
        "userdata_variable_access_last",
        cases::userdata_variable_access_last,
    ),
    Case::new("multi_return", cases::multi_return),
    Case::new("multi_return_lua", cases::multi_return_lua),
    Case::new("stateful_function_object", cases::stateful_function_object),
    Case::new("base_derived", cases::base_derived),
    Case::new("return_userdata", cases::return_userdata),
    Case::new("optional", cases::optional),
    Case::new("implicit_inheritance", cases::implicit_inheritance),
];

/// Name → case mapping, fixed after construction.
pub struct Registry {
    cases: Vec<Case>,
    by_name: AHashMap<&'static str, usize>,
}

impl Registry {
    pub fn builtin() -> Self {
        let cases = BUILTIN.to_vec();
        let by_name = cases
            .iter()
            .enumerate()
            .map(|(i, case)| (case.name, i))
            .collect();
        Self { cases, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&Case> {
        self.by_name.get(name).map(|&i| &self.cases[i])
    }

    /// Cases in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Case> {
        self.cases.iter()
    }

    /// Cases whose name contains `filter`; `None` matches everything.
    pub fn matching<'a>(&'a self, filter: Option<&'a str>) -> impl Iterator<Item = &'a Case> + 'a {
        self.cases
            .iter()
            .filter(move |case| filter.is_none_or(|f| case.name.contains(f)))
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}
