// Interpreter construction and small value helpers shared by fixtures and cases

use luars::{LuaVM, LuaValue, SafeOption, Stdlib};
use tracing::debug;

use crate::error::{BenchError, BenchResult, LuaResultExt};

/// Create a fresh interpreter for one case.
///
/// With `load_standard_library` the full stdlib is opened so check snippets
/// can use `assert`. Without it the state only has `_G`, which keeps setup
/// noise out of cases that never run Lua source.
pub fn create_state(load_standard_library: bool) -> BenchResult<Box<LuaVM>> {
    let mut vm = LuaVM::new(SafeOption::default());
    if load_standard_library {
        vm.open_stdlib(Stdlib::All).bench_err(&mut vm)?;
    }
    debug!(load_standard_library, "created interpreter state");
    Ok(vm)
}

/// Numeric view of a value; integers are widened.
pub fn to_number(value: &LuaValue) -> Option<f64> {
    value
        .as_number()
        .or_else(|| value.as_integer().map(|i| i as f64))
}

pub fn number(value: f64) -> LuaValue {
    LuaValue::float(value)
}

/// Fetch a global that may be unset; nil reads as `None`.
pub fn optional_global(vm: &mut LuaVM, name: &str) -> BenchResult<Option<LuaValue>> {
    let value = vm.get_global(name).bench_err(vm)?;
    Ok(value.filter(|v| !v.is_nil()))
}

/// Fetch a global that must exist.
pub fn global_value(vm: &mut LuaVM, name: &str) -> BenchResult<LuaValue> {
    optional_global(vm, name)?
        .ok_or_else(|| BenchError::Fixture(format!("global '{name}' is not set")))
}

pub fn global_number(vm: &mut LuaVM, name: &str) -> BenchResult<f64> {
    let value = global_value(vm, name)?;
    to_number(&value)
        .ok_or_else(|| BenchError::Fixture(format!("global '{name}' is not a number")))
}

pub fn set_global(vm: &mut LuaVM, name: &str, value: LuaValue) -> BenchResult<()> {
    vm.set_global(name, value).bench_err(vm)
}

/// Interned key for repeated raw field access.
pub fn key(vm: &mut LuaVM, name: &str) -> BenchResult<LuaValue> {
    vm.create_string(name).bench_err(vm)
}

/// Raw field lookup on a table value; `key` is a pre-created string.
pub fn field_value(vm: &mut LuaVM, table: &LuaValue, key: &LuaValue) -> BenchResult<LuaValue> {
    match vm.raw_get(table, key) {
        Some(value) if !value.is_nil() => Ok(value),
        _ => Err(BenchError::Fixture(format!(
            "missing field {:?} on table",
            key.as_str().unwrap_or("?")
        ))),
    }
}

pub fn field_number(vm: &mut LuaVM, table: &LuaValue, key: &LuaValue) -> BenchResult<f64> {
    let value = field_value(vm, table, key)?;
    to_number(&value).ok_or_else(|| {
        BenchError::Fixture(format!(
            "field {:?} is not a number",
            key.as_str().unwrap_or("?")
        ))
    })
}

/// Raw field store; the target must be a table.
pub fn set_field(
    vm: &mut LuaVM,
    table: &LuaValue,
    key: &LuaValue,
    value: LuaValue,
) -> BenchResult<()> {
    if !table.is_table() {
        return Err(BenchError::Fixture(format!(
            "cannot store field {:?} on a non-table",
            key.as_str().unwrap_or("?")
        )));
    }
    vm.raw_set(table, *key, value);
    Ok(())
}

/// Call a function value from Rust and return all of its results.
///
/// A native callee leaves its own stack slot in front of the values it
/// returned; that slot is dropped so callers only see real results.
pub fn call_function(
    vm: &mut LuaVM,
    func: LuaValue,
    args: Vec<LuaValue>,
) -> BenchResult<Vec<LuaValue>> {
    let mut results = vm.call_raw(func, args).bench_err(vm)?;
    if !func.is_lua_function() && results.first() == Some(&func) {
        results.remove(0);
    }
    Ok(results)
}

/// Sum of the first `count` results, all of which must be numbers.
pub fn sum_results(results: &[LuaValue], count: usize) -> BenchResult<f64> {
    if results.len() < count {
        return Err(BenchError::Fixture(format!(
            "expected {count} results, got {}",
            results.len()
        )));
    }
    results[..count].iter().try_fold(0.0, |total, value| {
        to_number(value)
            .map(|v| total + v)
            .ok_or_else(|| BenchError::Fixture("call returned a non-number".into()))
    })
}
