// Benchmark cases.
//
// Every case builds its own interpreter, installs fixtures, times exactly
// `run.iterations()` operations through `Run::measure`, then checks the
// accumulated total. The interpreter is dropped on return, including
// early returns through `?`.

use std::rc::Rc;

use luars::LuaVM;

use crate::code_cache::{CodeCache, do_string, repeated_code};
use crate::error::{BenchError, BenchResult};
use crate::fixtures::{self, ACCUMULATOR, Basic, BasicLarge, BasicStateful, ComplexAb};
use crate::snippets::{self, Snippet};
use crate::state::{self, create_state, number};
use crate::verify::Run;

const LUA_IDENTITY: &str = "function f (i)\n  return i\nend\n";
const LUA_MULTI_RETURN: &str = "function f (i)\n  return i, i * 2\nend\n";

/// Check once, then time the repeated form of `snippet` and verify `acc`.
fn measure_snippet(run: &mut Run, vm: &mut LuaVM, snippet: &Snippet) -> BenchResult<()> {
    do_string(vm, snippet.check)?;
    fixtures::install_accumulator(vm)?;

    let repetition = run.config().repetition;
    let mut cache = CodeCache::new(vm)?;
    let handle = cache.load(vm, &repeated_code(snippet.body, repetition))?;
    run.measure(|| cache.run(vm, handle))?;
    cache.unload(vm, handle)?;

    let acc = state::global_number(vm, ACCUMULATOR)?;
    let expected = run.expected(snippet.per_op * repetition as f64);
    run.expect(acc, expected);
    Ok(())
}

/// Native-side call of global `f` with argument 3, summing `results` values.
fn call_global_f(vm: &mut LuaVM, results: usize) -> BenchResult<f64> {
    let f = state::global_value(vm, "f")?;
    let values = state::call_function(vm, f, vec![number(3.0)])?;
    state::sum_results(&values, results)
}

pub fn global_string_get(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    fixtures::install_number(&mut vm, "value", 3.0)?;

    let mut x = 0.0;
    run.measure(|| {
        x += state::global_number(&mut vm, "value")?;
        Ok(())
    })?;

    let expected = run.expected(3.0);
    run.expect(x, expected);
    Ok(())
}

pub fn global_string_set(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    fixtures::install_number(&mut vm, "value", 0.0)?;

    let mut v = 0.0;
    run.measure(|| {
        v += 3.0;
        state::set_global(&mut vm, "value", number(v))
    })?;

    let x = state::global_number(&mut vm, "value")?;
    let expected = run.expected(3.0);
    run.expect(x, v);
    run.expect(x, expected);
    run.expect(v, expected);
    Ok(())
}

pub fn table_get(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    let warble = fixtures::install_table(&mut vm, "warble", "value", 3.0)?;
    let value = state::key(&mut vm, "value")?;

    let mut x = 0.0;
    run.measure(|| {
        x += state::field_number(&mut vm, &warble, &value)?;
        Ok(())
    })?;

    let expected = run.expected(3.0);
    run.expect(x, expected);
    Ok(())
}

pub fn table_set(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    let warble = fixtures::install_table(&mut vm, "warble", "value", 3.0)?;
    let value = state::key(&mut vm, "value")?;

    let mut v = 0.0;
    run.measure(|| {
        v += 3.0;
        state::set_field(&mut vm, &warble, &value, number(v))
    })?;

    let x = state::field_number(&mut vm, &warble, &value)?;
    let expected = run.expected(3.0);
    run.expect(x, v);
    run.expect(x, expected);
    run.expect(v, expected);
    Ok(())
}

pub fn table_chained_get(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    fixtures::install_nested_table(&mut vm, "ulahibe", "warble", "value", 3.0)?;
    let warble = state::key(&mut vm, "warble")?;
    let value = state::key(&mut vm, "value")?;

    let mut x = 0.0;
    run.measure(|| {
        let root = state::global_value(&mut vm, "ulahibe")?;
        let inner = state::field_value(&mut vm, &root, &warble)?;
        x += state::field_number(&mut vm, &inner, &value)?;
        Ok(())
    })?;

    let expected = run.expected(3.0);
    run.expect(x, expected);
    Ok(())
}

pub fn table_chained_set(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    fixtures::install_nested_table(&mut vm, "ulahibe", "warble", "value", 3.0)?;
    let warble = state::key(&mut vm, "warble")?;
    let value = state::key(&mut vm, "value")?;

    let mut v = 0.0;
    run.measure(|| {
        v += 3.0;
        let root = state::global_value(&mut vm, "ulahibe")?;
        let inner = state::field_value(&mut vm, &root, &warble)?;
        state::set_field(&mut vm, &inner, &value, number(v))
    })?;

    let root = state::global_value(&mut vm, "ulahibe")?;
    let inner = state::field_value(&mut vm, &root, &warble)?;
    let x = state::field_number(&mut vm, &inner, &value)?;
    let expected = run.expected(3.0);
    run.expect(x, v);
    run.expect(x, expected);
    run.expect(v, expected);
    Ok(())
}

pub fn c_function(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_function(&mut vm, "f", fixtures::basic_call)?;
    measure_snippet(run, &mut vm, &snippets::C_FUNCTION)
}

pub fn c_through_lua_function(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_function(&mut vm, "f", fixtures::basic_call)?;

    let mut x = 0.0;
    run.measure(|| {
        x += call_global_f(&mut vm, 1)?;
        Ok(())
    })?;

    let expected = run.expected(3.0);
    run.expect(x, expected);
    Ok(())
}

pub fn lua_function(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    do_string(&mut vm, LUA_IDENTITY)?;

    let mut x = 0.0;
    run.measure(|| {
        x += call_global_f(&mut vm, 1)?;
        Ok(())
    })?;

    let expected = run.expected(3.0);
    run.expect(x, expected);
    Ok(())
}

pub fn member_function_call(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_userdata(&mut vm, "b", Basic::default())?;
    measure_snippet(run, &mut vm, &snippets::MEMBER_FUNCTION_CALL)
}

pub fn userdata_variable_access(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_userdata(&mut vm, "b", Basic::default())?;
    measure_snippet(run, &mut vm, &snippets::USERDATA_VARIABLE_ACCESS)
}

pub fn userdata_variable_access_large(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_userdata(&mut vm, "b", BasicLarge::default())?;
    measure_snippet(run, &mut vm, &snippets::USERDATA_VARIABLE_ACCESS_LARGE)
}

pub fn userdata_variable_access_last(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_userdata(&mut vm, "b", BasicLarge::default())?;
    measure_snippet(run, &mut vm, &snippets::USERDATA_VARIABLE_ACCESS_LAST)
}

pub fn multi_return(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    fixtures::install_function(&mut vm, "f", fixtures::basic_multi_return)?;

    let mut x = 0.0;
    run.measure(|| {
        x += call_global_f(&mut vm, 2)?;
        Ok(())
    })?;

    let expected = run.expected(9.0);
    run.expect(x, expected);
    Ok(())
}

pub fn multi_return_lua(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    do_string(&mut vm, LUA_MULTI_RETURN)?;

    let mut x = 0.0;
    run.measure(|| {
        x += call_global_f(&mut vm, 2)?;
        Ok(())
    })?;

    let expected = run.expected(9.0);
    run.expect(x, expected);
    Ok(())
}

pub fn stateful_function_object(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    let target = Rc::new(BasicStateful::default());
    fixtures::install_stateful_function(&mut vm, "f", Rc::clone(&target))?;

    let mut x = 0.0;
    run.measure(|| {
        x += call_global_f(&mut vm, 1)?;
        Ok(())
    })?;

    let expected = run.expected(3.0);
    let iterations = run.iterations() as f64;
    run.expect(x, expected);
    run.expect(target.storage(), 3.0);
    run.expect(target.calls() as f64, iterations);
    Ok(())
}

pub fn base_derived(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    fixtures::install_userdata(&mut vm, "b", ComplexAb::default())?;

    let mut x = 0.0;
    run.measure(|| {
        let b = state::global_value(&mut vm, "b")?;
        let ud = b
            .as_userdata_mut()
            .and_then(|ud| ud.downcast_ref::<ComplexAb>())
            .ok_or_else(|| BenchError::Fixture("global 'b' is not a ComplexAb".into()))?;
        x += ud.as_base_a().a_func();
        x += ud.as_base_b().b_func();
        Ok(())
    })?;

    let expected = run.expected(6.0);
    run.expect(x, expected);
    Ok(())
}

pub fn return_userdata(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_function(&mut vm, "f", fixtures::basic_return)?;
    fixtures::install_function(&mut vm, "h", fixtures::basic_get)?;
    measure_snippet(run, &mut vm, &snippets::RETURN_USERDATA)
}

pub fn optional(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(false)?;
    let value = state::key(&mut vm, "value")?;

    let mut x = 0.0;
    run.measure(|| {
        match state::optional_global(&mut vm, "warble")? {
            Some(warble) if warble.is_table() => {
                if let Some(v) = vm.raw_get(&warble, &value).as_ref().and_then(state::to_number) {
                    x += v;
                }
            }
            _ => x += 1.0,
        }
        Ok(())
    })?;

    let expected = run.expected(1.0);
    run.expect(x, expected);
    Ok(())
}

pub fn implicit_inheritance(run: &mut Run) -> BenchResult<()> {
    let mut vm = create_state(true)?;
    fixtures::install_userdata(&mut vm, "b", ComplexAb::default())?;
    measure_snippet(run, &mut vm, &snippets::IMPLICIT_INHERITANCE)
}
