// Fixture builders: each installs exactly one global into a fresh interpreter

mod basic;
mod complex;
mod native;

use std::rc::Rc;

use luars::{LuaResult, LuaState, LuaUserdata, LuaVM, LuaValue, UserDataTrait};

use crate::error::{BenchResult, LuaResultExt};
use crate::state::{self, number};

pub use basic::{Basic, BasicLarge, BasicStateful};
pub use complex::{BaseA, BaseB, ComplexAb, ComplexBaseA, ComplexBaseB};
pub use native::{
    basic_call, basic_get, basic_multi_return, basic_return, complex_a_func, complex_b_func,
};

/// Signature of every native function exposed to scripts.
pub type NativeFn = fn(&mut LuaState) -> LuaResult<usize>;

/// Global updated by repeated snippets.
pub const ACCUMULATOR: &str = "acc";

pub fn install_number(vm: &mut LuaVM, name: &str, value: f64) -> BenchResult<()> {
    state::set_global(vm, name, number(value))
}

/// `name = { [field] = value }`; returns the table.
pub fn install_table(
    vm: &mut LuaVM,
    name: &str,
    field: &str,
    value: f64,
) -> BenchResult<LuaValue> {
    let table = new_table(vm, field, value)?;
    state::set_global(vm, name, table)?;
    Ok(table)
}

/// `outer = { [inner] = { [field] = value } }`; returns the outer table.
pub fn install_nested_table(
    vm: &mut LuaVM,
    outer: &str,
    inner: &str,
    field: &str,
    value: f64,
) -> BenchResult<LuaValue> {
    let leaf = new_table(vm, field, value)?;
    let root = vm.create_table(0, 1).bench_err(vm)?;
    let inner_key = state::key(vm, inner)?;
    state::set_field(vm, &root, &inner_key, leaf)?;
    state::set_global(vm, outer, root)?;
    Ok(root)
}

fn new_table(vm: &mut LuaVM, field: &str, value: f64) -> BenchResult<LuaValue> {
    let table = vm.create_table(0, 1).bench_err(vm)?;
    let key = state::key(vm, field)?;
    state::set_field(vm, &table, &key, number(value))?;
    Ok(table)
}

/// Hand `object` to the interpreter as an opaque userdata global.
///
/// Scripts reach its fields and methods only through the type's
/// [`UserDataTrait`] dispatch.
pub fn install_userdata<T>(vm: &mut LuaVM, name: &str, object: T) -> BenchResult<LuaValue>
where
    T: UserDataTrait + 'static,
{
    let value = vm.create_userdata(LuaUserdata::new(object)).bench_err(vm)?;
    state::set_global(vm, name, value)?;
    Ok(value)
}

pub fn install_function(vm: &mut LuaVM, name: &str, func: NativeFn) -> BenchResult<()> {
    state::set_global(vm, name, LuaValue::cfunction(func))
}

/// Install a native closure bound to `target`.
///
/// Each call stores its first argument in `target` and returns it.
pub fn install_stateful_function(
    vm: &mut LuaVM,
    name: &str,
    target: Rc<BasicStateful>,
) -> BenchResult<()> {
    let func = vm
        .create_closure(move |l: &mut LuaState| -> LuaResult<usize> {
            let x = native::arg_number(l, 1)?;
            l.push_value(number(target.call(x)))?;
            Ok(1)
        })
        .bench_err(vm)?;
    state::set_global(vm, name, func)
}

/// `acc = 0`, read back after the measured loop of a repeated-snippet case.
pub fn install_accumulator(vm: &mut LuaVM) -> BenchResult<()> {
    install_number(vm, ACCUMULATOR, 0.0)
}
