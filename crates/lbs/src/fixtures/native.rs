// Native functions registered into the interpreter by the cases

use luars::{LuaResult, LuaState, LuaUserdata, LuaValue};

use super::basic::Basic;
use super::complex::ComplexAb;
use crate::state::{number, to_number};

pub(crate) fn arg_number(l: &mut LuaState, index: usize) -> LuaResult<f64> {
    match l.get_arg(index).as_ref().and_then(to_number) {
        Some(x) => Ok(x),
        None => Err(l.error(format!("bad argument #{index} (number expected)"))),
    }
}

/// Run `f` against the userdata passed as argument 1.
pub(crate) fn with_self<T: 'static, R>(l: &mut LuaState, f: impl FnOnce(&T) -> R) -> LuaResult<R> {
    let value = l.get_arg(1).unwrap_or(LuaValue::nil());
    let result = value
        .as_userdata_mut()
        .and_then(|ud| ud.downcast_ref::<T>())
        .map(f);
    match result {
        Some(r) => Ok(r),
        None => Err(l.error(format!(
            "bad argument #1 ({} expected)",
            std::any::type_name::<T>()
        ))),
    }
}

/// `f(i) -> i`
pub fn basic_call(l: &mut LuaState) -> LuaResult<usize> {
    let x = arg_number(l, 1)?;
    l.push_value(number(x))?;
    Ok(1)
}

/// `f(i) -> i, 2i`
pub fn basic_multi_return(l: &mut LuaState) -> LuaResult<usize> {
    let x = arg_number(l, 1)?;
    l.push_value(number(x))?;
    l.push_value(number(x * 2.0))?;
    Ok(2)
}

/// `f(i) -> Basic { var = i }`, owned by the interpreter.
pub fn basic_return(l: &mut LuaState) -> LuaResult<usize> {
    let x = arg_number(l, 1)?;
    let ud = l.create_userdata(LuaUserdata::new(Basic { var: x }))?;
    l.push_value(ud)?;
    Ok(1)
}

/// `h(b) -> b.var`
pub fn basic_get(l: &mut LuaState) -> LuaResult<usize> {
    let var = with_self(l, |b: &Basic| b.var)?;
    l.push_value(number(var))?;
    Ok(1)
}

pub fn complex_a_func(l: &mut LuaState) -> LuaResult<usize> {
    let v = with_self(l, |ab: &ComplexAb| ab.as_base_a().a_func())?;
    l.push_value(number(v))?;
    Ok(1)
}

pub fn complex_b_func(l: &mut LuaState) -> LuaResult<usize> {
    let v = with_self(l, |ab: &ComplexAb| ab.as_base_b().b_func())?;
    l.push_value(number(v))?;
    Ok(1)
}
