// Two unrelated bases combined into one object, reached through named views

use std::any::Any;

use luars::{UdValue, UserDataTrait};

use super::native::{complex_a_func, complex_b_func};

pub trait BaseA {
    fn a_func(&self) -> f64;
}

pub trait BaseB {
    fn b_func(&self) -> f64;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexBaseA {
    pub a: f64,
}

impl Default for ComplexBaseA {
    fn default() -> Self {
        Self { a: 2.0 }
    }
}

impl BaseA for ComplexBaseA {
    fn a_func(&self) -> f64 {
        self.a
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComplexBaseB {
    pub b: f64,
}

impl Default for ComplexBaseB {
    fn default() -> Self {
        Self { b: 4.0 }
    }
}

impl BaseB for ComplexBaseB {
    fn b_func(&self) -> f64 {
        self.b
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ComplexAb {
    base_a: ComplexBaseA,
    base_b: ComplexBaseB,
}

impl ComplexAb {
    pub fn as_base_a(&self) -> &dyn BaseA {
        &self.base_a
    }

    pub fn as_base_b(&self) -> &dyn BaseB {
        &self.base_b
    }
}

// Lookups from scripts resolve both bases' members on the combined object.
impl UserDataTrait for ComplexAb {
    fn type_name(&self) -> &'static str {
        "ComplexAb"
    }

    fn get_field(&self, key: &str) -> Option<UdValue> {
        match key {
            "a" => Some(UdValue::Number(self.base_a.a)),
            "b" => Some(UdValue::Number(self.base_b.b)),
            "a_func" => Some(UdValue::Function(complex_a_func)),
            "b_func" => Some(UdValue::Function(complex_b_func)),
            _ => None,
        }
    }

    fn set_field(&mut self, _key: &str, _value: UdValue) -> Option<Result<(), String>> {
        None
    }

    fn field_names(&self) -> &'static [&'static str] {
        &["a", "b"]
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
