use std::cell::Cell;

use luars::{LuaUserData, lua_methods};

/// Plain object with one number field.
#[derive(LuaUserData, Default, Debug, Clone, PartialEq)]
pub struct Basic {
    pub var: f64,
}

#[lua_methods]
impl Basic {
    pub fn get(&self) -> f64 {
        self.var
    }

    pub fn set(&mut self, x: f64) {
        self.var = x;
    }
}

/// Wide object: `var0` sits at the start of the field dispatch and `var49`
/// at its end.
#[derive(LuaUserData, Default, Debug, Clone, PartialEq)]
pub struct BasicLarge {
    pub var: f64,
    pub var0: f64,
    pub var1: f64,
    pub var2: f64,
    pub var3: f64,
    pub var4: f64,
    pub var5: f64,
    pub var6: f64,
    pub var7: f64,
    pub var8: f64,
    pub var9: f64,
    pub var10: f64,
    pub var11: f64,
    pub var12: f64,
    pub var13: f64,
    pub var14: f64,
    pub var15: f64,
    pub var16: f64,
    pub var17: f64,
    pub var18: f64,
    pub var19: f64,
    pub var20: f64,
    pub var21: f64,
    pub var22: f64,
    pub var23: f64,
    pub var24: f64,
    pub var25: f64,
    pub var26: f64,
    pub var27: f64,
    pub var28: f64,
    pub var29: f64,
    pub var30: f64,
    pub var31: f64,
    pub var32: f64,
    pub var33: f64,
    pub var34: f64,
    pub var35: f64,
    pub var36: f64,
    pub var37: f64,
    pub var38: f64,
    pub var39: f64,
    pub var40: f64,
    pub var41: f64,
    pub var42: f64,
    pub var43: f64,
    pub var44: f64,
    pub var45: f64,
    pub var46: f64,
    pub var47: f64,
    pub var48: f64,
    pub var49: f64,
}

#[lua_methods]
impl BasicLarge {
    pub fn get(&self) -> f64 {
        self.var
    }

    pub fn set(&mut self, x: f64) {
        self.var = x;
    }
}

/// State bound into a native closure.
#[derive(Debug, Default)]
pub struct BasicStateful {
    storage: Cell<f64>,
    calls: Cell<u64>,
}

impl BasicStateful {
    pub fn call(&self, x: f64) -> f64 {
        self.storage.set(x);
        self.calls.set(self.calls.get() + 1);
        x
    }

    pub fn storage(&self) -> f64 {
        self.storage.get()
    }

    pub fn calls(&self) -> u64 {
        self.calls.get()
    }
}
