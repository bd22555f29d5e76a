// Script fragments for the repeated-snippet cases.
//
// `body` adds to the chunk-local `x` and is unrolled by `repeated_code`.
// `check` runs once, untimed, before the measured loop.

#[derive(Debug, Clone, Copy)]
pub struct Snippet {
    pub body: &'static str,
    pub check: &'static str,
    /// Amount one execution of `body` adds to `x`.
    pub per_op: f64,
}

pub const C_FUNCTION: Snippet = Snippet {
    body: "x = x + f(3)\n",
    check: "assert(f(3) == 3)\n",
    per_op: 3.0,
};

pub const MEMBER_FUNCTION_CALL: Snippet = Snippet {
    body: "b:set(3)\nx = x + b:get()\n",
    check: "b:set(3)\nassert(b:get() == 3)\n",
    per_op: 3.0,
};

pub const USERDATA_VARIABLE_ACCESS: Snippet = Snippet {
    body: "b.var = 3\nx = x + b.var\n",
    check: "b.var = 3\nassert(b.var == 3)\n",
    per_op: 3.0,
};

pub const USERDATA_VARIABLE_ACCESS_LARGE: Snippet = Snippet {
    body: "b.var0 = 3\nx = x + b.var0\n",
    check: "b.var0 = 3\nassert(b.var0 == 3)\n",
    per_op: 3.0,
};

pub const USERDATA_VARIABLE_ACCESS_LAST: Snippet = Snippet {
    body: "b.var49 = 3\nx = x + b.var49\n",
    check: "b.var49 = 3\nassert(b.var49 == 3)\n",
    per_op: 3.0,
};

pub const RETURN_USERDATA: Snippet = Snippet {
    body: "x = x + h(f(3))\n",
    check: "assert(h(f(3)) == 3)\n",
    per_op: 3.0,
};

pub const IMPLICIT_INHERITANCE: Snippet = Snippet {
    body: "x = x + b:a_func() + b:b_func()\n",
    check: "assert(b:a_func() == 2)\nassert(b:b_func() == 4)\n",
    per_op: 6.0,
};
