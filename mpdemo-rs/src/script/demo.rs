//! The bundled demo routine.
//!
//! Exercises function definition, a counted loop with formatted output,
//! a caught division-by-zero and an explicit collection pass.  `f`, `g` and
//! `sum` are never read by the routine itself; they are left in the globals
//! for the host to inspect.

use std::io::Write;

use super::{
    error::ScriptError,
    interp::Interpreter,
    value::{Function, Value},
};

/// `f(n) = n * n`
pub fn f(n: &Value) -> Result<Value, ScriptError> {
    n.mul(n)
}

/// `g(n) = n ** n`, with `g(0) == 1`.
pub fn g(n: &Value) -> Result<Value, ScriptError> {
    n.pow(n)
}

/// Run the routine once against `interp`.
///
/// The division by zero is handled here and never escapes.  Output and heap
/// failures propagate to the caller.
pub fn run<W: Write>(interp: &mut Interpreter<W>) -> Result<(), ScriptError> {
    interp.store("f", Value::Func(Function::new("f", f)))?;
    interp.store("g", Value::Func(Function::new("g", g)))?;

    interp.store("sum", Value::Int(0))?;
    for i in 0..10 {
        interp.store("i", Value::Int(i))?;
        interp.print(&format!("iter {i:08}"))?;
        let sum = interp.load("sum")?.add(&Value::Int(i))?;
        interp.store("sum", sum)?;
    }

    match Value::Int(1).floor_div(&Value::Int(0)) {
        Ok(_) => {}
        Err(er) if er.is_zero_division() => {
            interp.print(&format!("caught exception {}", er.repr()))?;
        }
        Err(er) => return Err(er),
    }

    interp.store("gc", Value::Module("gc"))?;
    interp.print("run GC collect")?;
    interp.gc_collect();

    interp.print("finish")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
