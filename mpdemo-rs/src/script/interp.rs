//! Script execution context.
//!
//! The [`Interpreter`] owns the globals table, the heap and the console sink
//! a script runs against.  Script-side operations (`print`, global stores,
//! function calls) charge their allocations to the heap; host-side output via
//! [`Interpreter::write_line`] does not.

use std::fmt;
use std::io::Write;

use crate::gc::{GcStats, Heap};
use super::{error::ScriptError, globals::Globals, value::Value};

/// Runtime context for one script module.
pub struct Interpreter<W: Write> {
    globals: Globals,
    heap: Heap,
    out: W,
    debug: bool,
}

impl<W: Write> Interpreter<W> {
    /// Create a context writing to `out`.  Seeds `__name__` the way a main
    /// module sees it; fails only if the heap cannot hold that binding.
    pub fn new(out: W, heap: Heap) -> Result<Self, ScriptError> {
        let mut interp = Self { globals: Globals::new(), heap, out, debug: false };
        interp.store("__name__", Value::from("__main__"))?;
        Ok(interp)
    }

    /// Enable `mpdemo: …` diagnostics on stderr.
    pub fn set_debug(&mut self, on: bool) {
        self.debug = on;
    }

    pub fn globals(&self) -> &Globals {
        &self.globals
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    /// Consume the context and hand back its sink.
    pub fn into_output(self) -> W {
        self.out
    }

    pub(crate) fn log(&self, msg: impl fmt::Display) {
        if self.debug {
            eprintln!("mpdemo: {msg}");
        }
    }

    // ── Heap ──────────────────────────────────────────────────────────────────

    /// Charge `bytes`, collecting once and retrying if the heap is full.
    fn alloc(&mut self, bytes: usize) -> Result<(), ScriptError> {
        if self.heap.alloc(bytes).is_ok() {
            return Ok(());
        }
        self.log(format_args!("gc: heap full, {bytes} bytes requested"));
        self.gc_collect();
        self.heap.alloc(bytes)
    }

    /// Reclaim everything not reachable from the globals.  Synchronous.
    pub fn gc_collect(&mut self) -> GcStats {
        let stats = self.heap.collect(self.globals.footprint());
        self.log(format_args!(
            "gc: pass {} freed {} bytes, {}/{} in use",
            stats.collections,
            stats.last_freed,
            self.heap.used(),
            self.heap.capacity(),
        ));
        stats
    }

    // ── Output ────────────────────────────────────────────────────────────────

    /// Script `print(line)`: the line is a fresh string object on the heap.
    pub fn print(&mut self, line: &str) -> Result<(), ScriptError> {
        self.alloc(Value::from(line).footprint())?;
        self.write_line(line)
    }

    /// Host-side output; bypasses the script heap.
    pub fn write_line(&mut self, line: &str) -> Result<(), ScriptError> {
        writeln!(self.out, "{line}")?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), ScriptError> {
        self.out.flush()?;
        Ok(())
    }

    // ── Globals ───────────────────────────────────────────────────────────────

    /// Bind a global.  A new name also allocates its key string.
    pub fn store(&mut self, name: &str, value: Value) -> Result<(), ScriptError> {
        let mut bytes = value.footprint();
        if !self.globals.contains(name) {
            bytes += Value::from(name).footprint();
        }
        self.alloc(bytes)?;
        self.globals.set(name, value);
        Ok(())
    }

    /// Look up a global, raising `NameError` when it is unbound.
    pub fn load(&self, name: &str) -> Result<Value, ScriptError> {
        self.globals
            .get(name)
            .cloned()
            .ok_or_else(|| ScriptError::Name(name.to_owned()))
    }

    /// Call the global function `name` with one argument.
    pub fn call(&mut self, name: &str, arg: &Value) -> Result<Value, ScriptError> {
        let func = match self.load(name)? {
            Value::Func(func) => func,
            other => {
                return Err(ScriptError::Type(format!(
                    "'{}' object isn't callable",
                    other.type_name()
                )))
            }
        };
        let result = func.call(arg)?;
        self.alloc(result.footprint())?;
        Ok(result)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
