//! Embedding host.
//!
//! Loads the demo routine into a fresh [`Interpreter`], brackets it with
//! entry/exit markers, then inspects what the routine left in its globals:
//!
//! ```text
//! (entering script)
//! iter 00000000
//! …
//! finish
//! (exited script)
//! f(5): 25
//! g(5): 3125
//! sum: 45
//! globals:
//!   '__name__': '__main__'
//!   'f': <function f>
//!   …
//! ```
//!
//! In script-only mode just the routine's own lines are written.

use std::io::Write;

use crate::config::HostConfig;
use crate::gc::Heap;
use crate::script::{demo, Interpreter, ScriptError, Value};

/// Argument the host passes to the routine's functions.
const PROBE_ARG: i64 = 5;

/// Drives the demo routine and reports on its globals.
pub struct Host<W: Write> {
    interp: Interpreter<W>,
    script_only: bool,
}

impl<W: Write> Host<W> {
    pub fn new(out: W, config: &HostConfig) -> Result<Self, ScriptError> {
        let mut interp = Interpreter::new(out, Heap::new(config.heap_size))?;
        interp.set_debug(config.debug);
        Ok(Self { interp, script_only: config.script_only })
    }

    pub fn interpreter(&self) -> &Interpreter<W> {
        &self.interp
    }

    pub fn into_output(self) -> W {
        self.interp.into_output()
    }

    /// One full host cycle.  Any error here escaped the routine.
    pub fn run(&mut self) -> Result<(), ScriptError> {
        if self.script_only {
            demo::run(&mut self.interp)?;
            return self.interp.flush();
        }

        self.interp.write_line("(entering script)")?;
        demo::run(&mut self.interp)?;
        self.interp.write_line("(exited script)")?;

        let arg = Value::Int(PROBE_ARG);
        for name in ["f", "g"] {
            let res = self.interp.call(name, &arg)?;
            self.interp
                .write_line(&format!("{name}({PROBE_ARG}): {}", res.repr()))?;
        }

        let sum = self.interp.load("sum")?.as_int_checked()?;
        self.interp.write_line(&format!("sum: {sum}"))?;

        self.interp.write_line("globals:")?;
        let listing: Vec<String> = self
            .interp
            .globals()
            .iter()
            .map(|(k, v)| format!("  {}: {}", Value::from(k).repr(), v.repr()))
            .collect();
        for line in &listing {
            self.interp.write_line(line)?;
        }

        self.interp.flush()
    }

    /// Run `runs` cycles back to back on the same interpreter.
    pub fn run_repeated(&mut self, runs: u32) -> Result<(), ScriptError> {
        for n in 1..=runs {
            self.interp.log(format_args!("run {n}/{runs}"));
            self.run()?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
