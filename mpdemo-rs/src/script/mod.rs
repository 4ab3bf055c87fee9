//! Script runtime surface and the bundled demo routine.
//!
//! Only as much runtime as the demo needs: a [`Value`] type with
//! Python-flavoured arithmetic, a [`Globals`] namespace, a [`ScriptError`]
//! exception taxonomy and an [`Interpreter`] context that ties them to a
//! heap and a console sink.
//!
//! # Quick start
//!
//! ```rust
//! use mpdemo::gc::Heap;
//! use mpdemo::script::{demo, Interpreter, Value};
//!
//! let mut interp = Interpreter::new(Vec::<u8>::new(), Heap::default()).unwrap();
//! demo::run(&mut interp).unwrap();
//! assert_eq!(interp.load("sum").unwrap(), Value::Int(45));
//! ```

pub mod demo;
pub mod error;
pub mod globals;
pub mod interp;
pub mod value;

// Re-exports for convenience.
pub use error::ScriptError;
pub use globals::Globals;
pub use interp::Interpreter;
pub use value::{Function, Value};
