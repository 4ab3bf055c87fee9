//! Script-level exceptions.
//!
//! Every fallible runtime operation returns a [`ScriptError`].  Each variant
//! corresponds to one exception class visible to scripts; [`ScriptError::repr`]
//! renders it the way a script's `repr(er)` would.

use std::fmt;

/// An exception raised while running a script.
#[derive(Debug)]
pub enum ScriptError {
    /// `ZeroDivisionError`: division, floor division or `0 ** -n`.
    ZeroDivision(&'static str),
    /// `TypeError`: an operation applied to operands of the wrong type.
    Type(String),
    /// `ValueError`: right type, unusable value.
    Value(String),
    /// `NameError`: a global lookup that found nothing.
    Name(String),
    /// `MemoryError`: the heap could not satisfy an allocation.
    Memory { requested: usize },
    /// `OSError`: the console sink failed.
    Io(std::io::Error),
}

impl ScriptError {
    /// Exception class name.
    pub fn kind(&self) -> &'static str {
        match self {
            ScriptError::ZeroDivision(_) => "ZeroDivisionError",
            ScriptError::Type(_) => "TypeError",
            ScriptError::Value(_) => "ValueError",
            ScriptError::Name(_) => "NameError",
            ScriptError::Memory { .. } => "MemoryError",
            ScriptError::Io(_) => "OSError",
        }
    }

    /// The exception's argument, without the class name.
    pub fn message(&self) -> String {
        match self {
            ScriptError::ZeroDivision(msg) => (*msg).to_owned(),
            ScriptError::Type(msg) | ScriptError::Value(msg) => msg.clone(),
            ScriptError::Name(name) => format!("name '{name}' isn't defined"),
            ScriptError::Memory { requested } => {
                format!("memory allocation failed, allocating {requested} bytes")
            }
            ScriptError::Io(e) => e.to_string(),
        }
    }

    /// `repr()` form: `ZeroDivisionError('divide by zero')`.
    ///
    /// The argument is quoted with double quotes when it contains a single
    /// quote, as a Python string repr would be.
    pub fn repr(&self) -> String {
        let msg = self.message();
        if msg.contains('\'') && !msg.contains('"') {
            format!("{}(\"{msg}\")", self.kind())
        } else {
            format!("{}('{}')", self.kind(), msg.replace('\'', "\\'"))
        }
    }

    /// `true` for the division-by-zero condition the demo routine catches.
    pub fn is_zero_division(&self) -> bool {
        matches!(self, ScriptError::ZeroDivision(_))
    }

    /// Shorthand for the `TypeError` raised by binary operators.
    pub(crate) fn unsupported(op: &str, lhs: &str, rhs: &str) -> Self {
        ScriptError::Type(format!("unsupported types for __{op}__: '{lhs}', '{rhs}'"))
    }
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for ScriptError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScriptError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        ScriptError::Io(e)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_division_repr() {
        let e = ScriptError::ZeroDivision("divide by zero");
        assert_eq!(e.repr(), "ZeroDivisionError('divide by zero')");
        assert_eq!(e.to_string(), "ZeroDivisionError: divide by zero");
        assert!(e.is_zero_division());
    }

    #[test]
    fn name_error_uses_double_quotes() {
        let e = ScriptError::Name("sum".into());
        assert_eq!(e.repr(), "NameError(\"name 'sum' isn't defined\")");
        assert!(!e.is_zero_division());
    }

    #[test]
    fn memory_error_message() {
        let e = ScriptError::Memory { requested: 29 };
        assert_eq!(
            e.to_string(),
            "MemoryError: memory allocation failed, allocating 29 bytes"
        );
    }

    #[test]
    fn io_error_has_source() {
        use std::error::Error;
        let e: ScriptError = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into();
        assert_eq!(e.kind(), "OSError");
        assert!(e.source().is_some());
    }

    #[test]
    fn unsupported_types_message() {
        let e = ScriptError::unsupported("mul", "str", "int");
        assert_eq!(e.message(), "unsupported types for __mul__: 'str', 'int'");
    }
}
