//! Runtime value type.
//!
//! Integers stay integers as long as they fit in an `i64`; arithmetic that
//! overflows is promoted to `Float` rather than wrapping.  Mixed int/float
//! operands promote to `Float`.

use std::fmt;

use super::error::ScriptError;

/// Bytes charged to the heap for one boxed object header.
const OBJ_HEADER: usize = 16;

/// Signature of a native one-argument function.
pub type NativeFn = fn(&Value) -> Result<Value, ScriptError>;

/// A named native function bound into the globals table.
#[derive(Clone, Copy)]
pub struct Function {
    name: &'static str,
    body: NativeFn,
}

impl Function {
    pub const fn new(name: &'static str, body: NativeFn) -> Self {
        Self { name, body }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, arg: &Value) -> Result<Value, ScriptError> {
        (self.body)(arg)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function {}>", self.name)
    }
}

// Two functions are the same binding when they carry the same name.
impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A script runtime value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Int(i64),
    Float(f64),
    Str(String),
    Func(Function),
    Module(&'static str),
}

/// Numeric view of an operand.
#[derive(Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn as_f64(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(x) => x,
        }
    }
}

impl fmt::Display for Value {
    /// `str()` form: strings print bare, everything else as its repr.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => f.write_str(&other.repr()),
        }
    }
}

impl Value {
    /// `repr()` form.
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_owned(),
            Value::Int(n) => n.to_string(),
            Value::Float(x) => float_repr(*x),
            Value::Str(s) => str_repr(s),
            Value::Func(func) => format!("<function {}>", func.name()),
            Value::Module(name) => format!("<module '{name}'>"),
        }
    }

    /// Name of the value's type, as used in `TypeError` messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::Func(_) => "function",
            Value::Module(_) => "module",
        }
    }

    /// Bytes this value occupies on the script heap.  `None` is a singleton
    /// and costs nothing.
    pub fn footprint(&self) -> usize {
        match self {
            Value::None => 0,
            Value::Int(_) | Value::Float(_) => OBJ_HEADER,
            Value::Str(s) => OBJ_HEADER + s.len(),
            Value::Func(_) | Value::Module(_) => 2 * OBJ_HEADER,
        }
    }

    /// Checked conversion to a native integer; only `Int` converts.
    pub fn as_int_checked(&self) -> Result<i64, ScriptError> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(ScriptError::Type(format!(
                "can't convert {} to int",
                other.type_name()
            ))),
        }
    }

    fn num(&self) -> Option<Num> {
        match self {
            Value::Int(n) => Some(Num::Int(*n)),
            Value::Float(x) => Some(Num::Float(*x)),
            _ => None,
        }
    }

    fn operands(&self, op: &str, rhs: &Value) -> Result<(Num, Num), ScriptError> {
        match (self.num(), rhs.num()) {
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(ScriptError::unsupported(op, self.type_name(), rhs.type_name())),
        }
    }

    // ── Arithmetic ────────────────────────────────────────────────────────────

    /// `self + rhs`.  Two strings concatenate.
    pub fn add(&self, rhs: &Value) -> Result<Value, ScriptError> {
        if let (Value::Str(a), Value::Str(b)) = (self, rhs) {
            return Ok(Value::Str(format!("{a}{b}")));
        }
        Ok(match self.operands("add", rhs)? {
            (Num::Int(a), Num::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Value::Float(a as f64 + b as f64), Value::Int),
            (a, b) => Value::Float(a.as_f64() + b.as_f64()),
        })
    }

    /// `self * rhs`.
    pub fn mul(&self, rhs: &Value) -> Result<Value, ScriptError> {
        Ok(match self.operands("mul", rhs)? {
            (Num::Int(a), Num::Int(b)) => a
                .checked_mul(b)
                .map_or_else(|| Value::Float(a as f64 * b as f64), Value::Int),
            (a, b) => Value::Float(a.as_f64() * b.as_f64()),
        })
    }

    /// `self ** rhs`.  `0 ** 0 == 1`; a negative integer exponent gives a
    /// float result.
    pub fn pow(&self, rhs: &Value) -> Result<Value, ScriptError> {
        match self.operands("pow", rhs)? {
            (Num::Int(base), Num::Int(exp)) if exp >= 0 => Ok(int_pow(base, exp)),
            (Num::Int(0), Num::Int(_)) => Err(ScriptError::ZeroDivision("0.0 to a negative power")),
            (a, b) => float_pow(a.as_f64(), b.as_f64()),
        }
    }

    /// `self // rhs`, rounding toward negative infinity.
    pub fn floor_div(&self, rhs: &Value) -> Result<Value, ScriptError> {
        match self.operands("floordiv", rhs)? {
            (Num::Int(_), Num::Int(0)) => Err(ScriptError::ZeroDivision("divide by zero")),
            (Num::Int(a), Num::Int(b)) => Ok(floor_div_i64(a, b)
                .map_or_else(|| Value::Float((a as f64 / b as f64).floor()), Value::Int)),
            (a, b) => {
                let b = b.as_f64();
                if b == 0.0 {
                    return Err(ScriptError::ZeroDivision("divide by zero"));
                }
                Ok(Value::Float((a.as_f64() / b).floor()))
            }
        }
    }
}

/// Integer floor division; `None` only for `i64::MIN // -1`.
fn floor_div_i64(a: i64, b: i64) -> Option<i64> {
    let q = a.checked_div(b)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Some(q - 1)
    } else {
        Some(q)
    }
}

fn int_pow(base: i64, exp: i64) -> Value {
    if let Some(v) = u32::try_from(exp).ok().and_then(|e| base.checked_pow(e)) {
        return Value::Int(v);
    }
    match base {
        0 | 1 => Value::Int(base),
        -1 => Value::Int(if exp % 2 == 0 { 1 } else { -1 }),
        _ => Value::Float((base as f64).powf(exp as f64)),
    }
}

fn float_pow(base: f64, exp: f64) -> Result<Value, ScriptError> {
    if base == 0.0 && exp < 0.0 {
        return Err(ScriptError::ZeroDivision("0.0 to a negative power"));
    }
    if base < 0.0 && exp.fract() != 0.0 {
        return Err(ScriptError::Value("math domain error".into()));
    }
    Ok(Value::Float(base.powf(exp)))
}

fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_owned();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_owned();
    }
    let mag = x.abs();
    if mag != 0.0 && !(1e-4..1e16).contains(&mag) {
        // 1e+20, 2.5e-07
        let s = format!("{x:e}");
        let (mantissa, exp) = s.split_once('e').unwrap_or((s.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{:02}", exp.abs());
    }
    if x.fract() == 0.0 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
