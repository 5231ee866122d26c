use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;
#[cfg(feature = "complex_numbers")]
use num_complex::Complex64;
use num_traits::ToPrimitive;
use thiserror::Error;

use crate::interpreter::Interpreter;
use crate::primitives::struct_time::StructTime;

// RUST CONCEPT: Builtin function type
// Builtins receive the interpreter (for output, zone source and limits) and the
// already-evaluated positional arguments
pub type BuiltinFn = fn(&mut Interpreter, Vec<Value>) -> Result<Value>;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, RuntimeError>;

// RUST CONCEPT: A closed set of runtime shapes
// Every value the time primitives can be handed is one of these variants, so the
// coercion rules can be written as exhaustive matches instead of duck typing.
// Containers share their storage through Arc: values are immutable once built and
// may be handed to other threads.
#[derive(Clone)]
pub enum Value {
    None,
    NotImplemented,
    Bool(bool),
    Int(i64),                      // Machine-sized integer (fast path)
    BigInt(BigInt),                // Arbitrary precision integer
    Float(f64),
    #[cfg(feature = "complex_numbers")]
    Complex(Complex64),
    Str(Arc<str>),
    Bytes(Arc<[u8]>),
    ByteArray(Arc<[u8]>),          // Mutable buffer in Python; no mutators are exposed here
    List(Arc<[Value]>),
    Tuple(Arc<[Value]>),
    Range { start: i64, stop: i64, step: i64 },
    Set(Arc<[Value]>),             // Deduplicated, insertion ordered
    FrozenSet(Arc<[Value]>),       // Deduplicated, insertion ordered
    Dict(Arc<[(Value, Value)]>),   // Unique keys, insertion ordered
    Slice(Arc<(Value, Value, Value)>),
    StructTime(Arc<StructTime>),

    // Interpreter-level values
    Module(&'static str),
    Builtin { name: &'static str, func: BuiltinFn },
    Type(&'static str),
}

// Implement Debug manually since BuiltinFn is a higher-ranked fn pointer
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Builtin { name, .. } => write!(f, "Builtin({})", name),
            other => write!(f, "{}({})", other.type_name(), other.repr()),
        }
    }
}

impl Value {
    // RUST CONCEPT: Python class name of a value
    // Used in error messages ("an integer is required (got type str)") and by type()
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::NotImplemented => "NotImplementedType",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::BigInt(_) => "int",
            Value::Float(_) => "float",
            #[cfg(feature = "complex_numbers")]
            Value::Complex(_) => "complex",
            Value::Str(_) => "str",
            Value::Bytes(_) => "bytes",
            Value::ByteArray(_) => "bytearray",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Range { .. } => "range",
            Value::Set(_) => "set",
            Value::FrozenSet(_) => "frozenset",
            Value::Dict(_) => "dict",
            Value::Slice(_) => "slice",
            Value::StructTime(_) => "time.struct_time",
            Value::Module(_) => "module",
            Value::Builtin { .. } => "builtin_function_or_method",
            Value::Type(_) => "type",
        }
    }

    pub fn str(text: &str) -> Value {
        Value::Str(Arc::from(text))
    }

    pub fn tuple(items: Vec<Value>) -> Value {
        Value::Tuple(Arc::from(items))
    }

    pub fn list(items: Vec<Value>) -> Value {
        Value::List(Arc::from(items))
    }

    // RUST CONCEPT: Automatic demotion
    // A BigInt that fits in i64 is stored as Int so that equality and
    // indexing only ever see one representation for small numbers
    pub fn demote(self) -> Self {
        match &self {
            Value::BigInt(i) => match i.to_i64() {
                Some(small) => Value::Int(small),
                None => self,
            },
            _ => self,
        }
    }

    pub fn from_bigint(i: BigInt) -> Value {
        Value::BigInt(i).demote()
    }

    /// Integer view of int-like values (bool counts as int, as in Python).
    /// Returns `None` for every other kind and for integers beyond i64.
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::Int(i) => Some(*i),
            Value::BigInt(i) => i.to_i64(),
            _ => None,
        }
    }

    pub fn is_int_like(&self) -> bool {
        matches!(self, Value::Bool(_) | Value::Int(_) | Value::BigInt(_))
    }

    fn to_bigint(&self) -> Option<BigInt> {
        match self {
            Value::Bool(b) => Some(BigInt::from(u8::from(*b))),
            Value::Int(i) => Some(BigInt::from(*i)),
            Value::BigInt(i) => Some(i.clone()),
            _ => None,
        }
    }

    fn to_f64(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            other => other.to_bigint().and_then(|i| i.to_f64()),
        }
    }

    /// Whether the value may be a set member or dict key.
    pub fn is_hashable(&self) -> bool {
        match self {
            Value::List(_) | Value::Set(_) | Value::Dict(_) | Value::ByteArray(_) | Value::Slice(_) => {
                false
            }
            Value::Tuple(items) => items.iter().all(Value::is_hashable),
            _ => true,
        }
    }

    // RUST CONCEPT: Python equality
    // Numbers compare by value across int/bool/float (True == 1 == 1.0),
    // containers compare element-wise, sets ignore order
    pub fn py_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Float(_), _) | (_, Value::Float(_))
                if (self.is_int_like() || matches!(self, Value::Float(_)))
                    && (other.is_int_like() || matches!(other, Value::Float(_))) =>
            {
                self.to_f64() == other.to_f64()
            }
            (a, b) if a.is_int_like() && b.is_int_like() => a.to_bigint() == b.to_bigint(),
            #[cfg(feature = "complex_numbers")]
            (Value::Complex(a), Value::Complex(b)) => a == b,
            #[cfg(feature = "complex_numbers")]
            (Value::Complex(c), n) | (n, Value::Complex(c)) => {
                c.im == 0.0 && n.to_f64().is_some_and(|re| re == c.re)
            }
            (Value::None, Value::None) => true,
            (Value::NotImplemented, Value::NotImplemented) => true,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bytes(a) | Value::ByteArray(a), Value::Bytes(b) | Value::ByteArray(b)) => a == b,
            (Value::Tuple(a), Value::Tuple(b)) | (Value::List(a), Value::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.py_eq(y))
            }
            (
                Value::Set(a) | Value::FrozenSet(a),
                Value::Set(b) | Value::FrozenSet(b),
            ) => a.len() == b.len() && a.iter().all(|x| b.iter().any(|y| x.py_eq(y))),
            (Value::Dict(a), Value::Dict(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(k, v)| {
                        b.iter().any(|(k2, v2)| k.py_eq(k2) && v.py_eq(v2))
                    })
            }
            (
                Value::Range { start: s1, stop: e1, step: st1 },
                Value::Range { start: s2, stop: e2, step: st2 },
            ) => s1 == s2 && e1 == e2 && st1 == st2,
            (Value::Slice(a), Value::Slice(b)) => {
                a.0.py_eq(&b.0) && a.1.py_eq(&b.1) && a.2.py_eq(&b.2)
            }
            (Value::StructTime(a), Value::StructTime(b)) => a == b,
            (Value::Module(a), Value::Module(b)) => a == b,
            (Value::Type(a), Value::Type(b)) => a == b,
            (Value::Builtin { name: a, .. }, Value::Builtin { name: b, .. }) => a == b,
            _ => false,
        }
    }

    // RUST CONCEPT: Python repr()
    // The unambiguous rendering used for containers and REPL echo
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::NotImplemented => "NotImplemented".to_string(),
            Value::Bool(b) => if *b { "True" } else { "False" }.to_string(),
            Value::Int(i) => i.to_string(),
            Value::BigInt(i) => i.to_string(),
            Value::Float(x) => format_float(*x),
            #[cfg(feature = "complex_numbers")]
            Value::Complex(c) => format_complex(c),
            Value::Str(s) => quote_str(s),
            Value::Bytes(b) => quote_bytes(b),
            Value::ByteArray(b) => format!("bytearray({})", quote_bytes(b)),
            Value::List(items) => format!("[{}]", join_repr(items.iter())),
            Value::Tuple(items) if items.len() == 1 => format!("({},)", items[0].repr()),
            Value::Tuple(items) => format!("({})", join_repr(items.iter())),
            Value::Range { start, stop, step } => {
                if *step == 1 {
                    format!("range({}, {})", start, stop)
                } else {
                    format!("range({}, {}, {})", start, stop, step)
                }
            }
            Value::Set(items) if items.is_empty() => "set()".to_string(),
            Value::Set(items) => format!("{{{}}}", join_repr(items.iter())),
            Value::FrozenSet(items) if items.is_empty() => "frozenset()".to_string(),
            Value::FrozenSet(items) => format!("frozenset({{{}}})", join_repr(items.iter())),
            Value::Dict(pairs) => {
                let body: Vec<String> = pairs
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k.repr(), v.repr()))
                    .collect();
                format!("{{{}}}", body.join(", "))
            }
            Value::Slice(parts) => format!(
                "slice({}, {}, {})",
                parts.0.repr(),
                parts.1.repr(),
                parts.2.repr()
            ),
            Value::StructTime(st) => st.repr(),
            Value::Module(name) => format!("<module '{}' (built-in)>", name),
            Value::Builtin { name, .. } => format!("<built-in function {}>", name),
            Value::Type(name) => format!("<class '{}'>", name),
        }
    }
}

// RUST CONCEPT: Display is Python's str()
// Strings print without quotes, struct_time prints its concise form,
// everything else falls back to repr
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::StructTime(st) => write!(f, "{}", st),
            other => write!(f, "{}", other.repr()),
        }
    }
}

fn join_repr<'a>(items: impl Iterator<Item = &'a Value>) -> String {
    items.map(Value::repr).collect::<Vec<_>>().join(", ")
}

/// Python float repr: shortest round-trip digits, `.0` on integral values,
/// exponent form outside `[1e-4, 1e16)`.
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        // Rust's {:e} is already shortest round-trip: "1e16", "-1.5e-7"
        let scientific = format!("{:e}", x);
        return match scientific.split_once('e') {
            Some((mantissa, exponent)) => {
                let exp: i32 = exponent.parse().unwrap_or(0);
                let sign = if exp < 0 { '-' } else { '+' };
                format!("{}e{}{:02}", mantissa, sign, exp.abs())
            }
            None => scientific,
        };
    }

    let plain = format!("{}", x);
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

// Float repr without the trailing ".0", as used inside complex literals
#[cfg(feature = "complex_numbers")]
fn format_float_short(x: f64) -> String {
    let repr = format_float(x);
    match repr.strip_suffix(".0") {
        Some(short) => short.to_string(),
        None => repr,
    }
}

#[cfg(feature = "complex_numbers")]
fn format_complex(c: &Complex64) -> String {
    if c.re == 0.0 && c.re.is_sign_positive() {
        return format!("{}j", format_float_short(c.im));
    }
    let sign = if c.im < 0.0 || (c.im == 0.0 && c.im.is_sign_negative()) {
        '-'
    } else {
        '+'
    };
    format!(
        "({}{}{}j)",
        format_float_short(c.re),
        sign,
        format_float_short(c.im.abs())
    )
}

// Python picks double quotes only when the text has a single quote and no double quote
fn pick_quote(has_single: bool, has_double: bool) -> char {
    if has_single && !has_double { '"' } else { '\'' }
}

fn quote_str(s: &str) -> String {
    let quote = pick_quote(s.contains('\''), s.contains('"'));
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
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn quote_bytes(bytes: &[u8]) -> String {
    let quote = pick_quote(bytes.contains(&b'\''), bytes.contains(&b'"'));
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote);
    for &byte in bytes {
        match byte {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b as char == quote => {
                out.push('\\');
                out.push(quote);
            }
            0x20..=0x7e => out.push(byte as char),
            _ => out.push_str(&format!("\\x{:02x}", byte)),
        }
    }
    out.push(quote);
    out
}

// RUST CONCEPT: One error enum for the whole runtime
// Each variant is a failure class; Display renders the Python exception the
// user observes, e.g. "OverflowError: mktime argument out of range"
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Wrong number of positional arguments
    #[error("TypeError: {0}")]
    ArgumentCount(String),
    /// A value of the wrong kind
    #[error("TypeError: {0}")]
    TypeMismatch(String),
    /// A sequence with the wrong number of elements
    #[error("TypeError: {0}")]
    Length(String),
    #[error("IndexError: {0}")]
    IndexRange(String),
    /// Missing dict key, carried as the key's repr
    #[error("KeyError: {0}")]
    Key(String),
    #[error("OverflowError: {0}")]
    Overflow(String),
    #[error("AttributeError: {0}")]
    Attribute(String),
    #[error("ValueError: {0}")]
    DomainError(String),
    #[error("NameError: name '{0}' is not defined")]
    UndefinedName(String),
    #[error("ImportError: No module named '{0}'")]
    ModuleNotFound(String),
    #[error("SyntaxError: {0}")]
    Syntax(String),
    /// The output sink refused a write
    #[error("OSError: {0}")]
    Io(String),
}

impl RuntimeError {
    /// The Python exception class this error surfaces as.
    pub fn exception_name(&self) -> &'static str {
        match self {
            RuntimeError::ArgumentCount(_)
            | RuntimeError::TypeMismatch(_)
            | RuntimeError::Length(_) => "TypeError",
            RuntimeError::IndexRange(_) => "IndexError",
            RuntimeError::Key(_) => "KeyError",
            RuntimeError::Overflow(_) => "OverflowError",
            RuntimeError::Attribute(_) => "AttributeError",
            RuntimeError::DomainError(_) => "ValueError",
            RuntimeError::UndefinedName(_) => "NameError",
            RuntimeError::ModuleNotFound(_) => "ImportError",
            RuntimeError::Syntax(_) => "SyntaxError",
            RuntimeError::Io(_) => "OSError",
        }
    }

    /// The message without the exception class prefix.
    pub fn message(&self) -> String {
        let rendered = self.to_string();
        match rendered.split_once(": ") {
            Some((_, message)) => message.to_string(),
            None => rendered,
        }
    }
}
