use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime values produced by generated programs.
///
/// Arithmetic and comparison follow the loose scripting semantics blueprint
/// authors expect: strings concatenate, booleans count as 0/1, and nothing
/// here ever fails. Failures only come from capabilities.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Str(String),
    #[default]
    Undefined,
}

// Manual implementation to handle f64
impl Eq for Value {}

// Manual implementation to handle f64 by hashing its bits
impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Number(n) => n.to_bits().hash(state),
            Value::Bool(b) => b.hash(state),
            Value::Str(s) => s.hash(state),
            Value::Undefined => {}
        }
    }
}

impl Value {
    /// `false`, `0`, `NaN`, `""` and `undefined` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Undefined => false,
        }
    }

    /// Numeric coercion used by `- * /` and mixed comparisons.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(true) => 1.0,
            Value::Bool(false) => 0.0,
            Value::Str(s) => parse_numeric(s),
            Value::Undefined => f64::NAN,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Undefined => "undefined",
        }
    }

    /// `+`: concatenates when either side is a string.
    pub fn add(&self, other: &Value) -> Value {
        match (self, other) {
            (Value::Str(_), _) | (_, Value::Str(_)) => Value::Str(format!("{}{}", self, other)),
            _ => Value::Number(self.to_number() + other.to_number()),
        }
    }

    pub fn sub(&self, other: &Value) -> Value {
        Value::Number(self.to_number() - other.to_number())
    }

    pub fn mul(&self, other: &Value) -> Value {
        Value::Number(self.to_number() * other.to_number())
    }

    /// Division by zero yields `Infinity` or `NaN`, never an error.
    pub fn div(&self, other: &Value) -> Value {
        Value::Number(self.to_number() / other.to_number())
    }

    /// Strict equality: same variant and same payload. `NaN` is never equal to itself.
    pub fn strict_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Undefined, Value::Undefined) => true,
            _ => false,
        }
    }

    pub fn greater_than(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a > b,
            _ => self.to_number() > other.to_number(),
        }
    }

    /// `&&` yields the left operand when it is falsy, otherwise the right one.
    pub fn logical_and(self, other: Value) -> Value {
        if self.is_truthy() { other } else { self }
    }

    /// `||` yields the left operand when it is truthy, otherwise the right one.
    pub fn logical_or(self, other: Value) -> Value {
        if self.is_truthy() { self } else { other }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.is_nan() {
                    write!(f, "NaN")
                } else if n.is_infinite() {
                    write!(f, "{}", if *n > 0.0 { "Infinity" } else { "-Infinity" })
                } else if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => write!(f, "{}", s),
            Value::Undefined => write!(f, "undefined"),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// String to number coercion. Accepts decimal and exponent forms, the exact
/// spelling `Infinity`, and unsigned `0x`/`0o`/`0b` integers. A blank string is
/// `0`; anything else is `NaN`.
fn parse_numeric(s: &str) -> f64 {
    let trimmed = s.trim();
    match trimmed {
        "" => return 0.0,
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &trimmed[2..];
        if digits.is_empty() {
            return f64::NAN;
        }
        return digits
            .chars()
            .try_fold(0.0, |acc: f64, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            })
            .unwrap_or(f64::NAN);
    }

    // Rules out the `inf`/`nan` spellings the standard parser also accepts.
    if trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}
