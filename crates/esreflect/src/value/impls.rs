//! Value constructors, extractors, coercions and From traits

use super::*;
use crate::error::{type_name, EvalError};

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// Create a number value
    pub fn number(n: impl Into<f64>) -> Self {
        Value::Number(n.into())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is `null`
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Get the number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the nested namespace, if this is one
    pub fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            Value::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Coercions
    // ═══════════════════════════════════════════════════════════════════

    /// Numeric coercion as the arithmetic operators perform it.
    ///
    /// `null` is `0`, booleans are `0`/`1`, strings are parsed (blank is
    /// `0`, garbage is `NaN`). Namespaces have no numeric value.
    pub fn to_number(&self, operator: &str) -> Result<f64, EvalError> {
        match self {
            Value::Null => Ok(0.0),
            Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
            Value::Number(n) => Ok(*n),
            Value::String(s) => Ok(string_to_number(s)),
            Value::Namespace(_) => Err(EvalError::InvalidOperand {
                operator: operator.to_string(),
                operand_type: type_name(self),
            }),
        }
    }

    /// String used when this value names a property in a computed member
    /// access such as `a[0]` or `a["b"]`.
    pub fn to_property_key(&self) -> Result<String, EvalError> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Namespace(_) => Err(EvalError::InvalidOperand {
                operator: "[]".to_string(),
                operand_type: type_name(self),
            }),
            other => Ok(other.to_string()),
        }
    }
}

/// Parse a string the way the language's `Number(s)` does.
fn string_to_number(s: &str) -> f64 {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match trimmed.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&trimmed[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust also accepts "inf" and "nan", which the language does not.
    let decimal = trimmed
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'));
    if !decimal {
        return f64::NAN;
    }
    trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

// ═══════════════════════════════════════════════════════════════════
// From Traits
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Namespace> for Value {
    fn from(ns: Namespace) -> Self {
        Value::Namespace(ns)
    }
}
