//! Built-in column transforms for sqlframe
//!
//! Library callers can hand any closure to the column mapper. The command
//! line cannot, so it picks one of these named transforms instead.

use clap::ValueEnum;

use crate::error::{GlueError, GlueResult};
use crate::naming::sanitize;
use crate::value::Value;

/// A named value → value function usable with the column mapper
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transform {
    /// Natural log of (1 + x)
    Log1p,
    /// Natural log of x
    Ln,
    /// Absolute value
    Abs,
    /// Uppercase text
    Upper,
    /// Lowercase text
    Lower,
    /// Identifier-safe form of the text
    Sanitize,
}

impl Transform {
    pub fn apply(self, value: Value) -> GlueResult<Value> {
        match self {
            Transform::Log1p => numeric(&value, "log1p").map(|x| Value::Float(x.ln_1p())),
            Transform::Ln => numeric(&value, "ln").map(|x| Value::Float(x.ln())),
            Transform::Abs => match value {
                Value::Integer(i) => Ok(i
                    .checked_abs()
                    .map_or_else(|| Value::Float((i as f64).abs()), Value::Integer)),
                other => numeric(&other, "abs").map(|x| Value::Float(x.abs())),
            },
            Transform::Upper => text(value, |s| s.to_uppercase()),
            Transform::Lower => text(value, |s| s.to_lowercase()),
            Transform::Sanitize => text(value, sanitize),
        }
    }
}

fn numeric(value: &Value, name: &str) -> GlueResult<f64> {
    value.as_f64().ok_or_else(|| {
        GlueError::TypeError(format!("{} needs a number, got {} '{}'", name, value.kind(), value))
    })
}

fn text(value: Value, f: impl Fn(&str) -> String) -> GlueResult<Value> {
    match &value {
        Value::String(s) => Ok(Value::String(f(s))),
        Value::Integer(_) | Value::Float(_) => Ok(Value::String(f(&value.to_string()))),
        other => Err(GlueError::TypeError(format!(
            "text transform needs a string, got {}",
            other.kind()
        ))),
    }
}
