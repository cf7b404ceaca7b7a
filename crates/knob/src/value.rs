use derive_more::{Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pointer position along the tracked axis, in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, Deref, From, Into)]
pub struct MouseInput(i32);

crate::impl_scalar_newtype!(MouseInput, i32);

/// Position in the continuous space a slider is dragged through. Never leaves the tracking loop.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Display, Deref, From, Into)]
pub struct Interpreted(f64);

crate::impl_scalar_newtype!(Interpreted, f64);

/// A value understood by a [`Controller`](crate::controller::Controller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Number(f64),
    Text(String),
}

impl Value {
    /// Reads command output or user text, preferring a number when the text is one.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        raw.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Value::Number)
            .unwrap_or_else(|| Value::Text(raw.to_string()))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}
