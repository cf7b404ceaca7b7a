use crate::value::{Interpreted, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration form of the values a slider cycles through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Domain {
    // before `Range`, which would also accept a two-element sequence
    List(Vec<Value>),
    Range { min: f64, max: f64 },
}

#[derive(Debug, Error, PartialEq)]
pub enum SliderError {
    #[error("unsupported slider domain: {0}")]
    UnsupportedDomain(String),
    #[error("pixels_in_unit must be a positive number, got {0}")]
    InvalidScale(f64),
    #[error("sleep time between samples must not be zero")]
    ZeroSleepTime,
}

/// Converts between interpreted values and the values a controller accepts.
///
/// Behaves like a container of controller values: [`SliderValues::at`] fetches one by
/// interpreted position and [`SliderValues::index`] finds the position of one. Lookups outside
/// the valid range never fail, they fall back to a default.
#[derive(Debug, Clone, PartialEq)]
pub enum SliderValues {
    Range(RangeValues),
    List(ListValues),
}

impl SliderValues {
    pub fn new(domain: Domain) -> Result<Self, SliderError> {
        match domain {
            Domain::Range { min, max } => RangeValues::new(min, max).map(Self::Range),
            Domain::List(items) => ListValues::new(items).map(Self::List),
        }
    }

    pub fn min(&self) -> Interpreted {
        match self {
            Self::Range(range) => range.min(),
            Self::List(list) => list.min(),
        }
    }

    pub fn max(&self) -> Interpreted {
        match self {
            Self::Range(range) => range.max(),
            Self::List(list) => list.max(),
        }
    }

    pub fn at(&self, value: Interpreted) -> Value {
        match self {
            Self::Range(range) => range.at(value),
            Self::List(list) => list.at(value),
        }
    }

    pub fn index(&self, value: &Value) -> Interpreted {
        match self {
            Self::Range(range) => range.index(value),
            Self::List(list) => list.index(value),
        }
    }
}

/// Numeric range; interpreted and controlled values coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeValues {
    min: f64,
    max: f64,
}

impl RangeValues {
    pub fn new(min: f64, max: f64) -> Result<Self, SliderError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SliderError::UnsupportedDomain(format!(
                "range bounds must be finite, got {min}..{max}"
            )));
        }
        if min > max {
            return Err(SliderError::UnsupportedDomain(format!(
                "range min {min} is above max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Interpreted {
        Interpreted::new(self.min)
    }

    pub fn max(&self) -> Interpreted {
        Interpreted::new(self.max)
    }

    fn default(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn at(&self, value: Interpreted) -> Value {
        if self.contains(*value) {
            Value::Number(*value)
        } else {
            Value::Number(self.default())
        }
    }

    pub fn index(&self, value: &Value) -> Interpreted {
        match value.as_number() {
            Some(n) if self.contains(n) => Interpreted::new(n),
            _ => Interpreted::new(self.default()),
        }
    }
}

/// Ordered list of values, addressed by rounding the interpreted value to an index.
///
/// `min` and `max` leave a 0.01 margin around the rounding boundary, so every position gets
/// an equally wide catchment and no value in range rounds outside the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListValues {
    items: Vec<Value>,
}

const LIST_MIN: f64 = -0.49;
const LIST_DEFAULT: usize = 0;

impl ListValues {
    pub fn new(items: Vec<Value>) -> Result<Self, SliderError> {
        if items.is_empty() {
            return Err(SliderError::UnsupportedDomain(
                "value list is empty".to_string(),
            ));
        }
        Ok(Self { items })
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn min(&self) -> Interpreted {
        Interpreted::new(LIST_MIN)
    }

    pub fn max(&self) -> Interpreted {
        Interpreted::new(self.items.len() as f64 - 0.51)
    }

    pub fn at(&self, value: Interpreted) -> Value {
        let index = if (*self.min()..=*self.max()).contains(&*value) {
            value.round() as usize
        } else {
            LIST_DEFAULT
        };
        self.items[index].clone()
    }

    pub fn index(&self, value: &Value) -> Interpreted {
        let position = self
            .items
            .iter()
            .position(|item| item == value)
            .unwrap_or(LIST_DEFAULT);
        Interpreted::new(position as f64)
    }
}
