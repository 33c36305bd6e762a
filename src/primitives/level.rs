//! Categorical level values.
//!
//! A `Level` is one category of a factor: either an integer code or a text
//! label. Levels are totally ordered (integers before text) so factor keys
//! can be sorted and deduplicated deterministically.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(feature = "std")]
use std::string::{String, ToString};

use core::fmt;
use num_traits::Float;

/// A single categorical value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Integer-coded category.
    Integer(i64),

    /// Text-labeled category.
    Text(String),
}

impl Level {
    /// Numeric value of an integer level, `None` for text.
    pub fn to_float<T: Float>(&self) -> Option<T> {
        match self {
            Level::Integer(i) => T::from(*i),
            Level::Text(_) => None,
        }
    }

    /// Convert a whole-valued float into an integer level.
    pub fn from_float<T: Float>(value: T) -> Option<Self> {
        if value.is_finite() && value.fract() == T::zero() {
            value.to_i64().map(Level::Integer)
        } else {
            None
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Integer(i) => write!(f, "{}", i),
            Level::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for Level {
    fn from(value: &str) -> Self {
        Level::Text(value.to_string())
    }
}

impl From<String> for Level {
    fn from(value: String) -> Self {
        Level::Text(value)
    }
}

impl From<i64> for Level {
    fn from(value: i64) -> Self {
        Level::Integer(value)
    }
}

impl From<i32> for Level {
    fn from(value: i32) -> Self {
        Level::Integer(i64::from(value))
    }
}
