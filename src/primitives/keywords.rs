//! Extra keyword arguments forwarded to evaluators.
//!
//! Evaluation of terms and formulas threads a `Keywords` map through every
//! derived term, custom evaluator and namespace callable. The only keyword
//! the crate itself interprets is [`NROW`], the width of a standalone
//! intercept row.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::string::{String, ToString};

/// Keyword holding the number of observations for a standalone intercept.
pub const NROW: &str = "nrow";

/// Named numeric keyword arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keywords {
    values: BTreeMap<String, f64>,
}

impl Keywords {
    /// Create an empty keyword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a keyword, builder style.
    pub fn with(mut self, name: &str, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Add or replace a keyword, returning the previous value.
    pub fn insert(&mut self, name: &str, value: f64) -> Option<f64> {
        self.values.insert(name.to_string(), value)
    }

    /// Look up a keyword.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Look up a keyword as a non-negative integer count.
    pub fn get_count(&self, name: &str) -> Option<usize> {
        self.get(name)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as usize)
    }

    /// Iterate over `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keywords are set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
