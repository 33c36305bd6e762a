//! High-level API for realizing design matrices.
//!
//! ## Purpose
//!
//! This module provides the user-facing entry point for turning a formula
//! and a namespace into a labeled design matrix. It implements a fluent
//! builder for the evaluation parameters.
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Validated**: Parameters are validated when `.build()` is called.
//! * **Labeled**: The result carries column labels aligned with its columns.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`DesignBuilder`] via `Design::new()`.
//! 2. Chain configuration methods (`.row_count()`, `.keyword()`, etc.).
//! 3. Call `.build()` to obtain a validated [`DesignPlan`].
//! 4. Call `.realize(&formula, &namespace)` to obtain a [`DesignMatrix`].

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt;

// Internal dependencies
use crate::data::namespace::Namespace;
use crate::engine::validator::Validator;
use crate::formula::expression::Formula;
use crate::primitives::array::{Array, FormulaFloat};
use crate::primitives::keywords::Keywords;

// Publicly re-exported types
pub use crate::data::namespace::Entry;
pub use crate::data::registry::TermRegistry;
pub use crate::formula::nesting::is_nested;
pub use crate::primitives::errors::{ErrorKind, FormulaError};
pub use crate::primitives::level::Level;
pub use crate::terms::factor::{Factor, FactorValues};
pub use crate::terms::quantitative::{FuncQuant, Quantitative};
pub use crate::terms::term::{intercept, Term, TermName};

// ============================================================================
// Orientation
// ============================================================================

/// Layout of a realized design matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Observations as rows, model columns as columns.
    #[default]
    Observations,

    /// Model columns as rows, observations as columns.
    Columns,
}

// ============================================================================
// Design Builder
// ============================================================================

/// Fluent builder for design matrix evaluation parameters.
#[derive(Debug, Clone, Default)]
pub struct DesignBuilder {
    /// Number of observations for intercept-only formulas.
    pub row_count: Option<usize>,

    /// Extra keyword arguments passed to evaluators.
    pub keywords: Vec<(String, f64)>,

    /// Layout of the realized matrix.
    pub orientation: Option<Orientation>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl DesignBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of observations used when the formula holds only the
    /// intercept.
    pub fn row_count(mut self, n: usize) -> Self {
        if self.row_count.is_some() {
            self.duplicate_param = Some("row_count");
        }
        self.row_count = Some(n);
        self
    }

    /// Add a keyword argument forwarded to evaluators and callables.
    pub fn keyword(mut self, name: &str, value: f64) -> Self {
        self.keywords.push((name.to_string(), value));
        self
    }

    /// Set the layout of the realized matrix.
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        if self.orientation.is_some() {
            self.duplicate_param = Some("orientation");
        }
        self.orientation = Some(orientation);
        self
    }

    /// Validate the configuration.
    pub fn build(self) -> Result<DesignPlan, FormulaError> {
        Validator::validate_no_duplicates(self.duplicate_param)?;
        if let Some(n) = self.row_count {
            Validator::validate_row_count(n)?;
        }
        let mut keywords = Keywords::new();
        for (name, value) in &self.keywords {
            Validator::validate_keyword(name, *value)?;
            keywords.insert(name, *value);
        }
        Ok(DesignPlan {
            row_count: self.row_count,
            keywords,
            orientation: self.orientation.unwrap_or_default(),
        })
    }
}

// ============================================================================
// Design Plan
// ============================================================================

/// Validated evaluation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignPlan {
    row_count: Option<usize>,
    keywords: Keywords,
    orientation: Orientation,
}

impl DesignPlan {
    /// Configured row count.
    pub fn row_count(&self) -> Option<usize> {
        self.row_count
    }

    /// Keyword arguments.
    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Configured layout.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Evaluate `formula` against `namespace`.
    pub fn realize<T: FormulaFloat>(
        &self,
        formula: &Formula<T>,
        namespace: &Namespace<T>,
    ) -> Result<DesignMatrix<T>, FormulaError> {
        let columns = formula.evaluate(namespace, self.row_count, &self.keywords)?;
        let matrix = match self.orientation {
            Orientation::Observations => columns.transpose(),
            Orientation::Columns => columns,
        };
        Ok(DesignMatrix {
            names: formula.design_names(),
            matrix,
            orientation: self.orientation,
        })
    }
}

// ============================================================================
// Design Matrix
// ============================================================================

/// A realized, labeled design matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix<T> {
    /// Column labels, intercept first.
    pub names: Vec<String>,

    /// Matrix in the configured orientation.
    pub matrix: Array<T>,

    /// Layout of `matrix`.
    pub orientation: Orientation,
}

impl<T: FormulaFloat> DesignMatrix<T> {
    /// Number of observations.
    pub fn n_observations(&self) -> usize {
        match self.orientation {
            Orientation::Observations => self.matrix.nrows(),
            Orientation::Columns => self.matrix.ncols(),
        }
    }

    /// Number of model columns.
    pub fn n_columns(&self) -> usize {
        match self.orientation {
            Orientation::Observations => self.matrix.ncols(),
            Orientation::Columns => self.matrix.nrows(),
        }
    }

    /// Values of the model column labeled `name`.
    pub fn column(&self, name: &str) -> Option<Vec<T>> {
        let j = self.names.iter().position(|n| n == name)?;
        (0..self.n_observations())
            .map(|i| self.value(i, j))
            .collect()
    }

    /// Value for observation `i` and model column `j`.
    pub fn value(&self, i: usize, j: usize) -> Option<T> {
        match self.orientation {
            Orientation::Observations => self.matrix.get(i, j),
            Orientation::Columns => self.matrix.get(j, i),
        }
    }
}

impl<T: FormulaFloat> fmt::Display for DesignMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "  Observations: {}", self.n_observations())?;
        writeln!(f, "  Columns: {}", self.n_columns())?;
        writeln!(f)?;
        writeln!(f, "Design Matrix:")?;

        let width = self
            .names
            .iter()
            .map(String::len)
            .max()
            .unwrap_or(0)
            .max(10);
        write!(f, " ")?;
        for name in &self.names {
            write!(f, " {:>width$}", name, width = width)?;
        }
        writeln!(f)?;
        writeln!(f, "  {}", "-".repeat((width + 1) * self.names.len()))?;

        for i in 0..self.n_observations() {
            write!(f, " ")?;
            for j in 0..self.n_columns() {
                match self.value(i, j) {
                    Some(v) => write!(f, " {:>width$.4}", v, width = width)?,
                    None => write!(f, " {:>width$}", "", width = width)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
