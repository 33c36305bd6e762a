//! Error types for formula construction and evaluation.
//!
//! ## Purpose
//!
//! This module defines the single error type returned by every fallible
//! operation in the crate, from term construction through design matrix
//! assembly.
//!
//! ## Design notes
//!
//! * **Data-carrying**: Variants carry the offending names or sizes so the
//!   message can point at the exact term or variable.
//! * **Comparable**: `Clone + PartialEq` so tests can match on exact errors.
//! * **Taxonomy**: [`FormulaError::kind`] groups variants into broad
//!   categories (validation, lookup, domain, configuration, length).
//!
//! ## Non-goals
//!
//! * No retry or recovery semantics. Every error is a contract violation by
//!   the caller and is raised at the point of detection.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::vec::Vec;

use core::fmt;

// ============================================================================
// Error Kind
// ============================================================================

/// Broad category of a [`FormulaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed construction arguments.
    Validation,

    /// A term or variable name could not be resolved.
    NotFound,

    /// A categorical value lies outside the registered levels.
    Domain,

    /// Evaluation was configured without enough information to proceed.
    Configuration,

    /// Two sequences that must align have different lengths.
    LengthMismatch,
}

// ============================================================================
// Formula Error
// ============================================================================

/// Error type for formula operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// Termname is not a single, non-empty string.
    InvalidTermName(String),

    /// Exponent could not be converted to a finite float.
    InvalidPower(String),

    /// A single-term query was given a formula with `count` terms.
    AmbiguousTerm {
        /// Number of terms in the offending formula.
        count: usize,
    },

    /// Term is not part of the formula it was queried against.
    TermNotInFormula(String),

    /// Formula has no term with this termname.
    TermNotFound(String),

    /// Namespace has no entry with this name.
    UnknownVariable(String),

    /// Values outside the registered levels of a factor.
    UnknownLevels {
        /// Termname of the factor.
        factor: String,
        /// Offending values, rendered.
        levels: Vec<String>,
    },

    /// Categorical values were used where numbers are required.
    NonNumericValues(String),

    /// Formula entry whose evaluation leads back to its own name.
    RecursiveFormula(String),

    /// Main-effect reference index is out of range.
    InvalidReference {
        /// Requested reference index.
        reference: usize,
        /// Number of available columns.
        levels: usize,
    },

    /// Generic invalid input.
    InvalidInput(String),

    /// Array blocks could not be combined.
    ShapeMismatch {
        /// Expected extent along the combined axis.
        expected: usize,
        /// Extent that was found.
        got: usize,
    },

    /// Intercept-only formula evaluated without a row count.
    MissingRowCount,

    /// Row count of zero.
    InvalidRowCount(usize),

    /// Nesting test on sequences of unequal length.
    MismatchedLengths {
        /// Length of the first sequence.
        left: usize,
        /// Length of the second sequence.
        right: usize,
    },

    /// Keyword argument with an empty name or non-finite value.
    InvalidKeyword(String),

    /// Builder parameter set more than once.
    DuplicateParameter {
        /// Name of the parameter.
        parameter: &'static str,
    },
}

impl FormulaError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormulaError::TermNotFound(_) | FormulaError::UnknownVariable(_) => {
                ErrorKind::NotFound
            }
            FormulaError::UnknownLevels { .. } => ErrorKind::Domain,
            FormulaError::MissingRowCount | FormulaError::InvalidRowCount(_) => {
                ErrorKind::Configuration
            }
            FormulaError::MismatchedLengths { .. } => ErrorKind::LengthMismatch,
            _ => ErrorKind::Validation,
        }
    }
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::InvalidTermName(name) => {
                write!(f, "Invalid termname: {:?} (expecting a single non-empty string)", name)
            }
            FormulaError::InvalidPower(power) => {
                write!(f, "Invalid power: {} (expecting a finite float)", power)
            }
            FormulaError::AmbiguousTerm { count } => {
                write!(f, "Expected exactly one term, got a formula with {} terms", count)
            }
            FormulaError::TermNotInFormula(name) => write!(f, "Term not in formula: {}", name),
            FormulaError::TermNotFound(name) => write!(f, "Formula has no such term: {}", name),
            FormulaError::UnknownVariable(name) => {
                write!(f, "Namespace has no such variable: {}", name)
            }
            FormulaError::UnknownLevels { factor, levels } => {
                write!(f, "Unknown levels for factor '{}': ", factor)?;
                for (i, level) in levels.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", level)?;
                }
                Ok(())
            }
            FormulaError::NonNumericValues(name) => {
                write!(f, "Non-numeric values for variable: {}", name)
            }
            FormulaError::RecursiveFormula(name) => {
                write!(f, "Formula entry refers back to itself: {}", name)
            }
            FormulaError::InvalidReference { reference, levels } => write!(
                f,
                "Invalid reference: {} (must be less than {})",
                reference, levels
            ),
            FormulaError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FormulaError::ShapeMismatch { expected, got } => {
                write!(f, "Shape mismatch: expected {} columns, got {}", expected, got)
            }
            FormulaError::MissingRowCount => write!(
                f,
                "With only intercept in formula, a row count of at least 1 is needed"
            ),
            FormulaError::InvalidRowCount(n) => {
                write!(f, "Invalid row count: {} (must be at least 1)", n)
            }
            FormulaError::MismatchedLengths { left, right } => write!(
                f,
                "Length mismatch: first sequence has {} values, second has {}",
                left, right
            ),
            FormulaError::InvalidKeyword(name) => write!(f, "Invalid keyword: {:?}", name),
            FormulaError::DuplicateParameter { parameter } => write!(
                f,
                "Parameter '{}' was set multiple times. Each parameter can only be configured once.",
                parameter
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FormulaError {}
