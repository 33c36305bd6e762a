//! Input validation for terms, formulas and design configuration.
//!
//! ## Purpose
//!
//! This module provides the validation functions shared by every layer:
//! termnames, exponents, reference levels, row counts, keyword arguments
//! and builder parameters.
//!
//! ## Design notes
//!
//! * **Fail-Fast**: Validation stops at the first error encountered.
//! * **Stateless**: All checks are associated functions on a unit struct.
//!
//! ## Invariants
//!
//! * Validation logic is deterministic and side-effect free.
//!
//! ## Non-goals
//!
//! * This module does not correct invalid inputs.
//! * This module does not evaluate terms.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(feature = "std")]
use std::string::{String, ToString};

// External dependencies
use core::fmt::Debug;
use num_traits::{Float, ToPrimitive};

// Internal dependencies
use crate::primitives::errors::FormulaError;

// ============================================================================
// Validator
// ============================================================================

/// Validation utility for formula construction and evaluation.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Term Validation
    // ========================================================================

    /// Validate a termname: a single non-empty string.
    pub fn validate_termname(termname: &str) -> Result<(), FormulaError> {
        if termname.is_empty() {
            return Err(FormulaError::InvalidTermName(termname.to_string()));
        }
        Ok(())
    }

    /// Validate the column labels of a composite term.
    pub fn validate_column_names(names: &[String]) -> Result<(), FormulaError> {
        if let Some(name) = names.iter().find(|n| n.is_empty()) {
            return Err(FormulaError::InvalidTermName(name.clone()));
        }
        Ok(())
    }

    /// Validate and convert an exponent.
    pub fn validate_power<T: Float, P: ToPrimitive + Debug>(power: &P) -> Result<T, FormulaError> {
        match power.to_f64().and_then(T::from) {
            Some(p) if p.is_finite() => Ok(p),
            _ => Err(FormulaError::InvalidPower(format!("{:?}", power))),
        }
    }

    /// Validate a main-effect reference index against the number of columns.
    pub fn validate_reference(reference: usize, levels: usize) -> Result<(), FormulaError> {
        if reference >= levels {
            return Err(FormulaError::InvalidReference { reference, levels });
        }
        Ok(())
    }

    // ========================================================================
    // Formula Validation
    // ========================================================================

    /// Validate that a formula passed where one term is expected has
    /// exactly one term.
    pub fn validate_single_term(count: usize) -> Result<(), FormulaError> {
        if count != 1 {
            return Err(FormulaError::AmbiguousTerm { count });
        }
        Ok(())
    }

    /// Validate the row count of an intercept-only formula.
    pub fn validate_intercept_rows(row_count: Option<usize>) -> Result<usize, FormulaError> {
        match row_count {
            Some(n) if n >= 1 => Ok(n),
            _ => Err(FormulaError::MissingRowCount),
        }
    }

    /// Validate that two value sequences align.
    pub fn validate_same_length(left: usize, right: usize) -> Result<(), FormulaError> {
        if left != right {
            return Err(FormulaError::MismatchedLengths { left, right });
        }
        Ok(())
    }

    // ========================================================================
    // Parameter Validation
    // ========================================================================

    /// Validate an explicitly configured row count.
    pub fn validate_row_count(row_count: usize) -> Result<(), FormulaError> {
        if row_count == 0 {
            return Err(FormulaError::InvalidRowCount(row_count));
        }
        Ok(())
    }

    /// Validate a keyword argument.
    pub fn validate_keyword(name: &str, value: f64) -> Result<(), FormulaError> {
        if name.is_empty() || !value.is_finite() {
            return Err(FormulaError::InvalidKeyword(name.to_string()));
        }
        Ok(())
    }

    /// Validate that no parameters were set multiple times in the builder.
    pub fn validate_no_duplicates(duplicate_param: Option<&'static str>) -> Result<(), FormulaError> {
        if let Some(param) = duplicate_param {
            return Err(FormulaError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }
}
