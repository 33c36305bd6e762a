//! Evaluation of a formula into a design matrix.
//!
//! ## Purpose
//!
//! This module realizes a formula against a namespace: every term is
//! evaluated, the results are stacked row-wise, and the intercept row is
//! prepended when the formula contains one.
//!
//! ## Design notes
//!
//! * **Row blocks**: 1-D term values become single rows; 2-D values are
//!   stacked as they are.
//! * **Intercept**: Never evaluated inline. Its row is always the first row
//!   of the result, whatever the term's position in the formula.
//! * **Empty formulas**: Evaluate to an empty `0 x 0` matrix rather than an
//!   error.
//!
//! ## Invariants
//!
//! * All row blocks have the same number of columns (observations).
//! * The intercept row has the width of the other blocks. When the formula
//!   contains only the intercept it is `row_count` wide, or `nrow` wide when
//!   no row count is given.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

// Internal dependencies
use crate::data::namespace::Namespace;
use crate::engine::validator::Validator;
use crate::formula::expression::Formula;
use crate::primitives::array::{Array, FormulaFloat};
use crate::primitives::errors::FormulaError;
use crate::primitives::keywords::{Keywords, NROW};
use crate::terms::term::{Term, INTERCEPT};

impl<T: FormulaFloat> Formula<T> {
    /// Evaluate to a matrix with one row per design column and one column
    /// per observation.
    ///
    /// `row_count` is only consulted when the intercept is the sole term;
    /// without it the `nrow` keyword is used.
    pub fn evaluate(
        &self,
        namespace: &Namespace<T>,
        row_count: Option<usize>,
        keywords: &Keywords,
    ) -> Result<Array<T>, FormulaError> {
        let mut blocks = Vec::with_capacity(self.len());
        let mut intercept = false;
        for term in self.iter() {
            if term.is_intercept() {
                intercept = true;
                continue;
            }
            blocks.push(term.evaluate_rows(namespace, keywords)?);
        }

        if !intercept {
            return Array::concatenate_rows(&blocks);
        }

        if blocks.is_empty() {
            let n = Validator::validate_intercept_rows(
                row_count.or_else(|| keywords.get_count(NROW)),
            )?;
            return Ok(Array::ones(&[1, n]));
        }

        let body = Array::concatenate_rows(&blocks)?;
        let ones = Array::ones(&[1, body.ncols()]);
        Array::concatenate_rows(&[ones, body])
    }

    /// Design matrix: observations as rows, model columns as columns.
    ///
    /// The transpose of [`Formula::evaluate`].
    pub fn design(
        &self,
        namespace: &Namespace<T>,
        row_count: Option<usize>,
        keywords: &Keywords,
    ) -> Result<Array<T>, FormulaError> {
        Ok(self.evaluate(namespace, row_count, keywords)?.transpose())
    }
}

impl<T> Formula<T> {
    /// Column labels in the order [`Formula::evaluate`] produces rows.
    ///
    /// Same as [`Formula::names`] except that the intercept comes first.
    pub fn design_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.names().len());
        if self.has_intercept() {
            names.push(INTERCEPT.to_string());
        }
        names.extend(
            self.iter()
                .filter(|t| !t.is_intercept())
                .flat_map(Term::names),
        );
        names
    }
}
