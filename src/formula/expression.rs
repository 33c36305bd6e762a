//! The `Formula` type: an ordered collection of terms.
//!
//! ## Purpose
//!
//! This module defines `Formula`, construction from terms, and the lookup
//! operations used to locate terms and their columns.
//!
//! ## Design notes
//!
//! * **Immutable**: Operators build new formulas; a formula never changes
//!   after construction, so column and term labels are cached eagerly.
//! * **Duplicates tolerated**: Termnames are not required to be unique;
//!   lookups return the first match.
//!
//! ## Invariants
//!
//! * `names()` is the concatenation of each term's `names()`, in term order.
//! * `termnames()` has one entry per term, in term order.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::primitives::errors::FormulaError;
use crate::terms::factor::Factor;
use crate::terms::quantitative::{FuncQuant, Quantitative};
use crate::terms::term::Term;

// ============================================================================
// Formula
// ============================================================================

/// An ordered collection of terms evaluating to a design matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula<T> {
    terms: Vec<Term<T>>,
    names: Vec<String>,
    termnames: Vec<String>,
}

impl<T> Default for Formula<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T> Formula<T> {
    /// Create a formula from a sequence of terms.
    pub fn new(terms: Vec<Term<T>>) -> Self {
        let names = terms.iter().flat_map(Term::names).collect();
        let termnames = terms.iter().map(|t| t.termname().to_string()).collect();
        Self {
            terms,
            names,
            termnames,
        }
    }

    /// Terms in order.
    #[inline]
    pub fn terms(&self) -> &[Term<T>] {
        &self.terms
    }

    /// Consume, returning the terms.
    pub fn into_terms(self) -> Vec<Term<T>> {
        self.terms
    }

    /// Iterate over the terms.
    pub fn iter(&self) -> core::slice::Iter<'_, Term<T>> {
        self.terms.iter()
    }

    /// Column labels of all terms, in the order of the evaluated rows.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// One label per term.
    #[inline]
    pub fn termnames(&self) -> &[String] {
        &self.termnames
    }

    /// Number of terms.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the formula has no terms.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Whether an intercept term is present.
    pub fn has_intercept(&self) -> bool {
        self.terms.iter().any(Term::is_intercept)
    }

    /// The only term, if the formula has exactly one.
    pub fn single_term(&self) -> Option<&Term<T>> {
        match self.terms.as_slice() {
            [term] => Some(term),
            _ => None,
        }
    }

    /// Whether a term with the same termname is present.
    pub fn has_term(&self, term: &Term<T>) -> bool {
        self.termnames.iter().any(|t| t == term.termname())
    }

    /// [`Formula::has_term`] for a single-term formula.
    ///
    /// Fails unless `other` has exactly one term.
    pub fn contains(&self, other: &Formula<T>) -> Result<bool, FormulaError> {
        Validator::validate_single_term(other.len())?;
        Ok(other.terms.iter().all(|t| self.has_term(t)))
    }

    /// Term with the given termname. The first match wins.
    pub fn term(&self, termname: &str) -> Result<&Term<T>, FormulaError> {
        self.termnames
            .iter()
            .position(|t| t == termname)
            .map(|i| &self.terms[i])
            .ok_or_else(|| FormulaError::TermNotFound(termname.to_string()))
    }

    /// Offsets of `term`'s columns within [`Formula::names`].
    ///
    /// Offsets follow the order of `term.names()`.
    pub fn term_columns(&self, term: &Term<T>) -> Result<Vec<usize>, FormulaError> {
        Ok(self
            .column_offsets(term)?
            .into_iter()
            .map(|(_, i)| i)
            .collect())
    }

    /// Map from each of `term`'s column labels to its offset within
    /// [`Formula::names`].
    pub fn term_column_map(&self, term: &Term<T>) -> Result<BTreeMap<String, usize>, FormulaError> {
        Ok(self.column_offsets(term)?.into_iter().collect())
    }

    fn column_offsets(&self, term: &Term<T>) -> Result<Vec<(String, usize)>, FormulaError> {
        if !self.has_term(term) {
            return Err(FormulaError::TermNotInFormula(term.termname().to_string()));
        }
        let mut offsets = Vec::new();
        for name in term.names() {
            match self.names.iter().position(|n| *n == name) {
                Some(i) => offsets.push((name, i)),
                None => return Err(FormulaError::TermNotInFormula(name)),
            }
        }
        Ok(offsets)
    }
}

impl<T> fmt::Display for Formula<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<formula: {}>", self.termnames.join(" + "))
    }
}

impl<'a, T> IntoIterator for &'a Formula<T> {
    type Item = &'a Term<T>;
    type IntoIter = core::slice::Iter<'a, Term<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl<T> From<Term<T>> for Formula<T> {
    fn from(term: Term<T>) -> Self {
        Self::new(vec![term])
    }
}

impl<T> From<Vec<Term<T>>> for Formula<T> {
    fn from(terms: Vec<Term<T>>) -> Self {
        Self::new(terms)
    }
}

impl<T> From<&Formula<T>> for Formula<T>
where
    T: Clone,
{
    fn from(formula: &Formula<T>) -> Self {
        formula.clone()
    }
}

impl<T> From<Factor<T>> for Formula<T> {
    fn from(factor: Factor<T>) -> Self {
        Self::from(factor.into_term())
    }
}

impl<T> From<Quantitative<T>> for Formula<T> {
    fn from(quant: Quantitative<T>) -> Self {
        Self::from(quant.into_term())
    }
}

impl<T> From<FuncQuant<T>> for Formula<T> {
    fn from(quant: FuncQuant<T>) -> Self {
        Self::from(quant.into_term())
    }
}
