//! Categorical factors.
//!
//! ## Purpose
//!
//! This module provides `Factor`, a term encoding a categorical variable
//! either as one indicator row per level or as a single row of ordinal
//! indices, together with dummy-coded main effects.
//!
//! ## Design notes
//!
//! * **Sorted keys**: Levels are deduplicated and sorted at construction, so
//!   column order never depends on the order keys were supplied in.
//! * **Verified encoding**: Source values are checked against the keys before
//!   encoding; unknown values are a domain error.
//! * **Deref**: A `Factor` dereferences to its underlying [`Term`].
//!
//! ## Key concepts
//!
//! * **Indicator coding**: Row `k` holds `1.0` where the observation equals
//!   key `k`, `0.0` elsewhere. Column labels are `(termname==key)`.
//! * **Ordinal coding**: One row holding each observation's key index.
//! * **Main effect**: Indicator rows minus a reference row, reference dropped.
//!
//! ## Non-goals
//!
//! * Contrast schemes other than reference (treatment) coding.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::BTreeSet;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Add, Deref, Mul};

// Internal dependencies
use crate::data::namespace::Namespace;
use crate::engine::validator::Validator;
use crate::formula::expression::Formula;
use crate::primitives::array::{Array, FormulaFloat};
use crate::primitives::errors::FormulaError;
use crate::primitives::keywords::Keywords;
use crate::primitives::level::Level;
use crate::terms::term::{Derivation, Term, TermName, TermSource};

/// Check that every value is one of `keys` (sorted).
pub fn verify_levels(factor: &str, keys: &[Level], values: &[Level]) -> Result<(), FormulaError> {
    let unknown: BTreeSet<&Level> = values
        .iter()
        .filter(|v| keys.binary_search(*v).is_err())
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }
    Err(FormulaError::UnknownLevels {
        factor: factor.to_string(),
        levels: unknown.into_iter().map(ToString::to_string).collect(),
    })
}

// ============================================================================
// Factor Values
// ============================================================================

/// Result of [`Factor::evaluate_values`].
#[derive(Debug, Clone, PartialEq)]
pub enum FactorValues<T> {
    /// Encoded design rows.
    Encoded(Array<T>),

    /// Raw category labels.
    Levels(Vec<Level>),
}

// ============================================================================
// Factor
// ============================================================================

/// A categorical term.
#[derive(Debug, Clone, PartialEq)]
pub struct Factor<T> {
    term: Term<T>,
    keys: Arc<[Level]>,
    ordinal: bool,
}

impl<T: FormulaFloat> Factor<T> {
    /// Create a factor over the given levels.
    ///
    /// Keys are deduplicated and sorted.
    pub fn new<I>(termname: &str, keys: I, ordinal: bool) -> Result<Self, FormulaError>
    where
        I: IntoIterator,
        I::Item: Into<Level>,
    {
        Validator::validate_termname(termname)?;
        let keys: Arc<[Level]> = keys
            .into_iter()
            .map(Into::into)
            .collect::<BTreeSet<Level>>()
            .into_iter()
            .collect();

        let term = if ordinal {
            Term::from_parts(
                TermName::from(termname),
                Some(termname),
                TermSource::Derived(Derivation::Ordinal { keys: keys.clone() }),
            )?
        } else {
            let names: Vec<String> = keys
                .iter()
                .map(|key| format!("({}=={})", termname, key))
                .collect();
            Term::from_parts(
                TermName::Composite(names),
                Some(termname),
                TermSource::Derived(Derivation::Indicator { keys: keys.clone() }),
            )?
        };

        Ok(Self {
            term,
            keys,
            ordinal,
        })
    }

    /// Raw category labels of the source variable.
    pub fn values(
        &self,
        namespace: &Namespace<T>,
        keywords: &Keywords,
    ) -> Result<Vec<Level>, FormulaError> {
        namespace.levels(self.term.termname(), keywords)
    }

    /// Encoded design rows (indicator matrix or ordinal index row).
    pub fn evaluate(
        &self,
        namespace: &Namespace<T>,
        keywords: &Keywords,
    ) -> Result<Array<T>, FormulaError> {
        self.term.evaluate(namespace, keywords)
    }

    /// Either the raw labels (`values == true`) or the encoded rows.
    pub fn evaluate_values(
        &self,
        namespace: &Namespace<T>,
        values: bool,
        keywords: &Keywords,
    ) -> Result<FactorValues<T>, FormulaError> {
        if values {
            self.values(namespace, keywords).map(FactorValues::Levels)
        } else {
            self.evaluate(namespace, keywords).map(FactorValues::Encoded)
        }
    }

    /// Fail if any value is not a registered level.
    pub fn verify(&self, values: &[Level]) -> Result<(), FormulaError> {
        verify_levels(self.term.termname(), &self.keys, values)
    }

    /// Dummy-coded main effect with column `reference` (default 0) dropped.
    ///
    /// Each remaining column is labeled `<column>-<reference column>` and
    /// evaluates to that indicator row minus the reference row.
    pub fn main_effect(&self, reference: Option<usize>) -> Result<Term<T>, FormulaError> {
        if self.ordinal {
            return Err(FormulaError::InvalidInput(format!(
                "main effect requires indicator coding, factor '{}' is ordinal",
                self.term.termname()
            )));
        }
        let names = self.term.names();
        let reference = reference.unwrap_or(0);
        Validator::validate_reference(reference, names.len())?;

        let columns: Vec<String> = names
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != reference)
            .map(|(_, name)| format!("{}-{}", name, names[reference]))
            .collect();

        let termname = format!("{}:maineffect", self.term.termname());
        Term::from_parts(
            TermName::Composite(columns),
            Some(&termname),
            TermSource::Derived(Derivation::MainEffect {
                factor: Arc::new(self.term.clone()),
                reference,
            }),
        )
    }
}

impl<T> Factor<T> {
    /// Sorted levels.
    #[inline]
    pub fn keys(&self) -> &[Level] {
        &self.keys
    }

    /// Whether the factor uses ordinal coding.
    #[inline]
    pub fn is_ordinal(&self) -> bool {
        self.ordinal
    }

    /// Underlying term.
    #[inline]
    pub fn as_term(&self) -> &Term<T> {
        &self.term
    }

    /// Consume the factor, returning its term.
    pub fn into_term(self) -> Term<T> {
        self.term
    }
}

impl<T> Deref for Factor<T> {
    type Target = Term<T>;

    fn deref(&self) -> &Term<T> {
        &self.term
    }
}

impl<T> From<Factor<T>> for Term<T> {
    fn from(factor: Factor<T>) -> Self {
        factor.term
    }
}

// ============================================================================
// Operators
// ============================================================================

impl<T: FormulaFloat, R: Into<Formula<T>>> Add<R> for Factor<T> {
    type Output = Formula<T>;

    /// Adding the intercept to a factor returns the factor alone.
    fn add(self, other: R) -> Formula<T> {
        let other = other.into();
        if other.single_term().is_some_and(Term::is_intercept) {
            return Formula::from(self.term);
        }
        self.term + other
    }
}

impl<T: FormulaFloat, R: Into<Formula<T>>> Mul<R> for Factor<T> {
    type Output = Formula<T>;

    fn mul(self, other: R) -> Formula<T> {
        self.term * other
    }
}
