//! Named model terms and their lazy evaluation.
//!
//! ## Purpose
//!
//! This module defines `Term`, the atomic building block of a formula: a
//! named quantity contributing one or more columns to a design matrix. A term
//! is evaluated on demand against a caller-supplied namespace.
//!
//! ## Design notes
//!
//! * **Tagged names**: [`TermName`] distinguishes the intercept, single-column
//!   terms and multi-column terms, so intercept absorption dispatches on the
//!   tag rather than on string comparison.
//! * **Explicit sources**: [`TermSource`] is either a direct namespace lookup
//!   or a [`Derivation`]. Each derivation stores the terms and constants it
//!   depends on as immutable fields; nothing is captured implicitly.
//! * **Cheap clones**: Nested terms and user functions sit behind `Arc`.
//!
//! ## Key concepts
//!
//! * **Lookup**: `namespace[termname]`, recursing into formulas and invoking
//!   callables with the keyword arguments.
//! * **Squeeze**: Evaluated values drop their length-1 dimensions.
//!
//! ## Invariants
//!
//! * `termname` is a single non-empty string.
//! * For a 2-D value, `names().len()` equals its number of rows.
//!
//! ## Non-goals
//!
//! * Terms do not enforce termname uniqueness; formulas tolerate duplicates.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::cmp::Ordering;
use core::fmt;
use core::ops::{Add, Mul};

// Internal dependencies
use crate::data::namespace::Namespace;
use crate::engine::validator::Validator;
use crate::formula::expression::Formula;
use crate::primitives::array::{Array, FormulaFloat};
use crate::primitives::errors::FormulaError;
use crate::primitives::keywords::{Keywords, NROW};
use crate::primitives::level::Level;
use crate::terms::factor::verify_levels;

/// Termname of the intercept.
pub const INTERCEPT: &str = "intercept";

/// User-supplied evaluator for a derived term.
pub type Evaluator<T> =
    Arc<dyn Fn(&Namespace<T>, &Keywords) -> Result<Array<T>, FormulaError> + Send + Sync>;

/// Whole-array transform applied by function-of-term derivations.
pub type TermFn<T> = Arc<dyn Fn(&Array<T>) -> Array<T> + Send + Sync>;

// ============================================================================
// Term Name
// ============================================================================

/// Column naming of a term.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TermName {
    /// The reserved constant column.
    Intercept,

    /// A single column.
    Plain(String),

    /// One label per column, e.g. an encoded factor or an interaction.
    Composite(Vec<String>),
}

impl TermName {
    /// Column labels, one per output row.
    pub fn names(&self) -> Vec<String> {
        match self {
            TermName::Intercept => vec![INTERCEPT.to_string()],
            TermName::Plain(name) => vec![name.clone()],
            TermName::Composite(names) => names.clone(),
        }
    }

    /// Whether this is the intercept tag.
    #[inline]
    pub fn is_intercept(&self) -> bool {
        matches!(self, TermName::Intercept)
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        match self {
            TermName::Composite(names) => names.len(),
            _ => 1,
        }
    }

    /// Single label, `None` for composite names.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            TermName::Intercept => Some(INTERCEPT),
            TermName::Plain(name) => Some(name),
            TermName::Composite(_) => None,
        }
    }

    /// Ordering used when a sum of formulas is canonicalized.
    ///
    /// Composite names sort before single names; within each group names
    /// compare lexicographically.
    pub fn canonical_cmp(&self, other: &TermName) -> Ordering {
        match (self.as_single(), other.as_single()) {
            (Some(a), Some(b)) => a.cmp(b),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => self.names().cmp(&other.names()),
        }
    }
}

impl From<&str> for TermName {
    fn from(name: &str) -> Self {
        TermName::Plain(name.to_string())
    }
}

impl From<String> for TermName {
    fn from(name: String) -> Self {
        TermName::Plain(name)
    }
}

impl From<Vec<String>> for TermName {
    fn from(names: Vec<String>) -> Self {
        TermName::Composite(names)
    }
}

impl From<Vec<&str>> for TermName {
    fn from(names: Vec<&str>) -> Self {
        TermName::Composite(names.into_iter().map(str::to_string).collect())
    }
}

// ============================================================================
// Derivation
// ============================================================================

/// How a derived term computes its values.
#[derive(Clone)]
pub enum Derivation<T> {
    /// A row of ones, `nrow` keyword wide.
    Intercept,

    /// One indicator row per key over the categorical values named by the
    /// term's termname.
    Indicator {
        /// Sorted, deduplicated levels.
        keys: Arc<[Level]>,
    },

    /// Index of each observation within the sorted keys.
    Ordinal {
        /// Sorted, deduplicated levels.
        keys: Arc<[Level]>,
    },

    /// Indicator rows minus the reference row, reference row dropped.
    MainEffect {
        /// Indicator-coded factor term.
        factor: Arc<Term<T>>,
        /// Index of the reference column.
        reference: usize,
    },

    /// Element-wise power of another term.
    Power {
        /// Term being raised.
        base: Arc<Term<T>>,
        /// Exponent.
        exponent: T,
    },

    /// Function applied to the raw values of another term.
    Function {
        /// Term whose raw namespace values are transformed.
        source: Arc<Term<T>>,
        /// Transform.
        func: TermFn<T>,
        /// Name of the transform.
        label: String,
    },

    /// Pairwise row products of two terms.
    Interaction {
        /// Left operand.
        left: Arc<Term<T>>,
        /// Right operand.
        right: Arc<Term<T>>,
    },

    /// Arbitrary evaluator.
    Custom(Evaluator<T>),
}

impl<T: FormulaFloat> Derivation<T> {
    fn evaluate(
        &self,
        term: &Term<T>,
        namespace: &Namespace<T>,
        keywords: &Keywords,
    ) -> Result<Array<T>, FormulaError> {
        match self {
            Derivation::Intercept => {
                let nrow = keywords.get_count(NROW).unwrap_or(1);
                Ok(Array::ones(&[1, nrow]))
            }
            Derivation::Indicator { keys } => {
                let values = namespace.levels(&term.termname, keywords)?;
                verify_levels(&term.termname, keys, &values)?;
                let mut data = Vec::with_capacity(keys.len() * values.len());
                for key in keys.iter() {
                    data.extend(values.iter().map(|v| if v == key { T::one() } else { T::zero() }));
                }
                Array::from_shape_vec(&[keys.len(), values.len()], data)
            }
            Derivation::Ordinal { keys } => {
                let values = namespace.levels(&term.termname, keywords)?;
                verify_levels(&term.termname, keys, &values)?;
                let column = values
                    .iter()
                    .map(|v| {
                        let index = keys.binary_search(v).unwrap_or_else(|pos| pos);
                        T::from(index).unwrap_or_else(T::nan)
                    })
                    .collect();
                Ok(Array::from_vec(column))
            }
            Derivation::MainEffect { factor, reference } => {
                let value = factor.evaluate_rows(namespace, keywords)?;
                Validator::validate_reference(*reference, value.nrows())?;
                let base = value.row(*reference);
                let mut data = Vec::with_capacity(value.len());
                let kept = value
                    .rows()
                    .enumerate()
                    .filter(|(i, _)| i != reference)
                    .map(|(_, row)| row);
                for row in kept {
                    data.extend(row.iter().zip(base).map(|(&v, &r)| v - r));
                }
                Array::from_shape_vec(&[value.nrows() - 1, value.ncols()], data)
            }
            Derivation::Power { base, exponent } => {
                Ok(base.evaluate(namespace, keywords)?.powf(*exponent))
            }
            Derivation::Function { source, func, .. } => {
                let raw = source.evaluate_with(namespace, false, keywords)?;
                Ok(func(&raw))
            }
            Derivation::Interaction { left, right } => {
                let lhs = left.evaluate_rows(namespace, keywords)?;
                let rhs = right.evaluate_rows(namespace, keywords)?;
                if lhs.ncols() != rhs.ncols() {
                    return Err(FormulaError::ShapeMismatch {
                        expected: lhs.ncols(),
                        got: rhs.ncols(),
                    });
                }
                let mut data = Vec::with_capacity(lhs.nrows() * rhs.len());
                for l in lhs.rows() {
                    for r in rhs.rows() {
                        data.extend(l.iter().zip(r).map(|(&a, &b)| a * b));
                    }
                }
                Array::from_shape_vec(&[lhs.nrows() * rhs.nrows(), lhs.ncols()], data)
            }
            Derivation::Custom(evaluator) => evaluator(namespace, keywords),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Derivation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Derivation::Intercept => f.write_str("Intercept"),
            Derivation::Indicator { keys } => {
                f.debug_struct("Indicator").field("keys", keys).finish()
            }
            Derivation::Ordinal { keys } => f.debug_struct("Ordinal").field("keys", keys).finish(),
            Derivation::MainEffect { factor, reference } => f
                .debug_struct("MainEffect")
                .field("factor", &factor.termname)
                .field("reference", reference)
                .finish(),
            Derivation::Power { base, exponent } => f
                .debug_struct("Power")
                .field("base", &base.termname)
                .field("exponent", exponent)
                .finish(),
            Derivation::Function { source, label, .. } => f
                .debug_struct("Function")
                .field("source", &source.termname)
                .field("label", label)
                .finish_non_exhaustive(),
            Derivation::Interaction { left, right } => f
                .debug_struct("Interaction")
                .field("left", &left.termname)
                .field("right", &right.termname)
                .finish(),
            Derivation::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<T: PartialEq> PartialEq for Derivation<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Derivation::Intercept, Derivation::Intercept) => true,
            (Derivation::Indicator { keys: a }, Derivation::Indicator { keys: b })
            | (Derivation::Ordinal { keys: a }, Derivation::Ordinal { keys: b }) => a == b,
            (
                Derivation::MainEffect {
                    factor: fa,
                    reference: ra,
                },
                Derivation::MainEffect {
                    factor: fb,
                    reference: rb,
                },
            ) => ra == rb && fa == fb,
            (
                Derivation::Power {
                    base: ba,
                    exponent: ea,
                },
                Derivation::Power {
                    base: bb,
                    exponent: eb,
                },
            ) => ea == eb && ba == bb,
            (
                Derivation::Function {
                    source: sa,
                    func: fa,
                    label: la,
                },
                Derivation::Function {
                    source: sb,
                    func: fb,
                    label: lb,
                },
            ) => la == lb && Arc::ptr_eq(fa, fb) && sa == sb,
            (
                Derivation::Interaction {
                    left: la,
                    right: ra,
                },
                Derivation::Interaction {
                    left: lb,
                    right: rb,
                },
            ) => la == lb && ra == rb,
            (Derivation::Custom(a), Derivation::Custom(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

// ============================================================================
// Term
// ============================================================================

/// Where a term's values come from.
#[derive(Debug, Clone, PartialEq)]
pub enum TermSource<T> {
    /// `namespace[termname]`.
    Lookup,

    /// Computed by a derivation.
    Derived(Derivation<T>),
}

/// A named, lazily evaluated quantity in a model formula.
#[derive(Debug, Clone, PartialEq)]
pub struct Term<T> {
    pub(crate) name: TermName,
    pub(crate) termname: String,
    pub(crate) source: TermSource<T>,
}

/// The intercept term.
pub fn intercept<T>() -> Term<T> {
    Term {
        name: TermName::Intercept,
        termname: INTERCEPT.to_string(),
        source: TermSource::Derived(Derivation::Intercept),
    }
}

impl<T: FormulaFloat> Term<T> {
    /// Create a single-column term evaluated by namespace lookup.
    pub fn new(name: &str) -> Result<Self, FormulaError> {
        Self::from_parts(TermName::from(name), None, TermSource::Lookup)
    }

    /// Create a term computed by `evaluator`.
    ///
    /// A composite `name` requires an explicit `termname`.
    pub fn derived<N, F>(name: N, termname: Option<&str>, evaluator: F) -> Result<Self, FormulaError>
    where
        N: Into<TermName>,
        F: Fn(&Namespace<T>, &Keywords) -> Result<Array<T>, FormulaError> + Send + Sync + 'static,
    {
        Self::from_parts(
            name.into(),
            termname,
            TermSource::Derived(Derivation::Custom(Arc::new(evaluator))),
        )
    }

    /// Create a term from its parts, validating the termname.
    ///
    /// When `termname` is `None` it defaults to the single name; composite
    /// names have no default and are rejected.
    pub fn from_parts(
        name: TermName,
        termname: Option<&str>,
        source: TermSource<T>,
    ) -> Result<Self, FormulaError> {
        if let TermName::Composite(names) = &name {
            Validator::validate_column_names(names)?;
        }
        let termname = match (termname, name.as_single()) {
            (Some(termname), _) | (None, Some(termname)) => termname.to_string(),
            (None, None) => return Err(FormulaError::InvalidTermName(name.names().join(", "))),
        };
        Validator::validate_termname(&termname)?;
        Ok(Self {
            name,
            termname,
            source,
        })
    }

    /// Evaluate the term, using its derivation when it has one.
    pub fn evaluate(
        &self,
        namespace: &Namespace<T>,
        keywords: &Keywords,
    ) -> Result<Array<T>, FormulaError> {
        self.evaluate_with(namespace, true, keywords)
    }

    /// Evaluate the term.
    ///
    /// With `use_evaluator == false` the derivation is bypassed and the raw
    /// namespace entry under the termname is returned.
    pub fn evaluate_with(
        &self,
        namespace: &Namespace<T>,
        use_evaluator: bool,
        keywords: &Keywords,
    ) -> Result<Array<T>, FormulaError> {
        let value = match (&self.source, use_evaluator) {
            (TermSource::Derived(derivation), true) => {
                derivation.evaluate(self, namespace, keywords)?
            }
            _ => namespace.resolve(&self.termname, keywords)?,
        };
        Ok(value.squeeze())
    }

    /// Evaluate as a matrix with one row per name.
    ///
    /// Undoes the squeeze of a single observation, which would otherwise
    /// leave a multi-column term as a one-row matrix.
    pub(crate) fn evaluate_rows(
        &self,
        namespace: &Namespace<T>,
        keywords: &Keywords,
    ) -> Result<Array<T>, FormulaError> {
        let value = self.evaluate(namespace, keywords)?;
        let width = self.name.width();
        if width > 1 && value.ndim() < 2 {
            let n = value.len() / width;
            return Array::from_shape_vec(&[width, n], value.into_vec());
        }
        Ok(value.into_matrix())
    }

    /// Exponent of a power term.
    pub fn power(&self) -> Option<T> {
        match &self.source {
            TermSource::Derived(Derivation::Power { exponent, .. }) => Some(*exponent),
            _ => None,
        }
    }
}

impl<T> Term<T> {
    /// Column naming of the term.
    #[inline]
    pub fn name(&self) -> &TermName {
        &self.name
    }

    /// Label of the term inside a formula.
    #[inline]
    pub fn termname(&self) -> &str {
        &self.termname
    }

    /// Source of the term's values.
    #[inline]
    pub fn source(&self) -> &TermSource<T> {
        &self.source
    }

    /// Column labels, `names().len()` columns in the design.
    pub fn names(&self) -> Vec<String> {
        self.name.names()
    }

    /// Whether this is the intercept.
    #[inline]
    pub fn is_intercept(&self) -> bool {
        self.name.is_intercept()
    }

    /// Single label used when deriving names from this term.
    pub(crate) fn label(&self) -> &str {
        self.name.as_single().unwrap_or(&self.termname)
    }

    /// Namespace entries read when the term is evaluated.
    ///
    /// Custom evaluators are opaque and contribute nothing.
    pub(crate) fn lookups(&self) -> Vec<&str> {
        match &self.source {
            TermSource::Lookup => vec![self.termname.as_str()],
            TermSource::Derived(derivation) => match derivation {
                Derivation::Intercept | Derivation::Custom(_) => Vec::new(),
                Derivation::Indicator { .. } | Derivation::Ordinal { .. } => {
                    vec![self.termname.as_str()]
                }
                Derivation::MainEffect { factor, .. } => factor.lookups(),
                Derivation::Power { base, .. } => base.lookups(),
                Derivation::Function { source, .. } => vec![source.termname.as_str()],
                Derivation::Interaction { left, right } => {
                    let mut names = left.lookups();
                    names.extend(right.lookups());
                    names
                }
            },
        }
    }
}

impl<T> fmt::Display for Term<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<term: {}>", self.termname)
    }
}

// ============================================================================
// Operators
// ============================================================================

impl<T: FormulaFloat, R: Into<Formula<T>>> Add<R> for Term<T> {
    type Output = Formula<T>;

    /// `Formula(other) + self`.
    fn add(self, other: R) -> Formula<T> {
        other.into() + self
    }
}

impl<T: FormulaFloat, R: Into<Formula<T>>> Mul<R> for Term<T> {
    type Output = Formula<T>;

    /// Product with intercept absorption: `t * I == I * t == Formula(t)`.
    fn mul(self, other: R) -> Formula<T> {
        let other = other.into();
        if other.single_term().is_some_and(Term::is_intercept) {
            return Formula::from(self);
        }
        if self.is_intercept() {
            return other;
        }
        other * self
    }
}
