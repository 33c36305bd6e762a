//! Quantitative terms and numeric transforms of terms.
//!
//! ## Purpose
//!
//! This module provides `Quantitative`, a term whose namespace entry is
//! numeric, with polynomial powers, and `FuncQuant`, a quantitative term
//! whose values are a function of another term's raw values.
//!
//! ## Design notes
//!
//! * **Lazy**: Both produce derived terms; nothing is computed until the
//!   term is evaluated.
//! * **Explicit capture**: The source term is stored in the derivation.
//!
//! ## Key concepts
//!
//! * **Power naming**: `x^2` for whole exponents, `x^0.50` otherwise.
//! * **Function naming**: `log(x)` when the function is named, `f0(x)`,
//!   `f1(x)`, ... for anonymous functions.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::sync::Arc;

// External dependencies
use core::fmt::Debug;
use core::ops::{Add, Deref, Mul};
use core::sync::atomic::{AtomicUsize, Ordering};
use num_traits::ToPrimitive;

// Internal dependencies
use crate::engine::validator::Validator;
use crate::formula::expression::Formula;
use crate::primitives::array::{Array, FormulaFloat};
use crate::primitives::errors::FormulaError;
use crate::terms::term::{Derivation, Term, TermName, TermSource};

/// Counter naming anonymous function terms.
static ANONYMOUS: AtomicUsize = AtomicUsize::new(0);

// ============================================================================
// Quantitative
// ============================================================================

/// A term over numeric values.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantitative<T> {
    term: Term<T>,
}

impl<T: FormulaFloat> Quantitative<T> {
    /// Create a quantitative term looked up by `name`.
    pub fn new(name: &str) -> Result<Self, FormulaError> {
        Term::new(name).map(Self::from_term)
    }

    /// Treat an existing term as quantitative.
    pub fn from_term(term: Term<T>) -> Self {
        Self { term }
    }

    /// Element-wise power of this term.
    ///
    /// The exponent must convert to a finite float. The result is a plain
    /// [`Term`] exposing the exponent through [`Term::power`].
    pub fn pow<P: ToPrimitive + Debug>(&self, power: P) -> Result<Term<T>, FormulaError> {
        let exponent: T = Validator::validate_power(&power)?;
        let base = self.term.label();
        // Adding zero folds -0 into 0.
        let shown = exponent.to_f64().unwrap_or(f64::NAN) + 0.0;
        let name = if exponent.fract() == T::zero() {
            format!("{}^{:.0}", base, shown)
        } else {
            format!("{}^{:.2}", base, shown)
        };
        Term::from_parts(
            TermName::Plain(name),
            None,
            TermSource::Derived(Derivation::Power {
                base: Arc::new(self.term.clone()),
                exponent,
            }),
        )
    }
}

impl<T> Quantitative<T> {
    /// Underlying term.
    #[inline]
    pub fn as_term(&self) -> &Term<T> {
        &self.term
    }

    /// Consume, returning the underlying term.
    pub fn into_term(self) -> Term<T> {
        self.term
    }
}

impl<T> Deref for Quantitative<T> {
    type Target = Term<T>;

    fn deref(&self) -> &Term<T> {
        &self.term
    }
}

impl<T> From<Quantitative<T>> for Term<T> {
    fn from(quant: Quantitative<T>) -> Self {
        quant.term
    }
}

impl<T: FormulaFloat, R: Into<Formula<T>>> Add<R> for Quantitative<T> {
    type Output = Formula<T>;

    fn add(self, other: R) -> Formula<T> {
        self.term + other
    }
}

impl<T: FormulaFloat, R: Into<Formula<T>>> Mul<R> for Quantitative<T> {
    type Output = Formula<T>;

    fn mul(self, other: R) -> Formula<T> {
        self.term * other
    }
}

// ============================================================================
// FuncQuant
// ============================================================================

/// A quantitative term computed as `f(x)` from the raw values of `x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncQuant<T> {
    quant: Quantitative<T>,
    source: Arc<Term<T>>,
}

impl<T: FormulaFloat> FuncQuant<T> {
    /// Wrap an anonymous function, named `f<n>(x)`.
    pub fn new<F>(x: &Term<T>, f: F) -> Result<Self, FormulaError>
    where
        F: Fn(&Array<T>) -> Array<T> + Send + Sync + 'static,
    {
        let label = format!("f{}", ANONYMOUS.fetch_add(1, Ordering::Relaxed));
        Self::build(x, label, f)
    }

    /// Wrap a named function, named `fname(x)`.
    pub fn named<F>(x: &Term<T>, fname: &str, f: F) -> Result<Self, FormulaError>
    where
        F: Fn(&Array<T>) -> Array<T> + Send + Sync + 'static,
    {
        if fname.is_empty() {
            return Self::new(x, f);
        }
        Self::build(x, String::from(fname), f)
    }

    fn build<F>(x: &Term<T>, label: String, f: F) -> Result<Self, FormulaError>
    where
        F: Fn(&Array<T>) -> Array<T> + Send + Sync + 'static,
    {
        let source = Arc::new(x.clone());
        let term = Term::from_parts(
            TermName::Plain(format!("{}({})", label, x.label())),
            None,
            TermSource::Derived(Derivation::Function {
                source: source.clone(),
                func: Arc::new(f),
                label,
            }),
        )?;
        Ok(Self {
            quant: Quantitative::from_term(term),
            source,
        })
    }
}

impl<T> FuncQuant<T> {
    /// Term the function is applied to.
    #[inline]
    pub fn source(&self) -> &Term<T> {
        &self.source
    }

    /// Consume, returning the underlying term.
    pub fn into_term(self) -> Term<T> {
        self.quant.term
    }
}

impl<T> Deref for FuncQuant<T> {
    type Target = Quantitative<T>;

    fn deref(&self) -> &Quantitative<T> {
        &self.quant
    }
}

impl<T> From<FuncQuant<T>> for Term<T> {
    fn from(quant: FuncQuant<T>) -> Self {
        quant.quant.term
    }
}

impl<T: FormulaFloat, R: Into<Formula<T>>> Add<R> for FuncQuant<T> {
    type Output = Formula<T>;

    fn add(self, other: R) -> Formula<T> {
        self.quant + other
    }
}

impl<T: FormulaFloat, R: Into<Formula<T>>> Mul<R> for FuncQuant<T> {
    type Output = Formula<T>;

    fn mul(self, other: R) -> Formula<T> {
        self.quant * other
    }
}
