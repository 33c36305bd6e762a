//! Caller-owned variable namespace.
//!
//! ## Purpose
//!
//! This module provides `Namespace`, the mapping from variable names to the
//! data that terms are evaluated against. It is built by the caller and
//! passed explicitly to every evaluation; the crate keeps no ambient state.
//!
//! ## Design notes
//!
//! * **Entries**: A name maps to numeric values, categorical levels, a nested
//!   formula, or a callable producing values from keyword arguments.
//! * **Ordered**: Backed by a `BTreeMap`, so iteration order is stable.
//!
//! ## Key concepts
//!
//! * **Resolve**: Numeric view of an entry (formulas evaluated, callables
//!   invoked, integer levels converted). Self-referencing formulas are an
//!   error rather than unbounded recursion.
//! * **Levels**: Categorical view of an entry (whole-valued numbers
//!   converted to integer levels).
//!
//! ## Non-goals
//!
//! * No loading, parsing or persistence of data.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::string::{String, ToString};
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt;

// Internal dependencies
use crate::formula::expression::Formula;
use crate::primitives::array::{Array, FormulaFloat};
use crate::primitives::errors::FormulaError;
use crate::primitives::keywords::Keywords;
use crate::primitives::level::Level;
use crate::terms::term::Term;

/// Values produced on demand from keyword arguments.
pub type Callable<T> = Arc<dyn Fn(&Keywords) -> Result<Array<T>, FormulaError> + Send + Sync>;

// ============================================================================
// Entry
// ============================================================================

/// A value stored in a [`Namespace`].
#[derive(Clone)]
pub enum Entry<T> {
    /// Numeric values (vector or matrix).
    Values(Array<T>),

    /// Categorical values.
    Levels(Vec<Level>),

    /// A formula evaluated with the same namespace and keywords.
    ///
    /// A formula that reaches its own name through lookups is rejected with
    /// [`FormulaError::RecursiveFormula`]. Lookups made inside custom
    /// evaluators and callables are not followed.
    Formula(Formula<T>),

    /// A callable invoked with the keywords.
    Callable(Callable<T>),
}

impl<T: fmt::Debug> fmt::Debug for Entry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Values(values) => f.debug_tuple("Values").field(values).finish(),
            Entry::Levels(levels) => f.debug_tuple("Levels").field(levels).finish(),
            Entry::Formula(formula) => f.debug_tuple("Formula").field(formula).finish(),
            Entry::Callable(_) => f.write_str("Callable(..)"),
        }
    }
}

impl<T> From<Array<T>> for Entry<T> {
    fn from(values: Array<T>) -> Self {
        Entry::Values(values)
    }
}

impl<T> From<Formula<T>> for Entry<T> {
    fn from(formula: Formula<T>) -> Self {
        Entry::Formula(formula)
    }
}

// ============================================================================
// Namespace
// ============================================================================

/// Mapping from variable names to data.
#[derive(Debug, Clone)]
pub struct Namespace<T> {
    entries: BTreeMap<String, Entry<T>>,
}

impl<T> Default for Namespace<T> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<T> Namespace<T> {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert<E: Into<Entry<T>>>(&mut self, name: &str, entry: E) -> Option<Entry<T>> {
        self.entries.insert(name.to_string(), entry.into())
    }

    /// Insert numeric values.
    pub fn insert_values(&mut self, name: &str, values: Vec<T>) -> Option<Entry<T>> {
        self.insert(name, Array::from_vec(values))
    }

    /// Insert categorical values.
    pub fn insert_levels<I>(&mut self, name: &str, levels: I) -> Option<Entry<T>>
    where
        I: IntoIterator,
        I::Item: Into<Level>,
    {
        let levels = levels.into_iter().map(Into::into).collect();
        self.entries.insert(name.to_string(), Entry::Levels(levels))
    }

    /// Insert a callable producing values from keyword arguments.
    pub fn insert_callable<F>(&mut self, name: &str, f: F) -> Option<Entry<T>>
    where
        F: Fn(&Keywords) -> Result<Array<T>, FormulaError> + Send + Sync + 'static,
    {
        self.entries
            .insert(name.to_string(), Entry::Callable(Arc::new(f)))
    }

    /// Builder-style [`Namespace::insert_values`].
    pub fn with_values(mut self, name: &str, values: Vec<T>) -> Self {
        self.insert_values(name, values);
        self
    }

    /// Builder-style [`Namespace::insert_levels`].
    pub fn with_levels<I>(mut self, name: &str, levels: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Level>,
    {
        self.insert_levels(name, levels);
        self
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&Entry<T>> {
        self.entries.get(name)
    }

    /// Whether an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Remove an entry.
    pub fn remove(&mut self, name: &str) -> Option<Entry<T>> {
        self.entries.remove(name)
    }

    /// Entry names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the namespace is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, name: &str) -> Result<&Entry<T>, FormulaError> {
        self.entries
            .get(name)
            .ok_or_else(|| FormulaError::UnknownVariable(name.to_string()))
    }

    /// Whether the formula stored under `from` leads back to `target`.
    fn reaches<'a>(&'a self, from: &'a str, target: &str, seen: &mut BTreeSet<&'a str>) -> bool {
        let Some(Entry::Formula(formula)) = self.entries.get(from) else {
            return false;
        };
        formula.iter().flat_map(Term::lookups).any(|next| {
            next == target || (seen.insert(next) && self.reaches(next, target, seen))
        })
    }
}

impl<T: FormulaFloat> Namespace<T> {
    /// Numeric value of `name`.
    ///
    /// Formulas are evaluated recursively with this namespace, callables
    /// are invoked with `keywords`, and integer levels become numbers.
    pub fn resolve(&self, name: &str, keywords: &Keywords) -> Result<Array<T>, FormulaError> {
        match self.entry(name)? {
            Entry::Values(values) => Ok(values.clone()),
            Entry::Levels(levels) => levels
                .iter()
                .map(Level::to_float)
                .collect::<Option<Vec<T>>>()
                .map(Array::from_vec)
                .ok_or_else(|| FormulaError::NonNumericValues(name.to_string())),
            Entry::Formula(formula) => {
                if self.reaches(name, name, &mut BTreeSet::new()) {
                    return Err(FormulaError::RecursiveFormula(name.to_string()));
                }
                formula.evaluate(self, None, keywords)
            }
            Entry::Callable(f) => f(keywords),
        }
    }

    /// Categorical value of `name`.
    ///
    /// Numeric values must be whole numbers to be read as levels.
    pub fn levels(&self, name: &str, keywords: &Keywords) -> Result<Vec<Level>, FormulaError> {
        if let Entry::Levels(levels) = self.entry(name)? {
            return Ok(levels.clone());
        }
        self.resolve(name, keywords)?
            .as_slice()
            .iter()
            .map(|&v| Level::from_float(v))
            .collect::<Option<Vec<Level>>>()
            .ok_or_else(|| {
                FormulaError::InvalidInput(format!(
                    "variable '{}' has non-integer values and cannot be read as levels",
                    name
                ))
            })
    }
}
