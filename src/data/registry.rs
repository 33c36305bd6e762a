//! Caller-owned registry of named terms.
//!
//! A `TermRegistry` collects terms by termname while a model is assembled.
//! Registration is last-writer-wins: registering a term under an existing
//! termname replaces the earlier entry and hands it back.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(not(feature = "std"))]
use alloc::string::{String, ToString};
#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::string::{String, ToString};

use crate::terms::term::Term;

/// Terms keyed by termname.
#[derive(Debug, Clone)]
pub struct TermRegistry<T> {
    terms: BTreeMap<String, Term<T>>,
}

impl<T> Default for TermRegistry<T> {
    fn default() -> Self {
        Self {
            terms: BTreeMap::new(),
        }
    }
}

impl<T> TermRegistry<T> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a term, returning the term it replaced.
    pub fn register<U: Into<Term<T>>>(&mut self, term: U) -> Option<Term<T>> {
        let term = term.into();
        self.terms.insert(term.termname().to_string(), term)
    }

    /// Look up a term by termname.
    pub fn get(&self, termname: &str) -> Option<&Term<T>> {
        self.terms.get(termname)
    }

    /// Whether a termname is registered.
    pub fn contains(&self, termname: &str) -> bool {
        self.terms.contains_key(termname)
    }

    /// Remove a term.
    pub fn remove(&mut self, termname: &str) -> Option<Term<T>> {
        self.terms.remove(termname)
    }

    /// Registered terms in termname order.
    pub fn iter(&self) -> impl Iterator<Item = &Term<T>> + '_ {
        self.terms.values()
    }

    /// Number of registered terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
