//! Formula operators: `+`, `-` and `*`.
//!
//! ## Purpose
//!
//! This module implements the algebra that combines terms into formulas.
//!
//! ## Key concepts
//!
//! * **Sum**: Concatenate the term lists, then stable-sort by term name.
//!   Sums are therefore independent of operand order.
//! * **Difference**: Drop the first term matching each termname of the right
//!   operand. Unknown termnames are ignored.
//! * **Product**: One term per pair `(left, right)`. The intercept is the
//!   identity: a pair containing it yields the other term unchanged.
//!   Other pairs yield an interaction named by the canonical
//!   `*`-joined termnames.
//!
//! ## Invariants
//!
//! * Operators never mutate their operands.
//! * `(a + b).termnames() == (b + a).termnames()`.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::ops::{Add, Mul, Sub};

// Internal dependencies
use crate::formula::expression::Formula;
use crate::primitives::array::FormulaFloat;
use crate::terms::interaction::interaction;
use crate::terms::term::Term;

// ============================================================================
// Sum
// ============================================================================

impl<T: FormulaFloat, R: Into<Formula<T>>> Add<R> for Formula<T> {
    type Output = Formula<T>;

    fn add(self, other: R) -> Formula<T> {
        let mut terms = self.into_terms();
        terms.extend(other.into().into_terms());
        terms.sort_by(|a, b| a.name().canonical_cmp(b.name()));
        Formula::new(terms)
    }
}

// ============================================================================
// Difference
// ============================================================================

impl<T: FormulaFloat, R: Into<Formula<T>>> Sub<R> for Formula<T> {
    type Output = Formula<T>;

    fn sub(self, other: R) -> Formula<T> {
        let mut terms = self.into_terms();
        for term in other.into().iter() {
            if let Some(i) = terms.iter().position(|t| t.termname() == term.termname()) {
                terms.remove(i);
            }
        }
        Formula::new(terms)
    }
}

// ============================================================================
// Product
// ============================================================================

impl<T: FormulaFloat, R: Into<Formula<T>>> Mul<R> for Formula<T> {
    type Output = Formula<T>;

    fn mul(self, other: R) -> Formula<T> {
        let other = other.into();
        let mut terms: Vec<Term<T>> = Vec::with_capacity(self.len() * other.len());
        for left in self.iter() {
            for right in other.iter() {
                let term = if left.is_intercept() {
                    right.clone()
                } else if right.is_intercept() {
                    left.clone()
                } else {
                    interaction(left, right)
                };
                terms.push(term);
            }
        }
        Formula::new(terms)
    }
}
