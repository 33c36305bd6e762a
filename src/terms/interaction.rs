//! Interaction terms.
//!
//! An interaction of two terms has one column per pair of their columns,
//! each the element-wise product of the two rows. Labels are canonical:
//! the pieces of `a*b` are split on `*`, sorted and re-joined, so `a*b` and
//! `b*a` name the same column.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::string::String;
#[cfg(not(feature = "std"))]
use alloc::sync::Arc;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::string::String;
#[cfg(feature = "std")]
use std::sync::Arc;
#[cfg(feature = "std")]
use std::vec::Vec;

use crate::terms::term::{Derivation, Term, TermName, TermSource};

/// Join two labels with `*`, sorting all `*`-separated pieces.
pub fn canonical_name(left: &str, right: &str) -> String {
    let mut pieces: Vec<&str> = left.split('*').chain(right.split('*')).collect();
    pieces.sort_unstable();
    pieces.join("*")
}

/// Build the interaction of `left` and `right`.
///
/// Rows are ordered left-major: `left[0]*right[0], left[0]*right[1], ...`.
pub fn interaction<T: Clone>(left: &Term<T>, right: &Term<T>) -> Term<T> {
    let right_names = right.names();
    let names = left
        .names()
        .iter()
        .flat_map(|l| right_names.iter().map(move |r| canonical_name(l, r)))
        .collect();

    Term {
        name: TermName::Composite(names),
        termname: canonical_name(left.termname(), right.termname()),
        source: TermSource::Derived(Derivation::Interaction {
            left: Arc::new(left.clone()),
            right: Arc::new(right.clone()),
        }),
    }
}
