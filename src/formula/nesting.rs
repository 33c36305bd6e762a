//! Nesting test for pairs of factors.
//!
//! Factor `b` is nested in factor `a` when every level of `b` occurs with
//! exactly one level of `a`. The test is a crude count over the observed
//! values: the two factors are nested when the number of distinct
//! `(a, b)` pairs equals the number of distinct levels of the finer one.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::collections::BTreeSet;
#[cfg(feature = "std")]
use std::collections::BTreeSet;

// Internal dependencies
use crate::data::namespace::Namespace;
use crate::engine::validator::Validator;
use crate::primitives::array::FormulaFloat;
use crate::primitives::errors::FormulaError;
use crate::primitives::keywords::Keywords;
use crate::terms::factor::Factor;

/// Test whether `a` and `b` are nested, returning the finer factor.
///
/// Returns `Ok(None)` when neither refines the other. Ties (equal numbers
/// of levels) report `b`.
pub fn is_nested<'a, T: FormulaFloat>(
    a: &'a Factor<T>,
    b: &'a Factor<T>,
    namespace: &Namespace<T>,
) -> Result<Option<&'a Factor<T>>, FormulaError> {
    let keywords = Keywords::new();
    let av = a.values(namespace, &keywords)?;
    let bv = b.values(namespace, &keywords)?;
    Validator::validate_same_length(av.len(), bv.len())?;

    let na = av.iter().collect::<BTreeSet<_>>().len();
    let nb = bv.iter().collect::<BTreeSet<_>>().len();
    let nab = av.iter().zip(&bv).collect::<BTreeSet<_>>().len();

    if nab != na.max(nb) {
        return Ok(None);
    }
    Ok(Some(if na > nb { a } else { b }))
}
