//! # formula-rs — Symbolic Model Formulas and Design Matrices for Rust
//!
//! Build regression design matrices from symbolic model formulas. Variables
//! are named as terms, combined with `+`, `*` and `-` into formulas, and
//! evaluated against a data namespace into a numeric matrix whose columns
//! correspond to model terms: intercept, main effects, categorical level
//! indicators, polynomial terms and interactions.
//!
//! ## What is a model formula?
//!
//! A formula describes the columns of a design matrix without touching the
//! data. `y ~ 1 + x + g + x:g` in statistical environments becomes, here,
//! `intercept() + x + g + x * g`. Nothing is computed until the formula is
//! evaluated, so one formula can be realized against many datasets.
//!
//! **The algebra:**
//! - `a + b` concatenates terms, canonically ordered by name
//! - `a * b` forms pairwise interactions; the intercept is the identity
//! - `a - b` removes terms by termname
//!
//! ## Quick Start
//!
//! ```rust
//! use formula_rs::prelude::*;
//!
//! let mut ns = Namespace::<f64>::new();
//! ns.insert_values("x", vec![1.0, 2.0, 3.0, 4.0]);
//! ns.insert_levels("g", ["a", "b", "a", "b"]);
//!
//! let x = Term::new("x")?;
//! let g = Factor::new("g", ["a", "b"], false)?;
//!
//! let formula = intercept() + x + g.main_effect(None)?;
//!
//! let design = Design::new().build()?.realize(&formula, &ns)?;
//! assert_eq!(design.names, ["intercept", "(g==b)-(g==a)", "x"]);
//! assert_eq!(design.n_observations(), 4);
//! println!("{}", design);
//! # Result::<(), FormulaError>::Ok(())
//! ```
//!
//! ```text
//! Summary:
//!   Observations: 4
//!   Columns: 3
//!
//! Design Matrix:
//!       intercept (g==b)-(g==a)             x
//!   ------------------------------------------
//!          1.0000       -1.0000        1.0000
//!          1.0000        1.0000        2.0000
//!          1.0000       -1.0000        3.0000
//!          1.0000        1.0000        4.0000
//! ```
//!
//! ## Terms
//!
//! | Type           | Columns                          | Values                                     |
//! |----------------|----------------------------------|--------------------------------------------|
//! | `Term`         | one per name                     | `namespace[termname]`, or a derivation     |
//! | `Factor`       | one per level (`(g==a)`, ...)    | indicator rows, or ordinal index           |
//! | `Quantitative` | one                              | numeric values; `.pow(p)` gives `x^p`      |
//! | `FuncQuant`    | one                              | `f(x)` over the raw values of `x`          |
//! | `intercept()`  | one                              | ones                                       |
//!
//! ### Polynomial terms
//!
//! ```rust
//! use formula_rs::prelude::*;
//!
//! let ns = Namespace::<f64>::new().with_values("x", vec![1.0, 2.0, 3.0]);
//! let x2 = Quantitative::new("x")?.pow(2)?;
//!
//! assert_eq!(x2.termname(), "x^2");
//! assert_eq!(x2.evaluate(&ns, &Keywords::new())?.as_slice(), &[1.0, 4.0, 9.0]);
//! # Result::<(), FormulaError>::Ok(())
//! ```
//!
//! ### Interactions
//!
//! ```rust
//! use formula_rs::prelude::*;
//!
//! let a = Term::<f64>::new("a")?;
//! let b = Term::new("b")?;
//! let c = Term::new("c")?;
//!
//! let f = Formula::new(vec![b, a]) * c;
//! assert_eq!(f.termnames(), ["b*c", "a*c"]);
//! # Result::<(), FormulaError>::Ok(())
//! ```
//!
//! ## Result and Error Handling
//!
//! Every fallible operation returns `Result<_, FormulaError>`.
//! [`FormulaError::kind`](prelude::FormulaError::kind) groups errors into
//! validation, not-found, domain, configuration and length-mismatch errors.
//!
//! ```rust
//! use formula_rs::prelude::*;
//!
//! let ns = Namespace::<f64>::new();
//! let f = Formula::from(intercept::<f64>());
//!
//! // An intercept alone has no width without a row count.
//! let err = f.evaluate(&ns, None, &Keywords::new()).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Configuration);
//!
//! let ones = f.evaluate(&ns, Some(3), &Keywords::new())?;
//! assert_eq!(ones.shape(), &[1, 3]);
//! # Result::<(), FormulaError>::Ok(())
//! ```
//!
//! ## Minimal Usage (no_std)
//!
//! The crate supports `no_std` environments with `alloc`. Disable default
//! features to remove the standard library dependency:
//!
//! ```toml
//! [dependencies]
//! formula-rs = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]

#[cfg(not(feature = "std"))]
#[macro_use]
extern crate alloc;

// ============================================================================
// Internal Modules
// ============================================================================

// Layer 1: Primitives - data structures and basic utilities.
//
// Contains the error type, dense arrays, categorical levels, and keyword
// arguments.
mod primitives;

// Layer 2: Data - caller-owned state.
//
// Contains the variable namespace and the term registry.
mod data;

// Layer 3: Terms - symbolic model terms.
//
// Contains `Term` and its derivations, factors, quantitative and function
// terms, and interaction construction.
mod terms;

// Layer 4: Formula - term algebra and evaluation.
//
// Contains the `Formula` type, its operators, design matrix assembly, and
// the nesting test.
mod formula;

// Layer 5: Engine - validation.
//
// Contains the validator shared by all layers.
mod engine;

// High-level fluent API for realizing design matrices.
mod api;

// ============================================================================
// Prelude
// ============================================================================

/// Standard formula prelude.
///
/// This module is intended to be wildcard-imported for convenient access
/// to the most commonly used types:
///
/// ```
/// use formula_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::api::{
        intercept, is_nested, DesignBuilder as Design, DesignMatrix, DesignPlan, Entry,
        ErrorKind, Factor, FactorValues, FormulaError, FuncQuant, Level,
        Orientation::{self, Columns, Observations},
        Quantitative, Term, TermName, TermRegistry,
    };
    pub use crate::data::namespace::Namespace;
    pub use crate::formula::expression::Formula;
    pub use crate::primitives::array::Array;
    pub use crate::primitives::keywords::Keywords;
}

// ============================================================================
// Testing re-exports
// ============================================================================

/// Internal modules for development and testing.
///
/// This module re-exports internal modules for development and testing purposes.
/// It is only available with the `dev` feature enabled.
///
/// **Warning**: These are internal implementation details and may change without notice.
/// Do not use in production code.
#[cfg(feature = "dev")]
pub mod internals {
    /// Internal primitive types and utilities.
    pub mod primitives {
        pub use crate::primitives::*;
    }
    /// Internal caller-owned data structures.
    pub mod data {
        pub use crate::data::*;
    }
    /// Internal term types.
    pub mod terms {
        pub use crate::terms::*;
    }
    /// Internal formula algebra and assembly.
    pub mod formula {
        pub use crate::formula::*;
    }
    /// Internal validation engine.
    pub mod engine {
        pub use crate::engine::*;
    }
    /// Internal API.
    pub mod api {
        pub use crate::api::*;
    }
}
