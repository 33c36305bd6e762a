#![cfg(feature = "dev")]

use formula_rs::internals::data::namespace::Namespace;
use formula_rs::internals::primitives::errors::FormulaError;
use formula_rs::internals::primitives::keywords::Keywords;
use formula_rs::internals::terms::factor::Factor;
use formula_rs::internals::terms::interaction::{canonical_name, interaction};
use formula_rs::internals::terms::term::Term;

fn data() -> Namespace<f64> {
    Namespace::new()
        .with_values("x", vec![1.0, 2.0, 3.0])
        .with_values("z", vec![2.0, 2.0, 2.0])
        .with_values("short", vec![1.0, 2.0])
        .with_levels("g", ["a", "b", "a"])
}

/// Test canonical naming of interaction labels.
#[test]
fn test_canonical_name() {
    assert_eq!(canonical_name("b", "a"), "a*b");
    assert_eq!(canonical_name("a*c", "b"), "a*b*c");
    assert_eq!(canonical_name("x", "x"), "x*x");
}

/// Test the interaction of two single-column terms.
#[test]
fn test_interaction_single_columns() {
    let ns = data();
    let x = Term::new("x").unwrap();
    let z = Term::new("z").unwrap();

    let xz = interaction(&z, &x);
    assert_eq!(xz.termname(), "x*z");
    assert_eq!(xz.names(), vec!["x*z"]);
    let value = xz.evaluate(&ns, &Keywords::new()).unwrap();
    assert_eq!(value.as_slice(), &[2.0, 4.0, 6.0]);
}

/// Test left-major rows for a factor interaction.
#[test]
fn test_interaction_factor_rows() {
    let ns = data();
    let g = Factor::new("g", ["a", "b"], false).unwrap();
    let x = Term::new("x").unwrap();

    let gx = interaction(g.as_term(), &x);
    assert_eq!(gx.termname(), "g*x");
    assert_eq!(gx.names(), vec!["(g==a)*x", "(g==b)*x"]);

    let value = gx.evaluate(&ns, &Keywords::new()).unwrap();
    assert_eq!(value.shape(), &[2, 3]);
    assert_eq!(value.nrows(), gx.names().len());
    assert_eq!(value.row(0), &[1.0, 0.0, 3.0]);
    assert_eq!(value.row(1), &[0.0, 2.0, 0.0]);
}

/// Test that operands of different widths are rejected.
#[test]
fn test_interaction_width_mismatch() {
    let ns = data();
    let x = Term::new("x").unwrap();
    let short = Term::new("short").unwrap();

    let err = interaction(&x, &short)
        .evaluate(&ns, &Keywords::new())
        .unwrap_err();
    assert_eq!(
        err,
        FormulaError::ShapeMismatch {
            expected: 3,
            got: 2
        }
    );
}
