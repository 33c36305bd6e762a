#![cfg(feature = "dev")]

use approx::assert_relative_eq;

use formula_rs::internals::data::namespace::Namespace;
use formula_rs::internals::formula::expression::Formula;
use formula_rs::internals::primitives::errors::{ErrorKind, FormulaError};
use formula_rs::internals::primitives::keywords::Keywords;
use formula_rs::internals::primitives::level::Level;
use formula_rs::internals::terms::factor::{Factor, FactorValues};
use formula_rs::internals::terms::term::intercept;

fn data() -> Namespace<f64> {
    Namespace::new()
        .with_levels("g", ["lo", "hi", "lo"])
        .with_levels("f", ["a", "b", "c", "b"])
        .with_levels("o", [1, 3, 2, 3])
}

fn assert_values(got: &[f64], want: &[f64]) {
    assert_eq!(got.len(), want.len());
    for (g, w) in got.iter().zip(want) {
        assert_relative_eq!(*g, *w);
    }
}

// ============================================================================
// Construction Tests
// ============================================================================

/// Test that keys are sorted and deduplicated.
#[test]
fn test_factor_keys_sorted() {
    let g = Factor::<f64>::new("g", ["lo", "hi", "lo"], false).unwrap();
    assert_eq!(g.keys(), &[Level::from("hi"), Level::from("lo")]);
    assert_eq!(g.names(), vec!["(g==hi)", "(g==lo)"]);
    assert_eq!(g.termname(), "g");
    assert!(!g.is_ordinal());
}

/// Test ordinal factor naming.
#[test]
fn test_factor_ordinal_names() {
    let o = Factor::<f64>::new("o", [3, 1, 2], true).unwrap();
    assert_eq!(o.names(), vec!["o"]);
    assert!(o.is_ordinal());
}

/// Test that integer levels label indicator columns.
#[test]
fn test_factor_integer_levels() {
    let k = Factor::<f64>::new("k", [2, 1], false).unwrap();
    assert_eq!(k.names(), vec!["(k==1)", "(k==2)"]);
}

#[test]
fn test_factor_empty_termname() {
    let err = Factor::<f64>::new("", ["a"], false).unwrap_err();
    assert!(matches!(err, FormulaError::InvalidTermName(_)));
}

// ============================================================================
// Encoding Tests
// ============================================================================

/// Test indicator encoding, one row per sorted key.
#[test]
fn test_factor_indicator_encoding() {
    let ns = data();
    let g = Factor::new("g", ["lo", "hi"], false).unwrap();
    let value = g.evaluate(&ns, &Keywords::new()).unwrap();

    assert_eq!(value.shape(), &[2, 3]);
    assert_eq!(value.nrows(), g.names().len());
    assert_values(value.row(0), &[0.0, 1.0, 0.0]);
    assert_values(value.row(1), &[1.0, 0.0, 1.0]);
}

/// Test ordinal encoding over every observation.
#[test]
fn test_factor_ordinal_encoding() {
    let ns = data();
    let o = Factor::new("o", [3, 1, 2], true).unwrap();
    let value = o.evaluate(&ns, &Keywords::new()).unwrap();
    assert_eq!(value.shape(), &[4]);
    assert_values(value.as_slice(), &[0.0, 2.0, 1.0, 2.0]);
}

/// Test that numeric entries are read as integer levels.
#[test]
fn test_factor_numeric_source() {
    let ns = Namespace::new().with_values("k", vec![2.0_f64, 1.0, 2.0]);
    let k = Factor::new("k", [1, 2], false).unwrap();
    let value = k.evaluate(&ns, &Keywords::new()).unwrap();
    assert_values(value.row(0), &[0.0, 1.0, 0.0]);
    assert_values(value.row(1), &[1.0, 0.0, 1.0]);
}

/// Test that raw values round-trip.
#[test]
fn test_factor_values_round_trip() {
    let ns = data();
    let kw = Keywords::new();
    let g = Factor::new("g", ["lo", "hi"], false).unwrap();

    let raw = g.values(&ns, &kw).unwrap();
    assert_eq!(
        raw,
        vec![Level::from("lo"), Level::from("hi"), Level::from("lo")]
    );

    assert_eq!(
        g.evaluate_values(&ns, true, &kw).unwrap(),
        FactorValues::Levels(raw)
    );
    assert!(matches!(
        g.evaluate_values(&ns, false, &kw).unwrap(),
        FactorValues::Encoded(a) if a.shape() == [2, 3]
    ));
}

/// Test that encoding leaves the category labels retrievable.
#[test]
fn test_factor_labels_survive_encoding() {
    let ns = Namespace::<f64>::new().with_levels("s", ["a", "c", "b", "a"]);
    let kw = Keywords::new();
    let s = Factor::new("s", ["a", "b", "c"], false).unwrap();

    let encoded = s.evaluate(&ns, &kw).unwrap();
    assert_eq!(encoded.shape(), &[3, 4]);
    assert_values(encoded.row(0), &[1.0, 0.0, 0.0, 1.0]);
    assert_values(encoded.row(1), &[0.0, 0.0, 1.0, 0.0]);
    assert_values(encoded.row(2), &[0.0, 1.0, 0.0, 0.0]);

    let labels = vec![
        Level::from("a"),
        Level::from("c"),
        Level::from("b"),
        Level::from("a"),
    ];
    assert_eq!(
        s.evaluate_values(&ns, true, &kw).unwrap(),
        FactorValues::Levels(labels)
    );
}

/// Test that values outside the keys are a domain error.
#[test]
fn test_factor_unknown_levels() {
    let ns = data();
    let f = Factor::new("f", ["a", "b"], false).unwrap();
    let err = f.evaluate(&ns, &Keywords::new()).unwrap_err();
    assert_eq!(
        err,
        FormulaError::UnknownLevels {
            factor: "f".to_string(),
            levels: vec!["c".to_string()],
        }
    );
    assert_eq!(err.kind(), ErrorKind::Domain);

    let o = Factor::new("o", [1, 2], true).unwrap();
    assert!(matches!(
        o.evaluate(&ns, &Keywords::new()),
        Err(FormulaError::UnknownLevels { .. })
    ));
}

#[test]
fn test_factor_verify() {
    let f = Factor::<f64>::new("f", ["a", "b"], false).unwrap();
    assert!(f.verify(&[Level::from("b"), Level::from("a")]).is_ok());
    assert!(f.verify(&[Level::from("z")]).is_err());
}

// ============================================================================
// Main Effect Tests
// ============================================================================

/// Test the default reference (first sorted key).
#[test]
fn test_main_effect_default_reference() {
    let ns = data();
    let g = Factor::new("g", ["lo", "hi"], false).unwrap();
    let me = g.main_effect(None).unwrap();

    assert_eq!(me.termname(), "g:maineffect");
    assert_eq!(me.names(), vec!["(g==lo)-(g==hi)"]);

    // lo - hi over [lo, hi, lo]
    let value = me.evaluate(&ns, &Keywords::new()).unwrap();
    assert_eq!(value.shape(), &[3]);
    assert_values(value.as_slice(), &[1.0, -1.0, 1.0]);
}

/// Test an explicit reference column.
#[test]
fn test_main_effect_explicit_reference() {
    let ns = data();
    let g = Factor::new("g", ["lo", "hi"], false).unwrap();
    let me = g.main_effect(Some(1)).unwrap();
    assert_eq!(me.names(), vec!["(g==hi)-(g==lo)"]);
    let value = me.evaluate(&ns, &Keywords::new()).unwrap();
    assert_values(value.as_slice(), &[-1.0, 1.0, -1.0]);

    let f = Factor::new("f", ["a", "b", "c"], false).unwrap();
    let me = f.main_effect(Some(1)).unwrap();
    assert_eq!(me.names(), vec!["(f==a)-(f==b)", "(f==c)-(f==b)"]);
    let value = me.evaluate(&ns, &Keywords::new()).unwrap();
    assert_eq!(value.shape(), &[2, 4]);
    assert_values(value.row(0), &[1.0, -1.0, 0.0, -1.0]);
    assert_values(value.row(1), &[0.0, -1.0, 1.0, -1.0]);
}

/// Test main effects over a single observation.
#[test]
fn test_main_effect_single_observation() {
    let ns = Namespace::<f64>::new().with_levels("g", ["b"]);
    let kw = Keywords::new();
    let g = Factor::new("g", ["a", "b", "c"], false).unwrap();

    // b - a, c - a
    let value = g.main_effect(Some(0)).unwrap().evaluate(&ns, &kw).unwrap();
    assert_eq!(value.len(), 2);
    assert_values(value.as_slice(), &[1.0, 0.0]);

    // a - b, c - b
    let value = g.main_effect(Some(1)).unwrap().evaluate(&ns, &kw).unwrap();
    assert_eq!(value.len(), 2);
    assert_values(value.as_slice(), &[-1.0, -1.0]);

    let two = Factor::new("h", ["a", "b"], false).unwrap();
    let ns = ns.with_levels("h", ["a"]);
    let value = two.main_effect(Some(1)).unwrap().evaluate(&ns, &kw).unwrap();
    assert_values(value.as_slice(), &[1.0]);
}

/// Test rejected main effects.
#[test]
fn test_main_effect_invalid() {
    let g = Factor::<f64>::new("g", ["lo", "hi"], false).unwrap();
    assert_eq!(
        g.main_effect(Some(2)).unwrap_err(),
        FormulaError::InvalidReference {
            reference: 2,
            levels: 2
        }
    );

    let o = Factor::<f64>::new("o", [1, 2], true).unwrap();
    assert!(matches!(
        o.main_effect(None),
        Err(FormulaError::InvalidInput(_))
    ));
}

// ============================================================================
// Operator Tests
// ============================================================================

/// Test that adding the intercept yields the factor alone.
#[test]
fn test_factor_add_intercept() {
    let g = Factor::<f64>::new("g", ["a", "b"], false).unwrap();
    let f = g.clone() + intercept::<f64>();
    assert_eq!(f, Formula::from(g.as_term().clone()));
}

/// Test factor addition and multiplication with other terms.
#[test]
fn test_factor_operators() {
    let g = Factor::<f64>::new("g", ["a", "b"], false).unwrap();
    let h = Factor::<f64>::new("h", ["u"], false).unwrap();

    let sum = g.clone() + h.clone();
    assert_eq!(sum.termnames(), ["g", "h"]);

    let product = g * h;
    assert_eq!(product.termnames(), ["g*h"]);
    assert_eq!(product.names(), ["(g==a)*(h==u)", "(g==b)*(h==u)"]);
}
