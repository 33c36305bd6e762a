#![cfg(feature = "dev")]

use formula_rs::internals::primitives::keywords::{Keywords, NROW};
use formula_rs::internals::primitives::level::Level;

// ============================================================================
// Level Tests
// ============================================================================

/// Test that integer levels order before text levels.
#[test]
fn test_level_ordering() {
    let mut levels = vec![
        Level::from("b"),
        Level::from(10),
        Level::from("a"),
        Level::from(2),
    ];
    levels.sort();
    assert_eq!(
        levels,
        vec![
            Level::Integer(2),
            Level::Integer(10),
            Level::Text("a".to_string()),
            Level::Text("b".to_string()),
        ]
    );
}

/// Test numeric conversions.
#[test]
fn test_level_float_conversion() {
    assert_eq!(Level::from_float(2.0_f64), Some(Level::Integer(2)));
    assert_eq!(Level::from_float(-3.0_f64), Some(Level::Integer(-3)));
    assert_eq!(Level::from_float(2.5_f64), None);
    assert_eq!(Level::from_float(f64::NAN), None);

    assert_eq!(Level::Integer(4).to_float::<f64>(), Some(4.0));
    assert_eq!(Level::from("x").to_float::<f64>(), None);
}

#[test]
fn test_level_display() {
    assert_eq!(Level::from(7_i64).to_string(), "7");
    assert_eq!(Level::from(String::from("hi")).to_string(), "hi");
}

// ============================================================================
// Keyword Tests
// ============================================================================

/// Test keyword storage and lookups.
#[test]
fn test_keywords_basic() {
    let mut kw = Keywords::new().with("scale", 2.0).with(NROW, 3.0);
    assert_eq!(kw.len(), 2);
    assert_eq!(kw.get("scale"), Some(2.0));
    assert_eq!(kw.get("missing"), None);

    assert_eq!(kw.insert("scale", 5.0), Some(2.0));
    let pairs: Vec<(&str, f64)> = kw.iter().collect();
    assert_eq!(pairs, vec![("nrow", 3.0), ("scale", 5.0)]);

    assert!(Keywords::new().is_empty());
}

/// Test reading keywords as counts.
#[test]
fn test_keywords_get_count() {
    let kw = Keywords::new()
        .with(NROW, 4.0)
        .with("neg", -1.0)
        .with("frac", 3.7)
        .with("inf", f64::INFINITY);
    assert_eq!(kw.get_count(NROW), Some(4));
    assert_eq!(kw.get_count("neg"), None);
    assert_eq!(kw.get_count("frac"), Some(3));
    assert_eq!(kw.get_count("inf"), None);
    assert_eq!(kw.get_count("missing"), None);
}
