#![cfg(feature = "dev")]

use approx::assert_relative_eq;

use formula_rs::internals::primitives::array::Array;
use formula_rs::internals::primitives::errors::FormulaError;

// ============================================================================
// Construction Tests
// ============================================================================

/// Test shapes of the three supported ranks.
#[test]
fn test_array_ranks() {
    let s = Array::scalar(2.0_f64);
    assert_eq!(s.ndim(), 0);
    assert_eq!(s.shape(), &[] as &[usize]);
    assert_eq!((s.nrows(), s.ncols()), (1, 1));

    let v = Array::from_vec(vec![1.0_f64, 2.0, 3.0]);
    assert_eq!(v.shape(), &[3]);
    assert_eq!((v.nrows(), v.ncols()), (1, 3));

    let m = Array::from_shape_vec(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    assert_eq!((m.nrows(), m.ncols()), (2, 3));
    assert_eq!(m.row(1), &[4.0, 5.0, 6.0]);
}

/// Test that invalid shapes are rejected.
#[test]
fn test_array_invalid_shapes() {
    let err = Array::from_shape_vec(&[2, 3], vec![0.0_f64; 5]).unwrap_err();
    assert_eq!(
        err,
        FormulaError::ShapeMismatch {
            expected: 6,
            got: 5
        }
    );

    let err = Array::from_shape_vec(&[1, 1, 1], vec![0.0_f64]).unwrap_err();
    assert!(matches!(err, FormulaError::InvalidInput(_)));

    let err = Array::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0, 5.0]]).unwrap_err();
    assert_eq!(
        err,
        FormulaError::ShapeMismatch {
            expected: 2,
            got: 3
        }
    );
}

// ============================================================================
// Reshaping Tests
// ============================================================================

/// Test that squeeze drops exactly the length-1 dimensions.
#[test]
fn test_array_squeeze() {
    let row = Array::from_shape_vec(&[1, 3], vec![1.0_f64, 2.0, 3.0]).unwrap();
    assert_eq!(row.squeeze().shape(), &[3]);

    let one = Array::from_shape_vec(&[1, 1], vec![7.0_f64]).unwrap();
    let one = one.squeeze();
    assert_eq!(one.ndim(), 0);
    assert_eq!(one.as_slice(), &[7.0]);

    let m = Array::from_shape_vec(&[2, 2], vec![1.0_f64; 4]).unwrap();
    assert_eq!(m.squeeze().shape(), &[2, 2]);
}

/// Test the matrix view of scalars and vectors.
#[test]
fn test_array_into_matrix() {
    assert_eq!(Array::scalar(1.0_f64).into_matrix().shape(), &[1, 1]);
    assert_eq!(
        Array::from_vec(vec![1.0_f64, 2.0]).into_matrix().shape(),
        &[1, 2]
    );
}

/// Test row stacking of matrix blocks.
#[test]
fn test_array_concatenate_rows() {
    let a = Array::from_vec(vec![1.0_f64, 2.0, 3.0]).into_matrix();
    let b = Array::from_rows(vec![vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]]).unwrap();

    let c = Array::concatenate_rows(&[a.clone(), b]).unwrap();
    assert_eq!(c.shape(), &[3, 3]);
    assert_eq!(c.row(2), &[7.0, 8.0, 9.0]);

    let narrow = Array::from_vec(vec![1.0_f64]).into_matrix();
    let err = Array::concatenate_rows(&[a, narrow]).unwrap_err();
    assert_eq!(
        err,
        FormulaError::ShapeMismatch {
            expected: 3,
            got: 1
        }
    );

    let empty = Array::<f64>::concatenate_rows(&[]).unwrap();
    assert_eq!(empty.shape(), &[0, 0]);
    assert!(empty.is_empty());
}

/// Test matrix transposition.
#[test]
fn test_array_transpose() {
    let m = Array::from_shape_vec(&[2, 3], vec![1.0_f64, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    let t = m.transpose();
    assert_eq!(t.shape(), &[3, 2]);
    assert_eq!(t.as_slice(), &[1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    assert_eq!(t.get(2, 1), Some(6.0));
    assert_eq!(t.get(3, 0), None);

    let v = Array::from_vec(vec![1.0_f64, 2.0]);
    assert_eq!(v.transpose(), v);
}

// ============================================================================
// Arithmetic Tests
// ============================================================================

/// Test constant fills and element-wise power.
#[test]
fn test_array_fills_and_power() {
    let ones = Array::<f64>::ones(&[2, 2]);
    assert!(ones.as_slice().iter().all(|&v| v == 1.0));
    let zeros = Array::<f64>::zeros(&[3]);
    assert_eq!(zeros.as_slice(), &[0.0, 0.0, 0.0]);

    let v = Array::from_vec(vec![1.0_f64, 4.0, 9.0]).powf(0.5);
    for (got, want) in v.as_slice().iter().zip([1.0, 2.0, 3.0]) {
        assert_relative_eq!(*got, want, epsilon = 1e-12);
    }
}

/// Test display as nested brackets.
#[test]
fn test_array_display() {
    assert_eq!(format!("{}", Array::scalar(3.0_f64)), "3");
    assert_eq!(format!("{}", Array::from_vec(vec![1.5_f64, 2.0])), "[1.5, 2]");
    let m = Array::from_rows(vec![vec![1.0_f64, 2.0], vec![3.0, 4.0]]).unwrap();
    assert_eq!(format!("{}", m), "[[1, 2], [3, 4]]");
}
