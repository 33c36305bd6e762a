//! Dense numeric arrays with scalar, vector and matrix shapes.
//!
//! ## Purpose
//!
//! This module provides `Array<T>`, the value produced by evaluating terms
//! and formulas. It carries exactly the shape semantics the formula layer
//! relies on: 0-D scalars, 1-D row vectors and 2-D row-major matrices.
//!
//! ## Design notes
//!
//! * **Row-major**: Matrix data is stored row by row, so a design block's
//!   columns-of-observations are contiguous slices.
//! * **Squeeze**: Length-1 dimensions are dropped after term evaluation, so a
//!   `1 x n` block becomes a length-`n` vector and a `1 x 1` block a scalar.
//! * **Generics**: Storage is generic; arithmetic requires `Float`.
//!
//! ## Invariants
//!
//! * `data.len()` equals the product of `shape` (1 for a scalar).
//! * `shape.len() <= 2`.
//!
//! ## Non-goals
//!
//! * No broadcasting, slicing views or linear algebra.

// Feature-gated imports
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

// External dependencies
use core::fmt;
use num_traits::Float;

// Internal dependencies
use crate::primitives::errors::FormulaError;

// ============================================================================
// Element Type
// ============================================================================

/// Floating-point element type of evaluated terms.
pub trait FormulaFloat: Float + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T: Float + fmt::Debug + fmt::Display + Send + Sync + 'static> FormulaFloat for T {}

// ============================================================================
// Array
// ============================================================================

/// A dense array of rank 0, 1 or 2.
#[derive(Debug, Clone, PartialEq)]
pub struct Array<T> {
    data: Vec<T>,
    shape: Vec<usize>,
}

impl<T> Array<T> {
    /// Create a 0-D array holding a single value.
    pub fn scalar(value: T) -> Self {
        Self {
            data: vec![value],
            shape: Vec::new(),
        }
    }

    /// Create a 1-D array from a vector.
    pub fn from_vec(data: Vec<T>) -> Self {
        let n = data.len();
        Self {
            data,
            shape: vec![n],
        }
    }

    /// Create an array from raw data and an explicit shape.
    pub fn from_shape_vec(shape: &[usize], data: Vec<T>) -> Result<Self, FormulaError> {
        if shape.len() > 2 {
            return Err(FormulaError::InvalidInput(format!(
                "arrays have at most 2 dimensions, got {}",
                shape.len()
            )));
        }
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(FormulaError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
        })
    }

    /// Create a 2-D array from rows of equal length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, FormulaError> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            if row.len() != ncols {
                return Err(FormulaError::ShapeMismatch {
                    expected: ncols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            data,
            shape: vec![nrows, ncols],
        })
    }

    /// An empty `0 x 0` matrix.
    pub fn empty() -> Self {
        Self {
            data: Vec::new(),
            shape: vec![0, 0],
        }
    }

    /// Number of dimensions.
    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Extent of each dimension.
    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Total number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Underlying data in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the array, returning its row-major data.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Number of rows when viewed as a matrix (see [`Array::into_matrix`]).
    pub fn nrows(&self) -> usize {
        match self.shape.as_slice() {
            [rows, _] => *rows,
            _ => 1,
        }
    }

    /// Number of columns when viewed as a matrix.
    pub fn ncols(&self) -> usize {
        match self.shape.as_slice() {
            [] => 1,
            [n] => *n,
            [_, cols] => *cols,
            _ => 0,
        }
    }

    /// Row `i` of the matrix view.
    pub fn row(&self, i: usize) -> &[T] {
        let ncols = self.ncols();
        &self.data[i * ncols..(i + 1) * ncols]
    }

    /// Iterate over the rows of the matrix view.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        (0..self.nrows()).map(move |i| self.row(i))
    }

    /// Remove all length-1 dimensions.
    pub fn squeeze(mut self) -> Self {
        self.shape.retain(|&d| d != 1);
        self
    }

    /// Reshape to a 2-D matrix: scalars become `1 x 1`, vectors a single row.
    pub fn into_matrix(mut self) -> Self {
        self.shape = vec![self.nrows(), self.ncols()];
        self
    }

    /// Element-wise map.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Array<U> {
        Array {
            data: self.data.iter().map(f).collect(),
            shape: self.shape.clone(),
        }
    }
}

impl<T: Copy> Array<T> {
    /// Stack 2-D blocks along the row axis.
    ///
    /// All blocks must have the same number of columns.
    pub fn concatenate_rows(blocks: &[Array<T>]) -> Result<Self, FormulaError> {
        let Some(first) = blocks.first() else {
            return Ok(Self::empty());
        };
        let ncols = first.ncols();
        let mut nrows = 0;
        let mut data = Vec::with_capacity(blocks.iter().map(Array::len).sum());
        for block in blocks {
            if block.ncols() != ncols {
                return Err(FormulaError::ShapeMismatch {
                    expected: ncols,
                    got: block.ncols(),
                });
            }
            nrows += block.nrows();
            data.extend_from_slice(&block.data);
        }
        Ok(Self {
            data,
            shape: vec![nrows, ncols],
        })
    }

    /// Transpose. Scalars and vectors are returned unchanged.
    pub fn transpose(&self) -> Self {
        if self.ndim() < 2 {
            return self.clone();
        }
        let (nrows, ncols) = (self.nrows(), self.ncols());
        let mut data = Vec::with_capacity(self.len());
        for c in 0..ncols {
            for r in 0..nrows {
                data.push(self.data[r * ncols + c]);
            }
        }
        Self {
            data,
            shape: vec![ncols, nrows],
        }
    }

    /// Element at `(row, col)` of the matrix view.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.nrows() && col < self.ncols() {
            self.data.get(row * self.ncols() + col).copied()
        } else {
            None
        }
    }
}

impl<T: Float> Array<T> {
    /// Array of the given shape filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::filled(shape, T::one())
    }

    /// Array of the given shape filled with zeros.
    pub fn zeros(shape: &[usize]) -> Self {
        Self::filled(shape, T::zero())
    }

    fn filled(shape: &[usize], value: T) -> Self {
        let n = shape.iter().product();
        Self {
            data: vec![value; n],
            shape: shape.to_vec(),
        }
    }

    /// Element-wise power.
    pub fn powf(&self, exponent: T) -> Self {
        self.map(|&v| v.powf(exponent))
    }
}

impl<T: fmt::Display> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let write_row = |f: &mut fmt::Formatter<'_>, row: &[T]| -> fmt::Result {
            write!(f, "[")?;
            for (i, v) in row.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            write!(f, "]")
        };
        match self.ndim() {
            0 => write!(f, "{}", self.data[0]),
            1 => write_row(f, &self.data),
            _ => {
                write!(f, "[")?;
                for i in 0..self.nrows() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_row(f, self.row(i))?;
                }
                write!(f, "]")
            }
        }
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}
