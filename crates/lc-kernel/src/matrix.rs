use std::fmt;

use crate::error::{KernelError, Result};
use crate::view::{ReadView, WriteView};

/// Number of rows and columns of every matrix.
pub const N: usize = 4;

/// Number of elements of every matrix.
pub const NUM_ELEMENTS: usize = N * N;

/// A fixed N×N matrix of `f32` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    data: Vec<f32>,
}

impl Matrix {
    /// Create a zero-filled matrix.
    pub fn zeros() -> Self {
        Matrix {
            data: vec![0.0; NUM_ELEMENTS],
        }
    }

    /// Create the identity matrix.
    pub fn identity() -> Self {
        Matrix::from_fn(|i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Create a matrix whose element `[i, j]` is `f(i, j)`.
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut data = Vec::with_capacity(NUM_ELEMENTS);
        for i in 0..N {
            for j in 0..N {
                data.push(f(i, j));
            }
        }
        Matrix { data }
    }

    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns [`KernelError::SizeMismatch`] unless `data.len() == N * N`.
    pub fn from_vec(data: Vec<f32>) -> Result<Self> {
        if data.len() != NUM_ELEMENTS {
            return Err(KernelError::SizeMismatch {
                expected: NUM_ELEMENTS,
                got: data.len(),
            });
        }
        Ok(Matrix { data })
    }

    /// Returns element `[i, j]`.
    ///
    /// # Panics
    /// Panics if `i` or `j` is not below `N`.
    pub fn get(&self, i: usize, j: usize) -> f32 {
        assert!(i < N && j < N, "index [{}, {}] out of bounds", i, j);
        self.data[i * N + j]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn read_view(&self) -> ReadView<'_> {
        ReadView::new(&self.data)
    }

    pub fn write_view(&mut self) -> WriteView<'_> {
        WriteView::new(&mut self.data)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(N) {
            write!(f, "[")?;
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", v)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
