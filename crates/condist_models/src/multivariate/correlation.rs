//! Correlation matrices and their Cholesky factors.
//!
//! ## Mathematical Background
//!
//! For a positive definite correlation matrix `C = L Lᵀ` with `L` lower
//! triangular:
//!
//! ```text
//! W = L Z,  Z ~ N(0, I)   =>   W ~ N(0, C)
//! zᵀ C⁻¹ z = |y|²,  where L y = z
//! det C = Π L_ii²
//! ```

use condist_core::types::DistributionError;
use thiserror::Error;

const TOLERANCE: f64 = 1e-10;

/// Error types for correlation matrix validation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CorrelationError {
    /// Matrix is not positive definite.
    #[error("Correlation matrix is not positive definite")]
    NotPositiveDefinite,

    /// Wrong number of elements for the declared dimension.
    #[error("Invalid matrix dimensions: expected {expected} elements, got {got}")]
    InvalidDimensions {
        /// Expected number of elements
        expected: usize,
        /// Number of elements provided
        got: usize,
    },

    /// Diagonal element differs from 1.
    #[error("Diagonal element at index {index} is {value}, expected 1.0")]
    InvalidDiagonal {
        /// Diagonal position
        index: usize,
        /// Offending value
        value: f64,
    },

    /// `C[i][j] != C[j][i]`.
    #[error("Matrix is not symmetric at ({i}, {j})")]
    NotSymmetric {
        /// Row
        i: usize,
        /// Column
        j: usize,
    },

    /// Off-diagonal element outside `[-1, 1]`.
    #[error("Correlation at ({i}, {j}) is {value}, must be in [-1, 1]")]
    OutOfRange {
        /// Row
        i: usize,
        /// Column
        j: usize,
        /// Offending value
        value: f64,
    },
}

impl From<CorrelationError> for DistributionError {
    fn from(err: CorrelationError) -> Self {
        DistributionError::InvalidParameter {
            name: "correlation",
            reason: err.to_string(),
        }
    }
}

/// Validated correlation matrix, stored row-major.
///
/// # Example
///
/// ```
/// use condist_models::multivariate::CorrelationMatrix;
///
/// let corr = CorrelationMatrix::new(&[1.0, 0.5, 0.5, 1.0], 2).unwrap();
/// let l = corr.cholesky().unwrap();
/// assert!((l.get(1, 1) - 0.75_f64.sqrt()).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorrelationMatrix {
    data: Vec<f64>,
    dim: usize,
}

impl CorrelationMatrix {
    /// Create a correlation matrix from `dim * dim` row-major elements.
    ///
    /// # Errors
    ///
    /// Fails unless the matrix is square, symmetric, has a unit diagonal and
    /// off-diagonal elements in `[-1, 1]`. Positive definiteness is checked
    /// by [`cholesky`](Self::cholesky).
    pub fn new(data: &[f64], dim: usize) -> Result<Self, CorrelationError> {
        let expected = dim * dim;
        if data.len() != expected {
            return Err(CorrelationError::InvalidDimensions {
                expected,
                got: data.len(),
            });
        }

        for i in 0..dim {
            let diag = data[i * dim + i];
            if !((diag - 1.0).abs() <= TOLERANCE) {
                return Err(CorrelationError::InvalidDiagonal {
                    index: i,
                    value: diag,
                });
            }
        }

        for i in 0..dim {
            for j in (i + 1)..dim {
                let val_ij = data[i * dim + j];
                let val_ji = data[j * dim + i];
                if !((val_ij - val_ji).abs() <= TOLERANCE) {
                    return Err(CorrelationError::NotSymmetric { i, j });
                }
                if !(-1.0..=1.0).contains(&val_ij) {
                    return Err(CorrelationError::OutOfRange {
                        i,
                        j,
                        value: val_ij,
                    });
                }
            }
        }

        Ok(Self {
            data: data.to_vec(),
            dim,
        })
    }

    /// Identity correlation (independent coordinates).
    pub fn identity(dim: usize) -> Self {
        let mut data = vec![0.0; dim * dim];
        for i in 0..dim {
            data[i * dim + i] = 1.0;
        }
        Self { data, dim }
    }

    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.data[i * self.dim + j]
    }

    /// Principal sub-matrix over `indices`, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` or `DuplicateIndex` for invalid indices.
    pub fn select(&self, indices: &[usize]) -> Result<Self, DistributionError> {
        DistributionError::check_indices(self.dim, indices)?;
        let data = indices
            .iter()
            .flat_map(|&i| indices.iter().map(move |&j| (i, j)))
            .map(|(i, j)| self.get(i, j))
            .collect();
        Ok(Self {
            data,
            dim: indices.len(),
        })
    }

    /// Lower triangular `L` with `C = L Lᵀ`.
    ///
    /// # Errors
    ///
    /// Returns `NotPositiveDefinite` when a pivot is not strictly positive.
    pub fn cholesky(&self) -> Result<CholeskyFactor, CorrelationError> {
        let n = self.dim;
        let mut lower = vec![0.0; n * n];

        for i in 0..n {
            for j in 0..=i {
                let sum: f64 = (0..j).map(|k| lower[i * n + k] * lower[j * n + k]).sum();
                if j == i {
                    let diag = self.get(i, i) - sum;
                    if !(diag > 0.0) {
                        return Err(CorrelationError::NotPositiveDefinite);
                    }
                    lower[i * n + i] = diag.sqrt();
                } else {
                    lower[i * n + j] = (self.get(i, j) - sum) / lower[j * n + j];
                }
            }
        }

        Ok(CholeskyFactor { data: lower, dim: n })
    }
}

/// Lower triangular Cholesky factor of a correlation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CholeskyFactor {
    data: Vec<f64>,
    dim: usize,
}

impl CholeskyFactor {
    /// Matrix dimension.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Element at `(i, j)`; zero above the diagonal.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if j > i {
            0.0
        } else {
            self.data[i * self.dim + j]
        }
    }

    /// `Π L_ii`, the square root of `det C`.
    pub fn diagonal_product(&self) -> f64 {
        (0..self.dim).map(|i| self.data[i * self.dim + i]).product()
    }

    /// Overwrite `z` with `L z`, correlating independent standard normals.
    ///
    /// # Panics
    ///
    /// Panics if `z.len() != self.dim()`.
    pub fn transform_inplace(&self, z: &mut [f64]) {
        assert_eq!(z.len(), self.dim, "vector length must match matrix dimension");
        // Row i only reads z[..=i], so walking rows bottom-up needs no buffer
        for i in (0..self.dim).rev() {
            z[i] = (0..=i).map(|j| self.data[i * self.dim + j] * z[j]).sum();
        }
    }

    /// Overwrite `z` with `y` solving `L y = z` (forward substitution).
    ///
    /// # Panics
    ///
    /// Panics if `z.len() != self.dim()`.
    pub fn solve_lower_inplace(&self, z: &mut [f64]) {
        assert_eq!(z.len(), self.dim, "vector length must match matrix dimension");
        for i in 0..self.dim {
            let sum: f64 = (0..i).map(|j| self.data[i * self.dim + j] * z[j]).sum();
            z[i] = (z[i] - sum) / self.data[i * self.dim + i];
        }
    }
}
