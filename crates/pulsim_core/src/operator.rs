//! Dense operators for PULSIM
//!
//! Gantree: L1_Operator → Operator
//!
//! A minimal square operator with subsystem dimension metadata. Only what
//! the noise pipeline consumes is provided: elementary constructors,
//! tensor product, adjoint, products and linear combinations.

use crate::constants::numerics::OPERATOR_TOLERANCE;
use crate::error::{PulsimError, PulsimResult};
use ndarray::{linalg::kron, Array2};
use num_complex::Complex64;
use std::fmt;

/// Square operator on a composite Hilbert space
/// Gantree: Operator // 연산자
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    /// Matrix elements, `dim x dim`
    matrix: Array2<Complex64>,

    /// Dimension of each subsystem, product equals `dim`
    /// Gantree: dims: Vec<usize> // 부분계 차원
    dims: Vec<usize>,
}

impl Operator {
    // ========================================================================
    // Constructors
    // ========================================================================

    /// Create an operator with explicit subsystem dimensions
    /// Gantree: new(matrix,dims) -> Result<Self> // 생성+검증
    pub fn new(matrix: Array2<Complex64>, dims: Vec<usize>) -> PulsimResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(PulsimError::DimensionMismatch(format!(
                "operator must be square, got {}x{}",
                rows, cols
            )));
        }
        let total: usize = dims.iter().product();
        if dims.is_empty() || total != rows {
            return Err(PulsimError::DimensionMismatch(format!(
                "dims {:?} do not describe a {}x{} matrix",
                dims, rows, cols
            )));
        }
        Ok(Self { matrix, dims })
    }

    /// Create a single-subsystem operator from a square matrix
    pub fn from_matrix(matrix: Array2<Complex64>) -> PulsimResult<Self> {
        let d = matrix.nrows();
        Self::new(matrix, vec![d])
    }

    /// Identity of dimension `d`
    /// Gantree: identity(d) -> Self // 항등
    pub fn identity(d: usize) -> Self {
        Self {
            matrix: Array2::eye(d),
            dims: vec![d],
        }
    }

    /// Lowering operator `a` of dimension `d`
    /// Gantree: destroy(d) -> Self // 소멸 연산자
    pub fn destroy(d: usize) -> Self {
        let mut matrix = Array2::zeros((d, d));
        for n in 1..d {
            matrix[[n - 1, n]] = Complex64::new((n as f64).sqrt(), 0.0);
        }
        Self {
            matrix,
            dims: vec![d],
        }
    }

    /// Raising operator `a†` of dimension `d`
    pub fn create(d: usize) -> Self {
        Self::destroy(d).dag()
    }

    /// Number operator `a†a` of dimension `d`
    /// Gantree: num(d) -> Self // 수 연산자
    pub fn num(d: usize) -> Self {
        let mut matrix = Array2::zeros((d, d));
        for n in 0..d {
            matrix[[n, n]] = Complex64::new(n as f64, 0.0);
        }
        Self {
            matrix,
            dims: vec![d],
        }
    }

    /// Pauli Z
    pub fn sigmaz() -> Self {
        let mut matrix = Array2::zeros((2, 2));
        matrix[[0, 0]] = Complex64::new(1.0, 0.0);
        matrix[[1, 1]] = Complex64::new(-1.0, 0.0);
        Self {
            matrix,
            dims: vec![2],
        }
    }

    /// Pauli X
    pub fn sigmax() -> Self {
        let mut matrix = Array2::zeros((2, 2));
        matrix[[0, 1]] = Complex64::new(1.0, 0.0);
        matrix[[1, 0]] = Complex64::new(1.0, 0.0);
        Self {
            matrix,
            dims: vec![2],
        }
    }

    /// Projector `Σ |k⟩⟨k|` onto the given levels of a `d`-level system
    /// Gantree: projector(d,levels) -> Result<Self> // 사영 연산자
    pub fn projector(d: usize, levels: &[usize]) -> PulsimResult<Self> {
        let mut matrix = Array2::zeros((d, d));
        for &k in levels {
            if k >= d {
                return Err(PulsimError::DimensionMismatch(format!(
                    "level {} does not exist in a {}-level system",
                    k, d
                )));
            }
            matrix[[k, k]] = Complex64::new(1.0, 0.0);
        }
        Ok(Self {
            matrix,
            dims: vec![d],
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Matrix elements
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Subsystem dimensions
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Total dimension
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of subsystems the operator acts on
    pub fn num_subsystems(&self) -> usize {
        self.dims.len()
    }

    /// Check for a 2x2 single-qubit operator
    pub fn is_single_qubit(&self) -> bool {
        self.dims == [2]
    }

    /// Check whether every element vanishes
    pub fn is_zero(&self) -> bool {
        self.matrix.iter().all(|c| c.norm() <= OPERATOR_TOLERANCE)
    }

    /// Element-wise comparison within `tol`
    pub fn approx_eq(&self, other: &Operator, tol: f64) -> bool {
        self.dims == other.dims
            && self
                .matrix
                .iter()
                .zip(other.matrix.iter())
                .all(|(a, b)| (a - b).norm() <= tol)
    }

    // ========================================================================
    // Algebra
    // ========================================================================

    /// Tensor (Kronecker) product, dims are concatenated
    /// Gantree: tensor(&self,&other) -> Self // 텐서곱
    pub fn tensor(&self, other: &Operator) -> Self {
        let mut dims = self.dims.clone();
        dims.extend_from_slice(&other.dims);
        Self {
            matrix: kron(&self.matrix, &other.matrix),
            dims,
        }
    }

    /// Conjugate transpose
    /// Gantree: dag(&self) -> Self // 수반
    pub fn dag(&self) -> Self {
        Self {
            matrix: self.matrix.t().mapv(|c| c.conj()),
            dims: self.dims.clone(),
        }
    }

    /// Matrix product `self · other`
    pub fn matmul(&self, other: &Operator) -> PulsimResult<Self> {
        self.check_same_dims(other, "multiply")?;
        Ok(Self {
            matrix: self.matrix.dot(&other.matrix),
            dims: self.dims.clone(),
        })
    }

    /// Sum `self + other`
    pub fn add(&self, other: &Operator) -> PulsimResult<Self> {
        self.check_same_dims(other, "add")?;
        Ok(Self {
            matrix: &self.matrix + &other.matrix,
            dims: self.dims.clone(),
        })
    }

    /// Difference `self - other`
    pub fn sub(&self, other: &Operator) -> PulsimResult<Self> {
        self.check_same_dims(other, "subtract")?;
        Ok(Self {
            matrix: &self.matrix - &other.matrix,
            dims: self.dims.clone(),
        })
    }

    /// Multiply every element by a real factor
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            matrix: self.matrix.mapv(|c| c * factor),
            dims: self.dims.clone(),
        }
    }

    fn check_same_dims(&self, other: &Operator, op: &str) -> PulsimResult<()> {
        if self.dims != other.dims {
            return Err(PulsimError::DimensionMismatch(format!(
                "cannot {} operators with dims {:?} and {:?}",
                op, self.dims, other.dims
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator(dims={:?}, shape={}x{})", self.dims, self.dim(), self.dim())
    }
}

// ============================================================================
// Tests
// ============================================================================
