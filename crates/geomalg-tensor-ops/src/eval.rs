use geomalg_kernels::{
    ops::{lu_decompose_kernel, lu_determinant_kernel},
    KernelError,
};
use geomalg_tensor::{Index, Shape};
use num_traits::Float;

use crate::{
    error::EvalError,
    expr::{Expr, Node},
    operator::Operator,
    policy::NumericPolicy,
};

/// Largest matrix size whose determinant and inverse are computed by cofactor expansion.
///
/// Above it the operand is gathered once per call and factorized.
pub const CLOSED_FORM_MAX: usize = 6;

impl<T: Float> Expr<'_, T> {
    /// Computes the component at `index` with the default [`NumericPolicy`].
    ///
    /// Only the operand components the operator needs are read; nothing is cached between
    /// calls.
    ///
    /// # Errors
    ///
    /// * [`EvalError::IndexOutOfBounds`] if `index` is not a component of the expression.
    /// * [`EvalError::ZeroMagnitude`] when normalizing a vector of zero magnitude.
    /// * [`EvalError::Singular`] when inverting a singular matrix.
    pub fn evaluate(&self, index: Index) -> Result<T, EvalError> {
        self.evaluate_with(index, &NumericPolicy::default())
    }

    /// Computes the component at `index` with the tolerances of `policy`.
    ///
    /// # Errors
    ///
    /// See [`Expr::evaluate`].
    pub fn evaluate_with(&self, index: Index, policy: &NumericPolicy) -> Result<T, EvalError> {
        if !self.shape().contains(index) {
            return Err(EvalError::IndexOutOfBounds {
                index,
                shape: self.shape(),
            });
        }
        self.eval(index, policy)
    }

    // `index` is within the shape of the node from here on
    fn eval(&self, index: Index, policy: &NumericPolicy) -> Result<T, EvalError> {
        match &self.node {
            Node::Leaf(source) => Ok(source.read(index)),
            Node::Constant(value) => Ok(*value),
            Node::Unary(op, a) => eval_unary(*op, a, index, policy),
            Node::Binary(op, a, b) => eval_binary(*op, a, b, index, policy),
        }
    }
}

fn eval_unary<T: Float>(
    op: Operator,
    a: &Expr<'_, T>,
    index: Index,
    policy: &NumericPolicy,
) -> Result<T, EvalError> {
    match op {
        Operator::Negate => Ok(-a.eval(index, policy)?),
        Operator::AbsoluteValue => Ok(a.eval(index, policy)?.abs()),
        Operator::Reciprocal => Ok(a.eval(Index::Scalar, policy)?.recip()),
        Operator::Transpose => a.eval(Index::Matrix(index.col(), index.row()), policy),
        Operator::Trace => (0..size(a.shape())).try_fold(T::zero(), |acc, i| {
            Ok(acc + a.eval(Index::Matrix(i, i), policy)?)
        }),
        Operator::MagnitudeSqrd => magnitude_sqrd(a, policy),
        Operator::Magnitude => magnitude(a, policy),
        Operator::Normalize => {
            let magnitude = magnitude(a, policy)?;
            if magnitude <= policy.zero_magnitude() {
                return Err(EvalError::ZeroMagnitude {
                    magnitude: magnitude.to_f64().unwrap_or(f64::NAN),
                });
            }
            Ok(a.eval(index, policy)? / magnitude)
        }
        Operator::Determinant => determinant(a, policy),
        Operator::Inverse => inverse_component(a, index.row(), index.col(), policy),
        _ => unreachable!("{op} is not a unary operator"),
    }
}

fn eval_binary<T: Float>(
    op: Operator,
    a: &Expr<'_, T>,
    b: &Expr<'_, T>,
    index: Index,
    policy: &NumericPolicy,
) -> Result<T, EvalError> {
    match op {
        Operator::Add => Ok(a.eval(index, policy)? + b.eval(index, policy)?),
        Operator::Subtract => Ok(a.eval(index, policy)? - b.eval(index, policy)?),
        Operator::Scale => Ok(a.eval(Index::Scalar, policy)? * b.eval(index, policy)?),
        Operator::Divide => Ok(a.eval(index, policy)? / b.eval(Index::Scalar, policy)?),
        Operator::DotProduct => (0..size(a.shape())).try_fold(T::zero(), |acc, i| {
            Ok(acc + a.eval(Index::Vector(i), policy)? * b.eval(Index::Vector(i), policy)?)
        }),
        Operator::CrossProduct => {
            let j = (index.row() + 1) % 3;
            let k = (index.row() + 2) % 3;
            Ok(a.eval(Index::Vector(j), policy)? * b.eval(Index::Vector(k), policy)?
                - a.eval(Index::Vector(k), policy)? * b.eval(Index::Vector(j), policy)?)
        }
        Operator::ExteriorProductArea => {
            Ok(a.eval(Index::Vector(0), policy)? * b.eval(Index::Vector(1), policy)?
                - a.eval(Index::Vector(1), policy)? * b.eval(Index::Vector(0), policy)?)
        }
        Operator::MatrixProduct => {
            let (i, j) = (index.row(), index.col());
            (0..inner(a.shape())).try_fold(T::zero(), |acc, k| {
                Ok(acc + a.eval(Index::Matrix(i, k), policy)? * b.eval(Index::Matrix(k, j), policy)?)
            })
        }
        Operator::MatrixVectorProduct => {
            let i = index.row();
            (0..inner(a.shape())).try_fold(T::zero(), |acc, k| {
                Ok(acc + a.eval(Index::Matrix(i, k), policy)? * b.eval(Index::Vector(k), policy)?)
            })
        }
        _ => unreachable!("{op} is not a binary operator"),
    }
}

/// Dimension of a vector or number of rows of a matrix.
fn size(shape: Shape) -> usize {
    match shape {
        Shape::Scalar => 1,
        Shape::Vector(dim) => dim,
        Shape::Matrix { rows, .. } => rows,
    }
}

/// Number of columns of the left operand of a product.
fn inner(shape: Shape) -> usize {
    match shape {
        Shape::Matrix { cols, .. } => cols,
        other => size(other),
    }
}

fn magnitude_sqrd<T: Float>(a: &Expr<'_, T>, policy: &NumericPolicy) -> Result<T, EvalError> {
    (0..size(a.shape())).try_fold(T::zero(), |acc, i| {
        let x = a.eval(Index::Vector(i), policy)?;
        Ok(acc + x * x)
    })
}

/// Euclidean norm, scaled by the largest component so the sum of squares neither
/// overflows nor underflows for finite operands.
fn magnitude<T: Float>(a: &Expr<'_, T>, policy: &NumericPolicy) -> Result<T, EvalError> {
    let n = size(a.shape());
    let largest = (0..n).try_fold(T::zero(), |acc, i| {
        Ok::<_, EvalError>(acc.max(a.eval(Index::Vector(i), policy)?.abs()))
    })?;
    if largest == T::zero() || largest.is_infinite() {
        return Ok(largest);
    }
    let scaled = (0..n).try_fold(T::zero(), |acc, i| {
        let x = a.eval(Index::Vector(i), policy)? / largest;
        Ok::<_, EvalError>(acc + x * x)
    })?;
    Ok(scaled.sqrt() * largest)
}

/// Rows and columns of a square sub-matrix of an operand, at most [`CLOSED_FORM_MAX`] wide.
#[derive(Debug, Clone, Copy)]
struct Minor {
    rows: [usize; CLOSED_FORM_MAX],
    cols: [usize; CLOSED_FORM_MAX],
    len: usize,
}

impl Minor {
    fn full(n: usize) -> Self {
        let mut rows = [0; CLOSED_FORM_MAX];
        for (i, r) in rows.iter_mut().enumerate() {
            *r = i;
        }
        Self {
            rows,
            cols: rows,
            len: n.min(CLOSED_FORM_MAX),
        }
    }

    /// The minor with the row at position `row` and the column at position `col` removed.
    fn without(&self, row: usize, col: usize) -> Self {
        let mut minor = Self {
            rows: [0; CLOSED_FORM_MAX],
            cols: [0; CLOSED_FORM_MAX],
            len: self.len - 1,
        };
        let kept_rows = (0..self.len).filter(|&p| p != row).map(|p| self.rows[p]);
        for (slot, r) in minor.rows.iter_mut().zip(kept_rows) {
            *slot = r;
        }
        let kept_cols = (0..self.len).filter(|&p| p != col).map(|p| self.cols[p]);
        for (slot, c) in minor.cols.iter_mut().zip(kept_cols) {
            *slot = c;
        }
        minor
    }
}

/// Determinant of a minor of `a` by cofactor expansion along its first row.
fn laplace<T: Float>(
    a: &Expr<'_, T>,
    minor: &Minor,
    policy: &NumericPolicy,
) -> Result<T, EvalError> {
    let at = |p: usize, q: usize| a.eval(Index::Matrix(minor.rows[p], minor.cols[q]), policy);
    match minor.len {
        0 => Ok(T::one()),
        1 => at(0, 0),
        2 => Ok(at(0, 0)? * at(1, 1)? - at(0, 1)? * at(1, 0)?),
        n => {
            let mut det = T::zero();
            for q in 0..n {
                let pivot = at(0, q)?;
                let cofactor = laplace(a, &minor.without(0, q), policy)?;
                det = if q % 2 == 0 {
                    det + pivot * cofactor
                } else {
                    det - pivot * cofactor
                };
            }
            Ok(det)
        }
    }
}

/// Reads a square operand into a row-major buffer for the dense kernels.
fn gather<T: Float>(a: &Expr<'_, T>, n: usize, policy: &NumericPolicy) -> Result<Vec<T>, EvalError> {
    (0..n * n)
        .map(|p| a.eval(Index::Matrix(p / n, p % n), policy))
        .collect()
}

fn determinant<T: Float>(a: &Expr<'_, T>, policy: &NumericPolicy) -> Result<T, EvalError> {
    let n = size(a.shape());
    if n <= CLOSED_FORM_MAX {
        return laplace(a, &Minor::full(n), policy);
    }
    log::debug!("determinant of a {n}x{n} operand through LU factorization");
    let data = gather(a, n, policy)?;
    Ok(lu_determinant_kernel(&data, n)?)
}

fn inverse_component<T: Float>(
    a: &Expr<'_, T>,
    row: usize,
    col: usize,
    policy: &NumericPolicy,
) -> Result<T, EvalError> {
    let n = size(a.shape());
    let tolerance = policy.singular::<T>();

    if n <= CLOSED_FORM_MAX {
        let full = Minor::full(n);
        let det = laplace(a, &full, policy)?;
        if det.abs() <= tolerance {
            return Err(EvalError::Singular(Operator::Inverse));
        }
        // inverse(row, col) = cofactor(col, row) / det
        let cofactor = laplace(a, &full.without(col, row), policy)?;
        let sign = if (row + col) % 2 == 0 {
            T::one()
        } else {
            -T::one()
        };
        return Ok(sign * cofactor / det);
    }

    log::debug!("inverse of a {n}x{n} operand through LU factorization");
    let data = gather(a, n, policy)?;
    let factors = lu_decompose_kernel(&data, n, tolerance).map_err(|e| match e {
        KernelError::Singular(_) => EvalError::Singular(Operator::Inverse),
        e => EvalError::KernelError(e),
    })?;
    Ok(factors.inverse_column(col)?[row])
}
