use num_traits::Float;

use crate::error::KernelError;

/// LU factorization `P A = L U` of a square matrix with partial pivoting.
///
/// `L` (unit diagonal) and `U` are packed into one row-major buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct LuFactors<T> {
    lu: Vec<T>,
    permutation: Vec<usize>,
    even: bool,
    n: usize,
}

impl<T: Float> LuFactors<T> {
    /// Size of the factorized matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Row permutation: row `i` of `P A` is row `permutation()[i]` of `A`.
    #[inline]
    pub fn permutation(&self) -> &[usize] {
        &self.permutation
    }

    /// Determinant of the factorized matrix.
    pub fn determinant(&self) -> T {
        let diagonal = (0..self.n).fold(T::one(), |acc, i| acc * self.lu[i * self.n + i]);
        if self.even {
            diagonal
        } else {
            -diagonal
        }
    }

    /// Solves `A x = b`.
    ///
    /// # Errors
    ///
    /// If `b` does not have `n` elements, a `LengthMismatch` error is returned.
    pub fn solve(&self, b: &[T]) -> Result<Vec<T>, KernelError> {
        let n = self.n;
        if b.len() != n {
            return Err(KernelError::LengthMismatch(n, b.len()));
        }

        let mut x: Vec<T> = self.permutation.iter().map(|&p| b[p]).collect();

        // forward substitution with the unit lower triangle
        for i in 0..n {
            let row = &self.lu[i * n..i * n + i];
            let acc = row
                .iter()
                .zip(x.iter())
                .fold(T::zero(), |acc, (&l, &xj)| acc + l * xj);
            x[i] = x[i] - acc;
        }

        // back substitution with the upper triangle
        for i in (0..n).rev() {
            let acc = ((i + 1)..n).fold(T::zero(), |acc, j| acc + self.lu[i * n + j] * x[j]);
            x[i] = (x[i] - acc) / self.lu[i * n + i];
        }

        Ok(x)
    }

    /// Column `col` of the inverse of the factorized matrix.
    ///
    /// # Errors
    ///
    /// If `col` is not a valid column, a `LengthMismatch` error is returned.
    pub fn inverse_column(&self, col: usize) -> Result<Vec<T>, KernelError> {
        if col >= self.n {
            return Err(KernelError::LengthMismatch(self.n, col + 1));
        }
        let mut unit = vec![T::zero(); self.n];
        unit[col] = T::one();
        self.solve(&unit)
    }
}

/// Computes the LU factorization of an `n x n` row-major matrix with partial pivoting.
///
/// # Arguments
///
/// * `a` - The matrix in row-major order.
/// * `n` - The number of rows and columns.
/// * `tolerance` - A pivot whose magnitude is at or below this value is treated as zero.
///
/// # Returns
///
/// The packed factors.
///
/// # Errors
///
/// * If `a` does not have `n * n` elements, a `LengthMismatch` error is returned.
/// * If a column has no pivot above `tolerance`, a `Singular` error is returned.
///
/// Example:
/// ```
/// use geomalg_kernels::ops::lu_decompose_kernel;
///
/// let a = [0.0, 1.0, 2.0, 3.0];
/// let lu = lu_decompose_kernel(&a, 2, 0.0).unwrap();
/// assert_eq!(lu.permutation(), &[1, 0]);
/// assert_eq!(lu.determinant(), -2.0);
/// ```
pub fn lu_decompose_kernel<T>(a: &[T], n: usize, tolerance: T) -> Result<LuFactors<T>, KernelError>
where
    T: Float,
{
    if a.len() != n * n {
        return Err(KernelError::LengthMismatch(n * n, a.len()));
    }

    let mut lu = a.to_vec();
    let mut permutation: Vec<usize> = (0..n).collect();
    let mut even = true;

    for k in 0..n {
        // a NaN candidate is taken as the pivot so it propagates through the factors
        let (pivot_row, pivot_abs) = (k..n).map(|r| (r, lu[r * n + k].abs())).fold(
            (k, T::zero()),
            |best, cur| {
                if !best.1.is_nan() && (cur.1.is_nan() || cur.1 > best.1) {
                    cur
                } else {
                    best
                }
            },
        );

        if pivot_abs <= tolerance {
            return Err(KernelError::Singular(k));
        }

        if pivot_row != k {
            for c in 0..n {
                lu.swap(k * n + c, pivot_row * n + c);
            }
            permutation.swap(k, pivot_row);
            even = !even;
        }

        let pivot = lu[k * n + k];
        for r in (k + 1)..n {
            let factor = lu[r * n + k] / pivot;
            lu[r * n + k] = factor;
            for c in (k + 1)..n {
                lu[r * n + c] = lu[r * n + c] - factor * lu[k * n + c];
            }
        }
    }

    Ok(LuFactors {
        lu,
        permutation,
        even,
        n,
    })
}

/// Computes the determinant of an `n x n` row-major matrix through its LU factorization.
///
/// A matrix with a zero column after elimination has determinant zero. A matrix holding a
/// NaN has a NaN determinant.
///
/// # Errors
///
/// If `a` does not have `n * n` elements, a `LengthMismatch` error is returned.
///
/// Example:
/// ```
/// use geomalg_kernels::ops::lu_determinant_kernel;
///
/// let a = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(lu_determinant_kernel(&a, 2).unwrap(), -2.0);
/// ```
pub fn lu_determinant_kernel<T>(a: &[T], n: usize) -> Result<T, KernelError>
where
    T: Float,
{
    match lu_decompose_kernel(a, n, T::zero()) {
        Ok(factors) => Ok(factors.determinant()),
        Err(KernelError::Singular(_)) if a.iter().any(|x| x.is_nan()) => Ok(T::nan()),
        Err(KernelError::Singular(_)) => Ok(T::zero()),
        Err(e) => Err(e),
    }
}
