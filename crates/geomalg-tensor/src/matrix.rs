use num_traits::Float;

use crate::{
    entity::{Entity, Frame, FromComponents, Index, Shape},
    error::TensorError,
};

/// A fixed-size matrix stored in row-major order.
///
/// # Type Parameters
///
/// * `T` - The numeric type of the components.
/// * `R` - The number of rows.
/// * `C` - The number of columns.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Matrix;
///
/// let m = Matrix::<f64, 2, 3>::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
/// assert_eq!(m[(1, 2)], 6.0);
/// assert_eq!(m.row(0), [1.0, 2.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<T, const R: usize, const C: usize> {
    data: [[T; C]; R],
}

impl<T: Float, const R: usize, const C: usize> Matrix<T, R, C> {
    /// Creates a matrix from its rows.
    #[inline]
    pub fn new(rows: [[T; C]; R]) -> Self {
        Self { data: rows }
    }

    /// Creates a matrix with all components set to zero.
    pub fn zeros() -> Self {
        Self::new([[T::zero(); C]; R])
    }

    /// Creates a matrix by calling `f(row, col)` for every component.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let mut data = [[T::zero(); C]; R];
        for (r, row) in data.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = f(r, c);
            }
        }
        Self::new(data)
    }

    /// Creates a matrix from a row-major slice of exactly `R * C` values.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidShape`] if the slice length is not `R * C`.
    pub fn from_slice(data: &[T]) -> Result<Self, TensorError> {
        if data.len() != R * C {
            return Err(TensorError::invalid_shape(R * C, data.len()));
        }
        Ok(Self::from_fn(|r, c| data[r * C + c]))
    }

    /// Number of rows.
    #[inline]
    pub const fn rows(&self) -> usize {
        R
    }

    /// Number of columns.
    #[inline]
    pub const fn cols(&self) -> usize {
        C
    }

    /// Returns the component at `(row, col)`, or `None` if out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns a copy of row `r`.
    ///
    /// # Panics
    ///
    /// Panics if `r >= R`.
    #[inline]
    pub fn row(&self, r: usize) -> [T; C] {
        self.data[r]
    }

    /// Returns a copy of column `c`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= C`.
    pub fn col(&self, c: usize) -> [T; R] {
        let mut col = [T::zero(); R];
        for (value, row) in col.iter_mut().zip(self.data.iter()) {
            *value = row[c];
        }
        col
    }

    /// Returns the rows of the matrix.
    #[inline]
    pub fn as_rows(&self) -> &[[T; C]; R] {
        &self.data
    }
}

impl<T: Float, const N: usize> Matrix<T, N, N> {
    /// The identity matrix.
    pub fn identity() -> Self {
        Self::from_fn(|r, c| if r == c { T::one() } else { T::zero() })
    }
}

impl<T, const R: usize, const C: usize> std::ops::Index<(usize, usize)> for Matrix<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, (r, c): (usize, usize)) -> &T {
        &self.data[r][c]
    }
}

impl<T: Float, const R: usize, const C: usize> From<[[T; C]; R]> for Matrix<T, R, C> {
    #[inline]
    fn from(rows: [[T; C]; R]) -> Self {
        Self::new(rows)
    }
}

impl<T: Float, const R: usize, const C: usize> Entity for Matrix<T, R, C> {
    type Scalar = T;
    const SHAPE: Shape = Shape::Matrix { rows: R, cols: C };

    #[inline]
    fn component(&self, index: Index) -> T {
        self.data[index.row()][index.col()]
    }
}

impl<T: Float, const R: usize, const C: usize> FromComponents for Matrix<T, R, C> {
    fn try_from_components<E, F>(_frame: Option<Frame>, mut component: F) -> Result<Self, E>
    where
        F: FnMut(Index) -> Result<T, E>,
    {
        let mut data = [[T::zero(); C]; R];
        for (r, row) in data.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = component(Index::Matrix(r, c))?;
            }
        }
        Ok(Self::new(data))
    }
}
