use num_traits::Float;

/// Numeric tolerances applied while evaluating an expression.
///
/// The default policy treats only exact zeros as degenerate.
///
/// # Example
///
/// ```
/// use geomalg_tensor_ops::NumericPolicy;
///
/// let policy = NumericPolicy::default().with_singular_tolerance(1e-9);
/// assert_eq!(policy.singular_tolerance, 1e-9);
/// assert_eq!(policy.zero_magnitude_tolerance, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericPolicy {
    /// A matrix is singular when the magnitude of its determinant (closed form) or of a
    /// pivot (LU path) is at or below this value.
    pub singular_tolerance: f64,
    /// A vector cannot be normalized when its magnitude is at or below this value.
    pub zero_magnitude_tolerance: f64,
}

impl Default for NumericPolicy {
    fn default() -> Self {
        Self {
            singular_tolerance: 0.0,
            zero_magnitude_tolerance: 0.0,
        }
    }
}

impl NumericPolicy {
    /// Sets the singular tolerance.
    pub fn with_singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    /// Sets the zero magnitude tolerance.
    pub fn with_zero_magnitude_tolerance(mut self, tolerance: f64) -> Self {
        self.zero_magnitude_tolerance = tolerance;
        self
    }

    pub(crate) fn singular<T: Float>(&self) -> T {
        T::from(self.singular_tolerance).unwrap_or_else(T::zero)
    }

    pub(crate) fn zero_magnitude<T: Float>(&self) -> T {
        T::from(self.zero_magnitude_tolerance).unwrap_or_else(T::zero)
    }
}
