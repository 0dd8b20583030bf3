use geomalg_tensor::{FromComponents, Index, Shape};
use num_traits::Float;

use crate::{
    error::{ConformanceError, TensorOpsError},
    expr::Expr,
    policy::NumericPolicy,
};

impl<T: Float> Expr<'_, T> {
    /// Builds a new entity of type `E` from the expression with the default
    /// [`NumericPolicy`].
    ///
    /// Every component is evaluated exactly once, in row-major order. `E` only needs the
    /// shape of the expression, so a vector-shaped computation may build a point.
    ///
    /// # Errors
    ///
    /// * [`ConformanceError::TargetShapeMismatch`] if `E` does not have the shape of the
    ///   expression. Nothing is evaluated in that case.
    /// * The first [`crate::EvalError`] raised by a component; no partially built entity is
    ///   returned.
    ///
    /// # Example
    ///
    /// ```
    /// use geomalg_tensor::{Point2, Vector2};
    /// use geomalg_tensor_ops::Expr;
    ///
    /// let p = Point2::new([1.0, 2.0]);
    /// let v = Vector2::new([3.0, 4.0]);
    ///
    /// let q: Point2<f64> = Expr::leaf(&p).add(&v).unwrap().construct().unwrap();
    /// assert_eq!(q, Point2::new([4.0, 6.0]));
    /// ```
    pub fn construct<E>(&self) -> Result<E, TensorOpsError>
    where
        E: FromComponents<Scalar = T>,
    {
        self.construct_with(&NumericPolicy::default())
    }

    /// Builds a new entity of type `E` with the tolerances of `policy`.
    ///
    /// # Errors
    ///
    /// See [`Expr::construct`].
    pub fn construct_with<E>(&self, policy: &NumericPolicy) -> Result<E, TensorOpsError>
    where
        E: FromComponents<Scalar = T>,
    {
        if E::SHAPE != self.shape() {
            return Err(ConformanceError::TargetShapeMismatch {
                target: E::SHAPE,
                found: self.shape(),
            }
            .into());
        }

        log::trace!(
            "constructing {} components of a {} entity",
            E::SHAPE.len(),
            E::SHAPE
        );

        let entity = E::try_from_components(self.frame(), |index| {
            self.evaluate_with(index, policy)
        })?;
        Ok(entity)
    }

    /// Evaluates a rank-0 expression with the default [`NumericPolicy`].
    ///
    /// # Errors
    ///
    /// * [`ConformanceError::TargetShapeMismatch`] if the expression is not a scalar.
    /// * The [`crate::EvalError`] raised by the evaluation.
    pub fn scalar(&self) -> Result<T, TensorOpsError> {
        self.scalar_with(&NumericPolicy::default())
    }

    /// Evaluates a rank-0 expression with the tolerances of `policy`.
    ///
    /// # Errors
    ///
    /// See [`Expr::scalar`].
    pub fn scalar_with(&self, policy: &NumericPolicy) -> Result<T, TensorOpsError> {
        if self.shape() != Shape::Scalar {
            return Err(ConformanceError::TargetShapeMismatch {
                target: Shape::Scalar,
                found: self.shape(),
            }
            .into());
        }
        Ok(self.evaluate_with(Index::Scalar, policy)?)
    }
}
