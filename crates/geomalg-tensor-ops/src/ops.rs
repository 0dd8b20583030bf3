use geomalg_tensor::{Entity, FromComponents};

use crate::{error::TensorOpsError, expr::Expr};

/// Adds two entities of identical shape.
///
/// # Arguments
///
/// * `a` - The left operand.
/// * `b` - The right operand.
///
/// # Returns
///
/// A new entity of type `R` with `r(i) = a(i) + b(i)`.
///
/// # Errors
///
/// If the shapes or reference frames of the operands differ, or if `R` does not have
/// their shape, an error is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::{Point2, Vector2};
/// use geomalg_tensor_ops::ops::add;
///
/// let p = Point2::new([1.0, 2.0]);
/// let v = Vector2::new([3.0, 4.0]);
/// let q: Point2<f64> = add(&p, &v).unwrap();
/// assert_eq!(q.as_array(), &[4.0, 6.0]);
/// ```
pub fn add<R, A, B>(a: &A, b: &B) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    B: Entity<Scalar = A::Scalar> + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).add(b)?.construct()?)
}

/// Subtracts two entities of identical shape.
///
/// # Errors
///
/// See [`add`].
///
/// # Example
///
/// ```
/// use geomalg_tensor::{Point2, Vector2};
/// use geomalg_tensor_ops::ops::sub;
///
/// let p = Point2::new([4.0, 6.0]);
/// let q = Point2::new([1.0, 2.0]);
/// let v: Vector2<f64> = sub(&p, &q).unwrap();
/// assert_eq!(v.as_array(), &[3.0, 4.0]);
/// ```
pub fn sub<R, A, B>(a: &A, b: &B) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    B: Entity<Scalar = A::Scalar> + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).sub(b)?.construct()?)
}

/// Negates every component of an entity.
///
/// # Errors
///
/// If `R` does not have the shape of `a`, an error is returned.
pub fn negate<R, A>(a: &A) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).negate()?.construct()?)
}

/// Multiplies every component of an entity by `factor`.
///
/// # Errors
///
/// If `R` does not have the shape of `a`, an error is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Matrix2;
/// use geomalg_tensor_ops::ops::scale;
///
/// let m = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
/// let r: Matrix2<f64> = scale(0.5, &m).unwrap();
/// assert_eq!(r, Matrix2::new([[0.5, 1.0], [1.5, 2.0]]));
/// ```
pub fn scale<R, A>(factor: A::Scalar, a: &A) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).scale(Expr::constant(factor))?.construct()?)
}

/// Divides every component of an entity by `divisor`.
///
/// Division by zero follows IEEE 754.
///
/// # Errors
///
/// If `R` does not have the shape of `a`, an error is returned.
pub fn divide<R, A>(a: &A, divisor: A::Scalar) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).div(Expr::constant(divisor))?.construct()?)
}

/// Computes the dot product of two vectors of equal dimension.
///
/// # Errors
///
/// If the operands are not rank-1 entities of equal dimension in the same frame, an error
/// is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Vector3;
/// use geomalg_tensor_ops::ops::dot_product;
///
/// let a = Vector3::new([1.0, 2.0, 3.0]);
/// let b = Vector3::new([4.0, 5.0, 6.0]);
/// assert_eq!(dot_product(&a, &b).unwrap(), 32.0);
/// ```
pub fn dot_product<A, B>(a: &A, b: &B) -> Result<A::Scalar, TensorOpsError>
where
    A: Entity + Sync,
    B: Entity<Scalar = A::Scalar> + Sync,
{
    Expr::leaf(a).dot_product(b)?.scalar()
}

/// Computes the cross product of two 3-vectors.
///
/// # Errors
///
/// If the operands are not 3-vectors in the same frame, or if `R` is not a 3-vector, an
/// error is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Vector3;
/// use geomalg_tensor_ops::ops::cross_product;
///
/// let a = Vector3::new([1.0, 0.0, 0.0]);
/// let b = Vector3::new([0.0, 1.0, 0.0]);
/// let c: Vector3<f64> = cross_product(&a, &b).unwrap();
/// assert_eq!(c.as_array(), &[0.0, 0.0, 1.0]);
/// ```
pub fn cross_product<R, A, B>(a: &A, b: &B) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    B: Entity<Scalar = A::Scalar> + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).cross_product(b)?.construct()?)
}

/// Computes the signed area `a0 * b1 - a1 * b0` spanned by two 2-vectors.
///
/// # Errors
///
/// If the operands are not 2-vectors in the same frame, an error is returned.
pub fn exterior_product_area<A, B>(a: &A, b: &B) -> Result<A::Scalar, TensorOpsError>
where
    A: Entity + Sync,
    B: Entity<Scalar = A::Scalar> + Sync,
{
    Expr::leaf(a).exterior_product_area(b)?.scalar()
}

/// Multiplies two matrices.
///
/// # Errors
///
/// If the columns of `a` do not match the rows of `b`, or if `R` does not have the shape
/// `(rows(a), cols(b))`, an error is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Matrix;
/// use geomalg_tensor_ops::ops::matrix_product;
///
/// let a = Matrix::<f64, 1, 2>::new([[1.0, 2.0]]);
/// let b = Matrix::<f64, 2, 1>::new([[3.0], [4.0]]);
/// let c: Matrix<f64, 1, 1> = matrix_product(&a, &b).unwrap();
/// assert_eq!(c[(0, 0)], 11.0);
/// ```
pub fn matrix_product<R, A, B>(a: &A, b: &B) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    B: Entity<Scalar = A::Scalar> + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).matrix_product(b)?.construct()?)
}

/// Multiplies a matrix by a vector.
///
/// # Errors
///
/// If the columns of `a` do not match the dimension of `v`, or if `R` is not a vector of
/// dimension `rows(a)`, an error is returned.
pub fn matrix_vector_product<R, A, V>(a: &A, v: &V) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    V: Entity<Scalar = A::Scalar> + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).matrix_vector_product(v)?.construct()?)
}

/// Returns `v` divided by its magnitude.
///
/// # Errors
///
/// If `v` is not a vector, if its magnitude is zero, or if `R` does not have its shape,
/// an error is returned.
pub fn normalize<R, A>(v: &A) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(v).normalize()?.construct()?)
}

/// Computes the Euclidean norm of a vector.
///
/// # Errors
///
/// If `v` is not a vector, an error is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Vector2;
/// use geomalg_tensor_ops::ops::magnitude;
///
/// let v = Vector2::new([3.0, 4.0]);
/// assert_eq!(magnitude(&v).unwrap(), 5.0);
/// ```
pub fn magnitude<A>(v: &A) -> Result<A::Scalar, TensorOpsError>
where
    A: Entity + Sync,
{
    Expr::leaf(v).magnitude()?.scalar()
}

/// Computes the squared Euclidean norm of a vector.
///
/// # Errors
///
/// If `v` is not a vector, an error is returned.
pub fn magnitude_sqrd<A>(v: &A) -> Result<A::Scalar, TensorOpsError>
where
    A: Entity + Sync,
{
    Expr::leaf(v).magnitude_sqrd()?.scalar()
}

/// Transposes a matrix.
///
/// # Errors
///
/// If `a` is not a matrix, or if `R` does not have the shape `(cols(a), rows(a))`, an error
/// is returned.
pub fn transpose<R, A>(a: &A) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).transpose()?.construct()?)
}

/// Computes the determinant of a square matrix.
///
/// # Errors
///
/// If `a` is not a square matrix, an error is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Matrix2;
/// use geomalg_tensor_ops::ops::determinant;
///
/// let m = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
/// assert_eq!(determinant(&m).unwrap(), -2.0);
/// ```
pub fn determinant<A>(a: &A) -> Result<A::Scalar, TensorOpsError>
where
    A: Entity + Sync,
{
    Expr::leaf(a).determinant()?.scalar()
}

/// Inverts a square matrix.
///
/// # Errors
///
/// If `a` is not a square matrix, if it is singular, or if `R` does not have its shape,
/// an error is returned.
///
/// # Example
///
/// ```
/// use geomalg_tensor::Matrix2;
/// use geomalg_tensor_ops::ops::inverse;
///
/// let m = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
/// let inv: Matrix2<f64> = inverse(&m).unwrap();
/// assert!((inv[(1, 0)] - 1.5).abs() < 1e-12);
///
/// let singular = Matrix2::new([[1.0, 2.0], [2.0, 4.0]]);
/// assert!(inverse::<Matrix2<f64>, _>(&singular).is_err());
/// ```
pub fn inverse<R, A>(a: &A) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).inverse()?.construct()?)
}

/// Computes the trace of a square matrix.
///
/// # Errors
///
/// If `a` is not a square matrix, an error is returned.
pub fn trace<A>(a: &A) -> Result<A::Scalar, TensorOpsError>
where
    A: Entity + Sync,
{
    Expr::leaf(a).trace()?.scalar()
}

/// Computes `1 / a` for a scalar entity.
///
/// The reciprocal of zero follows IEEE 754.
///
/// # Errors
///
/// If `a` is not a scalar, an error is returned.
pub fn reciprocal<A>(a: &A) -> Result<A::Scalar, TensorOpsError>
where
    A: Entity + Sync,
{
    Expr::leaf(a).reciprocal()?.scalar()
}

/// Takes the absolute value of every component of an entity.
///
/// # Errors
///
/// If `R` does not have the shape of `a`, an error is returned.
pub fn absolute_value<R, A>(a: &A) -> Result<R, TensorOpsError>
where
    A: Entity + Sync,
    R: FromComponents<Scalar = A::Scalar>,
{
    Ok(Expr::leaf(a).absolute_value()?.construct()?)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geomalg_tensor::{Frame, Matrix, Matrix2, Point3, Vector, Vector2, Vector3};

    use super::*;
    use crate::error::{ConformanceError, EvalError};

    #[test]
    fn test_add_sub_on_all_ranks() -> Result<(), TensorOpsError> {
        assert_eq!(add::<f64, _, _>(&1.5, &2.0)?, 3.5);

        let a = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
        let b = Matrix2::new([[4.0, 3.0], [2.0, 1.0]]);
        let s: Matrix2<f64> = add(&a, &b)?;
        assert_eq!(s, Matrix2::new([[5.0, 5.0], [5.0, 5.0]]));
        let d: Matrix2<f64> = sub(&a, &a)?;
        assert_eq!(d, Matrix2::zeros());
        Ok(())
    }

    #[test]
    fn test_add_shape_mismatch() {
        let a = Vector2::new([1.0, 2.0]);
        let b = Vector3::new([1.0, 2.0, 3.0]);
        let res: Result<Vector2<f64>, _> = add(&a, &b);
        assert!(matches!(
            res,
            Err(TensorOpsError::Conformance(
                ConformanceError::ShapeMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_negate_and_absolute_value() -> Result<(), TensorOpsError> {
        let v = Vector3::new([1.0, -2.0, 3.0]);
        let n: Vector3<f64> = negate(&v)?;
        assert_eq!(n.as_array(), &[-1.0, 2.0, -3.0]);
        let a: Vector3<f64> = absolute_value(&n)?;
        assert_eq!(a.as_array(), &[1.0, 2.0, 3.0]);
        assert_eq!(negate::<f32, _>(&2.0_f32)?, -2.0);
        Ok(())
    }

    #[test]
    fn test_scale_and_divide() -> Result<(), TensorOpsError> {
        let v = Vector2::new([2.0, 4.0]);
        let s: Vector2<f64> = scale(3.0, &v)?;
        assert_eq!(s.as_array(), &[6.0, 12.0]);
        let d: Vector2<f64> = divide(&v, 2.0)?;
        assert_eq!(d.as_array(), &[1.0, 2.0]);
        Ok(())
    }

    #[test]
    fn test_products() -> Result<(), TensorOpsError> {
        let a = Vector3::new([1.0, 2.0, 3.0]);
        let b = Vector3::new([4.0, 5.0, 6.0]);
        assert_eq!(dot_product(&a, &b)?, 32.0);

        let c: Vector3<f64> = cross_product(&a, &b)?;
        assert_eq!(c.as_array(), &[-3.0, 6.0, -3.0]);
        assert_eq!(dot_product(&c, &a)?, 0.0);
        assert_eq!(dot_product(&c, &b)?, 0.0);

        let u = Vector2::new([1.0, 0.0]);
        let w = Vector2::new([0.0, 1.0]);
        assert_eq!(exterior_product_area(&u, &w)?, 1.0);
        Ok(())
    }

    #[test]
    fn test_cross_product_frames() {
        let a = Vector3::in_frame([1.0, 0.0, 0.0], Frame::new(1));
        let b = Vector3::in_frame([0.0, 1.0, 0.0], Frame::new(2));
        let res: Result<Vector3<f64>, _> = cross_product(&a, &b);
        assert_eq!(
            res,
            Err(TensorOpsError::Conformance(
                ConformanceError::FrameMismatch {
                    op: crate::operator::Operator::CrossProduct,
                    lhs: Frame::new(1),
                    rhs: Frame::new(2),
                }
            ))
        );
    }

    #[test]
    fn test_matrix_operations() -> Result<(), TensorOpsError> {
        let a = Matrix::<f64, 2, 3>::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        let b = Matrix::<f64, 3, 2>::new([[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]);
        let c: Matrix2<f64> = matrix_product(&a, &b)?;
        assert_eq!(c, Matrix2::new([[58.0, 64.0], [139.0, 154.0]]));

        let t: Matrix<f64, 3, 2> = transpose(&a)?;
        assert_eq!(t.row(2), [3.0, 6.0]);

        let v = Vector3::new([1.0, 0.0, -1.0]);
        let r: Vector2<f64> = matrix_vector_product(&a, &v)?;
        assert_eq!(r.as_array(), &[-2.0, -2.0]);

        assert_eq!(trace(&c)?, 212.0);
        Ok(())
    }

    #[test]
    fn test_inverse_roundtrip() -> Result<(), TensorOpsError> {
        let m = Matrix::<f64, 3, 3>::new([[4.0, 7.0, 2.0], [3.0, 6.0, 1.0], [2.0, 5.0, 3.0]]);
        let inv: Matrix<f64, 3, 3> = inverse(&m)?;
        let id: Matrix<f64, 3, 3> = matrix_product(&m, &inv)?;
        for r in 0..3 {
            for c in 0..3 {
                let expected = if r == c { 1.0 } else { 0.0 };
                assert_relative_eq!(id[(r, c)], expected, epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_magnitude_and_normalize() -> Result<(), TensorOpsError> {
        let v = Vector::<f64, 4>::new([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(magnitude_sqrd(&v)?, 4.0);
        assert_eq!(magnitude(&v)?, 2.0);
        let n: Vector<f64, 4> = normalize(&v)?;
        assert_eq!(n.as_array(), &[0.5; 4]);

        let zero = Vector3::<f64>::zeros();
        let res: Result<Vector3<f64>, _> = normalize(&zero);
        assert_eq!(
            res,
            Err(TensorOpsError::Eval(EvalError::ZeroMagnitude {
                magnitude: 0.0
            }))
        );
        Ok(())
    }

    #[test]
    fn test_reciprocal() -> Result<(), TensorOpsError> {
        assert_eq!(reciprocal(&4.0_f64)?, 0.25);
        let v = Vector3::new([1.0, 2.0, 3.0]);
        assert!(reciprocal(&v).is_err());
        Ok(())
    }

    #[test]
    fn test_point_from_vector_computation() -> Result<(), TensorOpsError> {
        let a = Vector3::new([1.0, 2.0, 3.0]);
        let p: Point3<f64> = scale(2.0, &a)?;
        assert_eq!(p.as_array(), &[2.0, 4.0, 6.0]);
        Ok(())
    }
}
