use geomalg_tensor::{Frame, Rank, Shape};

use crate::{
    error::ConformanceError,
    operator::{Operator, Requirement},
};

/// The static description of an operand seen by the checker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    /// Shape of the operand.
    pub shape: Shape,
    /// Reference frame of a rank-1 operand, if known.
    pub frame: Option<Frame>,
}

impl Operand {
    /// Creates an operand with no reference frame.
    pub const fn new(shape: Shape) -> Self {
        Self { shape, frame: None }
    }

    /// Creates an operand expressed in `frame`.
    pub const fn in_frame(shape: Shape, frame: Frame) -> Self {
        Self {
            shape,
            frame: Some(frame),
        }
    }
}

/// Validates `operands` against the requirement of `op` and returns the result shape.
///
/// # Arguments
///
/// * `op` - The operator being applied.
/// * `operands` - The operands in application order.
///
/// # Returns
///
/// The shape of the node.
///
/// # Errors
///
/// A [`ConformanceError`] naming the operator and the offending shapes.
///
/// Example:
/// ```
/// use geomalg_tensor::Shape;
/// use geomalg_tensor_ops::check::{check, Operand};
/// use geomalg_tensor_ops::operator::Operator;
///
/// let a = Operand::new(Shape::Matrix { rows: 2, cols: 3 });
/// let b = Operand::new(Shape::Matrix { rows: 3, cols: 4 });
/// let shape = check(Operator::MatrixProduct, &[a, b]).unwrap();
/// assert_eq!(shape, Shape::Matrix { rows: 2, cols: 4 });
/// assert!(check(Operator::MatrixProduct, &[b, a]).is_err());
/// ```
pub fn check(op: Operator, operands: &[Operand]) -> Result<Shape, ConformanceError> {
    let expected = op.arity().count();
    if operands.len() != expected {
        return Err(ConformanceError::Arity {
            op,
            expected,
            found: operands.len(),
        });
    }

    let shape = match (op.requirement(), operands) {
        (Requirement::Any, [a]) => a.shape,
        (Requirement::Scalar, [a]) => {
            expect_rank(op, a.shape, Rank::Scalar)?;
            Shape::Scalar
        }
        (Requirement::Vector, [a]) => {
            expect_rank(op, a.shape, Rank::Vector)?;
            match op {
                Operator::Normalize => a.shape,
                _ => Shape::Scalar,
            }
        }
        (Requirement::Matrix, [a]) => match a.shape {
            Shape::Matrix { rows, cols } => Shape::Matrix {
                rows: cols,
                cols: rows,
            },
            found => return Err(rank_mismatch(op, Rank::Matrix, found)),
        },
        (Requirement::SquareMatrix, [a]) => {
            expect_rank(op, a.shape, Rank::Matrix)?;
            if !a.shape.is_square() {
                return Err(ConformanceError::NotSquare { op, found: a.shape });
            }
            match op {
                Operator::Inverse => a.shape,
                _ => Shape::Scalar,
            }
        }
        (Requirement::SameShape, [a, b]) => {
            if a.shape != b.shape {
                return Err(ConformanceError::ShapeMismatch {
                    op,
                    lhs: a.shape,
                    rhs: b.shape,
                });
            }
            a.shape
        }
        (Requirement::ScalarThenAny, [s, a]) => {
            expect_rank(op, s.shape, Rank::Scalar)?;
            a.shape
        }
        (Requirement::AnyThenScalar, [a, s]) => {
            expect_rank(op, s.shape, Rank::Scalar)?;
            a.shape
        }
        (Requirement::VectorPair(fixed), [a, b]) => {
            expect_rank(op, a.shape, Rank::Vector)?;
            expect_rank(op, b.shape, Rank::Vector)?;
            if a.shape != b.shape {
                return Err(ConformanceError::ShapeMismatch {
                    op,
                    lhs: a.shape,
                    rhs: b.shape,
                });
            }
            if let Some(dim) = fixed {
                if a.shape != Shape::Vector(dim) {
                    return Err(ConformanceError::UnsupportedDimension {
                        op,
                        expected: dim,
                        found: a.shape,
                    });
                }
            }
            match op {
                Operator::CrossProduct => a.shape,
                _ => Shape::Scalar,
            }
        }
        (Requirement::MatrixPair, [a, b]) => match (a.shape, b.shape) {
            (
                Shape::Matrix { rows, cols: inner },
                Shape::Matrix {
                    rows: inner_rhs,
                    cols,
                },
            ) => {
                if inner != inner_rhs {
                    return Err(ConformanceError::InnerDimensionMismatch {
                        op,
                        lhs: a.shape,
                        rhs: b.shape,
                    });
                }
                Shape::Matrix { rows, cols }
            }
            (Shape::Matrix { .. }, found) | (found, _) => {
                return Err(rank_mismatch(op, Rank::Matrix, found))
            }
        },
        (Requirement::MatrixThenVector, [a, v]) => match (a.shape, v.shape) {
            (Shape::Matrix { rows, cols }, Shape::Vector(dim)) => {
                if cols != dim {
                    return Err(ConformanceError::InnerDimensionMismatch {
                        op,
                        lhs: a.shape,
                        rhs: v.shape,
                    });
                }
                Shape::Vector(rows)
            }
            (Shape::Matrix { .. }, found) => return Err(rank_mismatch(op, Rank::Vector, found)),
            (found, _) => return Err(rank_mismatch(op, Rank::Matrix, found)),
        },
        // arity was checked above, every requirement is matched with its operand count
        (_, _) => {
            return Err(ConformanceError::Arity {
                op,
                expected,
                found: operands.len(),
            })
        }
    };

    if op.requires_matching_frames() {
        if let [a, b] = operands {
            check_frames(op, a, b)?;
        }
    }

    Ok(shape)
}

/// Fails when both rank-1 operands carry a frame and the frames differ.
fn check_frames(op: Operator, a: &Operand, b: &Operand) -> Result<(), ConformanceError> {
    if a.shape.rank() != Rank::Vector {
        return Ok(());
    }
    match (a.frame, b.frame) {
        (Some(lhs), Some(rhs)) if lhs != rhs => {
            Err(ConformanceError::FrameMismatch { op, lhs, rhs })
        }
        _ => Ok(()),
    }
}

fn expect_rank(op: Operator, shape: Shape, expected: Rank) -> Result<(), ConformanceError> {
    if shape.rank() != expected {
        return Err(rank_mismatch(op, expected, shape));
    }
    Ok(())
}

fn rank_mismatch(op: Operator, expected: Rank, found: Shape) -> ConformanceError {
    ConformanceError::RankMismatch {
        op,
        expected,
        found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const V2: Operand = Operand::new(Shape::Vector(2));
    const V3: Operand = Operand::new(Shape::Vector(3));
    const S: Operand = Operand::new(Shape::Scalar);

    fn matrix(rows: usize, cols: usize) -> Operand {
        Operand::new(Shape::Matrix { rows, cols })
    }

    #[test]
    fn test_every_operator_is_checked() {
        for op in Operator::ALL {
            let res = check(op, &[]);
            assert!(matches!(res, Err(ConformanceError::Arity { found: 0, .. })));
        }
    }

    #[test]
    fn test_add_requires_same_shape() -> Result<(), ConformanceError> {
        assert_eq!(check(Operator::Add, &[V3, V3])?, Shape::Vector(3));
        assert_eq!(
            check(Operator::Subtract, &[matrix(2, 2), matrix(2, 2)])?,
            Shape::Matrix { rows: 2, cols: 2 }
        );
        assert_eq!(
            check(Operator::Add, &[V2, V3]),
            Err(ConformanceError::ShapeMismatch {
                op: Operator::Add,
                lhs: Shape::Vector(2),
                rhs: Shape::Vector(3),
            })
        );
        assert!(check(Operator::Add, &[S, V2]).is_err());
        Ok(())
    }

    #[test]
    fn test_dot_of_mismatched_dimensions() {
        assert_eq!(
            check(Operator::DotProduct, &[V2, V3]),
            Err(ConformanceError::ShapeMismatch {
                op: Operator::DotProduct,
                lhs: Shape::Vector(2),
                rhs: Shape::Vector(3),
            })
        );
    }

    #[test]
    fn test_cross_and_exterior_dimensions() -> Result<(), ConformanceError> {
        assert_eq!(check(Operator::CrossProduct, &[V3, V3])?, Shape::Vector(3));
        assert_eq!(
            check(Operator::CrossProduct, &[V2, V2]),
            Err(ConformanceError::UnsupportedDimension {
                op: Operator::CrossProduct,
                expected: 3,
                found: Shape::Vector(2),
            })
        );
        assert_eq!(
            check(Operator::ExteriorProductArea, &[V2, V2])?,
            Shape::Scalar
        );
        assert!(check(Operator::ExteriorProductArea, &[V3, V3]).is_err());
        assert_eq!(
            check(Operator::DotProduct, &[V3, matrix(3, 1)]),
            Err(ConformanceError::RankMismatch {
                op: Operator::DotProduct,
                expected: Rank::Vector,
                found: Shape::Matrix { rows: 3, cols: 1 },
            })
        );
        Ok(())
    }

    #[test]
    fn test_matrix_product_inner_dimension() -> Result<(), ConformanceError> {
        assert_eq!(
            check(Operator::MatrixProduct, &[matrix(2, 3), matrix(3, 5)])?,
            Shape::Matrix { rows: 2, cols: 5 }
        );
        assert_eq!(
            check(Operator::MatrixProduct, &[matrix(2, 3), matrix(2, 3)]),
            Err(ConformanceError::InnerDimensionMismatch {
                op: Operator::MatrixProduct,
                lhs: Shape::Matrix { rows: 2, cols: 3 },
                rhs: Shape::Matrix { rows: 2, cols: 3 },
            })
        );
        assert!(matches!(
            check(Operator::MatrixProduct, &[matrix(3, 3), V3]),
            Err(ConformanceError::RankMismatch { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_matrix_vector_product() -> Result<(), ConformanceError> {
        assert_eq!(
            check(Operator::MatrixVectorProduct, &[matrix(2, 3), V3])?,
            Shape::Vector(2)
        );
        assert!(matches!(
            check(Operator::MatrixVectorProduct, &[matrix(2, 3), V2]),
            Err(ConformanceError::InnerDimensionMismatch { .. })
        ));
        assert!(matches!(
            check(Operator::MatrixVectorProduct, &[V3, V3]),
            Err(ConformanceError::RankMismatch {
                expected: Rank::Matrix,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_square_matrix_operators() -> Result<(), ConformanceError> {
        assert_eq!(check(Operator::Determinant, &[matrix(4, 4)])?, Shape::Scalar);
        assert_eq!(check(Operator::Trace, &[matrix(1, 1)])?, Shape::Scalar);
        assert_eq!(
            check(Operator::Inverse, &[matrix(3, 3)])?,
            Shape::Matrix { rows: 3, cols: 3 }
        );
        assert_eq!(
            check(Operator::Inverse, &[matrix(2, 3)]),
            Err(ConformanceError::NotSquare {
                op: Operator::Inverse,
                found: Shape::Matrix { rows: 2, cols: 3 },
            })
        );
        assert_eq!(
            check(Operator::Transpose, &[matrix(2, 3)])?,
            Shape::Matrix { rows: 3, cols: 2 }
        );
        Ok(())
    }

    #[test]
    fn test_scalar_operands() -> Result<(), ConformanceError> {
        assert_eq!(check(Operator::Scale, &[S, matrix(2, 2)])?, Shape::Matrix { rows: 2, cols: 2 });
        assert_eq!(check(Operator::Divide, &[V3, S])?, Shape::Vector(3));
        assert!(matches!(
            check(Operator::Divide, &[S, V3]),
            Err(ConformanceError::RankMismatch {
                expected: Rank::Scalar,
                ..
            })
        ));
        assert_eq!(check(Operator::Reciprocal, &[S])?, Shape::Scalar);
        assert!(check(Operator::Reciprocal, &[V2]).is_err());
        assert_eq!(check(Operator::Negate, &[S])?, Shape::Scalar);
        assert_eq!(check(Operator::AbsoluteValue, &[V2])?, Shape::Vector(2));
        Ok(())
    }

    #[test]
    fn test_vector_reductions() -> Result<(), ConformanceError> {
        assert_eq!(check(Operator::Magnitude, &[V3])?, Shape::Scalar);
        assert_eq!(check(Operator::MagnitudeSqrd, &[V2])?, Shape::Scalar);
        assert_eq!(check(Operator::Normalize, &[V3])?, Shape::Vector(3));
        assert!(check(Operator::Normalize, &[S]).is_err());
        Ok(())
    }

    #[test]
    fn test_frames() -> Result<(), ConformanceError> {
        let a = Operand::in_frame(Shape::Vector(3), Frame::new(1));
        let b = Operand::in_frame(Shape::Vector(3), Frame::new(2));
        assert_eq!(
            check(Operator::CrossProduct, &[a, b]),
            Err(ConformanceError::FrameMismatch {
                op: Operator::CrossProduct,
                lhs: Frame::new(1),
                rhs: Frame::new(2),
            })
        );
        // an operand without a frame adopts the other one
        assert_eq!(check(Operator::Add, &[a, V3])?, Shape::Vector(3));
        // scaling never compares frames
        assert_eq!(check(Operator::Scale, &[S, b])?, Shape::Vector(3));
        Ok(())
    }
}
