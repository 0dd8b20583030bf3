use std::fmt;

use geomalg_tensor::{Homogeneity, Rank};

/// The closed catalog of operators an expression node can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `a(i) + b(i)`.
    Add,
    /// `a(i) - b(i)`.
    Subtract,
    /// `-a(i)`.
    Negate,
    /// `s * a(i)`, the scalar operand first.
    Scale,
    /// `a(i) / s`.
    Divide,
    /// `Σ a(i) * b(i)`.
    DotProduct,
    /// Cross product of two 3-vectors.
    CrossProduct,
    /// Signed area `a0 * b1 - a1 * b0` of two 2-vectors.
    ExteriorProductArea,
    /// `r(i, j) = Σ_k a(i, k) * b(k, j)`.
    MatrixProduct,
    /// `r(i) = Σ_k a(i, k) * v(k)`.
    MatrixVectorProduct,
    /// `r(i, j) = a(j, i)`.
    Transpose,
    /// `Σ a(i, i)`.
    Trace,
    /// Determinant of a square matrix.
    Determinant,
    /// Inverse of a square, non-singular matrix.
    Inverse,
    /// `Σ a(i)^2`.
    MagnitudeSqrd,
    /// `sqrt(Σ a(i)^2)`.
    Magnitude,
    /// `a(i) / magnitude(a)`.
    Normalize,
    /// `1 / a`.
    Reciprocal,
    /// `|a(i)|`.
    AbsoluteValue,
}

/// Number of operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// One operand.
    Unary,
    /// Two operands.
    Binary,
}

impl Arity {
    /// Number of operands.
    pub const fn count(self) -> usize {
        match self {
            Arity::Unary => 1,
            Arity::Binary => 2,
        }
    }
}

/// What an operator demands of its operand shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Any single operand.
    Any,
    /// Two operands of identical shape.
    SameShape,
    /// A scalar followed by any operand.
    ScalarThenAny,
    /// Any operand followed by a scalar.
    AnyThenScalar,
    /// A single scalar.
    Scalar,
    /// A single rank-1 operand.
    Vector,
    /// Two rank-1 operands of equal dimension, optionally of one fixed dimension.
    VectorPair(Option<usize>),
    /// A single matrix.
    Matrix,
    /// A single square matrix.
    SquareMatrix,
    /// Two matrices with `cols(left) == rows(right)`.
    MatrixPair,
    /// A matrix followed by a vector of dimension `cols(matrix)`.
    MatrixThenVector,
}

impl Operator {
    /// Every operator of the catalog.
    pub const ALL: [Operator; 19] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Negate,
        Operator::Scale,
        Operator::Divide,
        Operator::DotProduct,
        Operator::CrossProduct,
        Operator::ExteriorProductArea,
        Operator::MatrixProduct,
        Operator::MatrixVectorProduct,
        Operator::Transpose,
        Operator::Trace,
        Operator::Determinant,
        Operator::Inverse,
        Operator::MagnitudeSqrd,
        Operator::Magnitude,
        Operator::Normalize,
        Operator::Reciprocal,
        Operator::AbsoluteValue,
    ];

    /// Name of the operator, as used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Operator::Add => "add",
            Operator::Subtract => "subtract",
            Operator::Negate => "negate",
            Operator::Scale => "scale",
            Operator::Divide => "divide",
            Operator::DotProduct => "dot_product",
            Operator::CrossProduct => "cross_product",
            Operator::ExteriorProductArea => "exterior_product_area",
            Operator::MatrixProduct => "matrix_product",
            Operator::MatrixVectorProduct => "matrix_vector_product",
            Operator::Transpose => "transpose",
            Operator::Trace => "trace",
            Operator::Determinant => "determinant",
            Operator::Inverse => "inverse",
            Operator::MagnitudeSqrd => "magnitude_sqrd",
            Operator::Magnitude => "magnitude",
            Operator::Normalize => "normalize",
            Operator::Reciprocal => "reciprocal",
            Operator::AbsoluteValue => "absolute_value",
        }
    }

    /// Operand requirement checked when a node is built.
    pub const fn requirement(self) -> Requirement {
        match self {
            Operator::Add | Operator::Subtract => Requirement::SameShape,
            Operator::Negate | Operator::AbsoluteValue => Requirement::Any,
            Operator::Scale => Requirement::ScalarThenAny,
            Operator::Divide => Requirement::AnyThenScalar,
            Operator::DotProduct => Requirement::VectorPair(None),
            Operator::CrossProduct => Requirement::VectorPair(Some(3)),
            Operator::ExteriorProductArea => Requirement::VectorPair(Some(2)),
            Operator::MatrixProduct => Requirement::MatrixPair,
            Operator::MatrixVectorProduct => Requirement::MatrixThenVector,
            Operator::Transpose => Requirement::Matrix,
            Operator::Trace | Operator::Determinant | Operator::Inverse => {
                Requirement::SquareMatrix
            }
            Operator::MagnitudeSqrd | Operator::Magnitude | Operator::Normalize => {
                Requirement::Vector
            }
            Operator::Reciprocal => Requirement::Scalar,
        }
    }

    /// Number of operands.
    pub const fn arity(self) -> Arity {
        match self.requirement() {
            Requirement::Any
            | Requirement::Scalar
            | Requirement::Vector
            | Requirement::Matrix
            | Requirement::SquareMatrix => Arity::Unary,
            Requirement::SameShape
            | Requirement::ScalarThenAny
            | Requirement::AnyThenScalar
            | Requirement::VectorPair(_)
            | Requirement::MatrixPair
            | Requirement::MatrixThenVector => Arity::Binary,
        }
    }

    /// Returns true if component `i` of the result only reads component `i` of the
    /// non-scalar operands.
    pub const fn is_elementwise(self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Subtract
                | Operator::Negate
                | Operator::Scale
                | Operator::Divide
                | Operator::Reciprocal
                | Operator::AbsoluteValue
        )
    }

    /// Returns true if a rank-1 operand's reference frame must match the other operand's.
    pub const fn requires_matching_frames(self) -> bool {
        matches!(
            self,
            Operator::Add
                | Operator::Subtract
                | Operator::DotProduct
                | Operator::CrossProduct
                | Operator::ExteriorProductArea
        )
    }

    /// Homogeneity of the result given the homogeneity of each operand.
    ///
    /// Elementwise operators keep per-component types apart; every other operator mixes
    /// components and produces a homogeneous result.
    pub fn result_homogeneity(self, operands: &[Homogeneity]) -> Homogeneity {
        if !self.is_elementwise() {
            return Homogeneity::Homogeneous;
        }
        operands
            .iter()
            .fold(Homogeneity::Homogeneous, |acc, &h| acc.combine(h))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves the generic `*` operator from the operand ranks.
///
/// Returns `None` for patterns with no product, notably two vectors, where the caller has
/// to choose between [`Operator::DotProduct`] and [`Operator::CrossProduct`].
///
/// # Example
///
/// ```
/// use geomalg_tensor::Rank;
/// use geomalg_tensor_ops::operator::{resolve_product, Operator};
///
/// assert_eq!(resolve_product(Rank::Vector, Rank::Scalar), Some(Operator::Scale));
/// assert_eq!(resolve_product(Rank::Matrix, Rank::Vector), Some(Operator::MatrixVectorProduct));
/// assert_eq!(resolve_product(Rank::Vector, Rank::Vector), None);
/// ```
pub fn resolve_product(lhs: Rank, rhs: Rank) -> Option<Operator> {
    match (lhs, rhs) {
        (Rank::Scalar, _) | (_, Rank::Scalar) => Some(Operator::Scale),
        (Rank::Matrix, Rank::Matrix) => Some(Operator::MatrixProduct),
        (Rank::Matrix, Rank::Vector) => Some(Operator::MatrixVectorProduct),
        (Rank::Vector, Rank::Vector) | (Rank::Vector, Rank::Matrix) => None,
    }
}
