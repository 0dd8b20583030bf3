use geomalg_kernels::KernelError;
use geomalg_tensor::{Frame, Index, Rank, Shape};
use thiserror::Error;

use crate::operator::Operator;

/// An error raised while building an expression, before any arithmetic is done.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConformanceError {
    /// The operator was given the wrong number of operands.
    #[error("{op} expects {expected} operand(s), got {found}")]
    Arity {
        /// Operator being applied.
        op: Operator,
        /// Number of operands the operator takes.
        expected: usize,
        /// Number of operands given.
        found: usize,
    },

    /// The operands must have identical shapes.
    #[error("{op} requires operands of identical shape, got {lhs} and {rhs}")]
    ShapeMismatch {
        /// Operator being applied.
        op: Operator,
        /// Shape of the left operand.
        lhs: Shape,
        /// Shape of the right operand.
        rhs: Shape,
    },

    /// An operand has the wrong rank.
    #[error("{op} requires a {expected} operand, got {found}")]
    RankMismatch {
        /// Operator being applied.
        op: Operator,
        /// Rank the operand must have.
        expected: Rank,
        /// Shape of the offending operand.
        found: Shape,
    },

    /// The rank-1 operands have a dimension the operator is not defined for.
    #[error("{op} is only defined for dimension {expected}, got {found}")]
    UnsupportedDimension {
        /// Operator being applied.
        op: Operator,
        /// Dimension the operator is defined for.
        expected: usize,
        /// Shape of the operands.
        found: Shape,
    },

    /// The matrix operand is not square.
    #[error("{op} requires a square matrix, got {found}")]
    NotSquare {
        /// Operator being applied.
        op: Operator,
        /// Shape of the operand.
        found: Shape,
    },

    /// The inner dimensions of a product do not agree.
    #[error("{op} requires the columns of the left operand to match the rows of the right, got {lhs} and {rhs}")]
    InnerDimensionMismatch {
        /// Operator being applied.
        op: Operator,
        /// Shape of the left operand.
        lhs: Shape,
        /// Shape of the right operand.
        rhs: Shape,
    },

    /// The rank-1 operands are expressed in different reference frames.
    #[error("{op} mixes {lhs} and {rhs}")]
    FrameMismatch {
        /// Operator being applied.
        op: Operator,
        /// Frame of the left operand.
        lhs: Frame,
        /// Frame of the right operand.
        rhs: Frame,
    },

    /// No product is defined for this pair of ranks.
    #[error("no product between {lhs} and {rhs}, use dot_product or cross_product for two vectors")]
    UnresolvedProduct {
        /// Shape of the left operand.
        lhs: Shape,
        /// Shape of the right operand.
        rhs: Shape,
    },

    /// The requested result entity does not have the shape of the expression.
    #[error("cannot construct a {target} entity from a {found} expression")]
    TargetShapeMismatch {
        /// Shape of the requested entity.
        target: Shape,
        /// Shape of the expression.
        found: Shape,
    },
}

/// An error raised while computing a component of a valid expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The requested index is not a component of the expression.
    #[error("index {index} is out of bounds for {shape}")]
    IndexOutOfBounds {
        /// Requested index.
        index: Index,
        /// Shape of the expression.
        shape: Shape,
    },

    /// A vector of zero magnitude cannot be normalized.
    #[error("cannot normalize a vector of magnitude {magnitude}")]
    ZeroMagnitude {
        /// Magnitude of the vector.
        magnitude: f64,
    },

    /// The matrix operand is singular within the singular tolerance.
    #[error("{0} of a singular matrix")]
    Singular(Operator),

    /// Error from the dense kernels.
    #[error(transparent)]
    KernelError(#[from] KernelError),
}

/// An error type for building and evaluating expressions in one step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TensorOpsError {
    /// The expression is not well formed.
    #[error(transparent)]
    Conformance(#[from] ConformanceError),

    /// A component could not be computed.
    #[error(transparent)]
    Eval(#[from] EvalError),
}
