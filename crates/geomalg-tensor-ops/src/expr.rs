use std::fmt;

use geomalg_tensor::{classify, Entity, Frame, Homogeneity, Index, Rank, Shape};
use num_traits::Float;

use crate::{
    check::{check, Operand},
    error::ConformanceError,
    operator::{resolve_product, Operator},
};

/// Read access to the components of a borrowed entity.
///
/// Blanket implemented for every [`Entity`]; it lets a tree hold leaves of different
/// entity types behind one pointer type.
pub trait ComponentSource<T> {
    /// Reads the component at `index`.
    fn read(&self, index: Index) -> T;
}

impl<E: Entity> ComponentSource<E::Scalar> for E {
    #[inline]
    fn read(&self, index: Index) -> E::Scalar {
        self.component(index)
    }
}

#[derive(Clone)]
pub(crate) enum Node<'a, T> {
    Leaf(&'a (dyn ComponentSource<T> + Sync)),
    Constant(T),
    Unary(Operator, Box<Expr<'a, T>>),
    Binary(Operator, Box<Expr<'a, T>>, Box<Expr<'a, T>>),
}

/// A validated, unevaluated expression over borrowed entities.
///
/// Every node records the shape, homogeneity and reference frame inferred when it was
/// built. Building a node runs the conformance check, so an `Expr` value is always well
/// formed. The tree borrows its leaves for `'a`: the operands cannot be mutated or
/// dropped while the expression is alive.
///
/// # Example
///
/// ```
/// use geomalg_tensor::{Index, Vector3};
/// use geomalg_tensor_ops::Expr;
///
/// let a = Vector3::new([1.0, 0.0, 0.0]);
/// let b = Vector3::new([0.0, 1.0, 0.0]);
///
/// let c = Expr::leaf(&a).cross_product(&b).unwrap();
/// assert_eq!(c.evaluate(Index::Vector(2)).unwrap(), 1.0);
///
/// let c: Vector3<f64> = c.construct().unwrap();
/// assert_eq!(c.as_array(), &[0.0, 0.0, 1.0]);
/// ```
#[derive(Clone)]
pub struct Expr<'a, T> {
    pub(crate) node: Node<'a, T>,
    shape: Shape,
    homogeneity: Homogeneity,
    frame: Option<Frame>,
}

/// Conversion into an expression operand.
///
/// Implemented for expressions and for shared references to entities, so builder methods
/// accept either.
pub trait IntoExpr<'a, T> {
    /// Converts `self` into an expression.
    fn into_expr(self) -> Expr<'a, T>;
}

impl<'a, T> IntoExpr<'a, T> for Expr<'a, T> {
    #[inline]
    fn into_expr(self) -> Expr<'a, T> {
        self
    }
}

impl<'a, E> IntoExpr<'a, E::Scalar> for &'a E
where
    E: Entity + Sync,
{
    #[inline]
    fn into_expr(self) -> Expr<'a, E::Scalar> {
        Expr::leaf(self)
    }
}

impl<'a, T: Float> Expr<'a, T> {
    /// Creates a leaf reading the components of `entity`.
    pub fn leaf<E>(entity: &'a E) -> Self
    where
        E: Entity<Scalar = T> + Sync,
    {
        let info = classify::<E>();
        Self {
            node: Node::Leaf(entity),
            shape: info.shape,
            homogeneity: info.homogeneity,
            frame: entity.frame(),
        }
    }

    /// Creates a scalar constant.
    pub fn constant(value: T) -> Self {
        Self {
            node: Node::Constant(value),
            shape: Shape::Scalar,
            homogeneity: Homogeneity::Homogeneous,
            frame: None,
        }
    }

    /// Shape of the expression.
    #[inline]
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Rank of the expression.
    #[inline]
    pub fn rank(&self) -> Rank {
        self.shape.rank()
    }

    /// Homogeneity of the expression.
    #[inline]
    pub fn homogeneity(&self) -> Homogeneity {
        self.homogeneity
    }

    /// Reference frame of a rank-1 expression, if any of its vector operands has one.
    #[inline]
    pub fn frame(&self) -> Option<Frame> {
        self.frame
    }

    /// Operator applied at the root, `None` for leaves and constants.
    pub fn operator(&self) -> Option<Operator> {
        match &self.node {
            Node::Leaf(_) | Node::Constant(_) => None,
            Node::Unary(op, _) | Node::Binary(op, _, _) => Some(*op),
        }
    }

    fn operand(&self) -> Operand {
        Operand {
            shape: self.shape,
            frame: self.frame,
        }
    }

    fn unary(self, op: Operator) -> Result<Self, ConformanceError> {
        let shape = check(op, &[self.operand()])?;
        let homogeneity = op.result_homogeneity(&[self.homogeneity]);
        let frame = match shape.rank() {
            Rank::Vector => self.frame,
            _ => None,
        };
        log::trace!("built {op} node of shape {shape}");
        Ok(Self {
            node: Node::Unary(op, Box::new(self)),
            shape,
            homogeneity,
            frame,
        })
    }

    fn binary(self, op: Operator, rhs: Self) -> Result<Self, ConformanceError> {
        let shape = check(op, &[self.operand(), rhs.operand()])?;
        let homogeneity = op.result_homogeneity(&[self.homogeneity, rhs.homogeneity]);
        let frame = match shape.rank() {
            Rank::Vector => self.frame.or(rhs.frame),
            _ => None,
        };
        log::trace!("built {op} node of shape {shape}");
        Ok(Self {
            node: Node::Binary(op, Box::new(self), Box::new(rhs)),
            shape,
            homogeneity,
            frame,
        })
    }

    /// Componentwise sum of two operands of identical shape.
    ///
    /// # Errors
    ///
    /// [`ConformanceError::ShapeMismatch`] if the shapes differ, or
    /// [`ConformanceError::FrameMismatch`] if two vectors live in different frames.
    pub fn add(self, rhs: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        self.binary(Operator::Add, rhs.into_expr())
    }

    /// Componentwise difference of two operands of identical shape.
    ///
    /// # Errors
    ///
    /// See [`Expr::add`].
    pub fn sub(self, rhs: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        self.binary(Operator::Subtract, rhs.into_expr())
    }

    /// Product resolved from the operand ranks.
    ///
    /// A scalar on either side scales the other operand, two matrices give the matrix
    /// product and a matrix followed by a vector gives the matrix-vector product.
    ///
    /// # Errors
    ///
    /// [`ConformanceError::UnresolvedProduct`] for two vectors or a vector followed by a
    /// matrix, or the error of the resolved operator.
    pub fn mul(self, rhs: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        let rhs = rhs.into_expr();
        match resolve_product(self.rank(), rhs.rank()) {
            Some(Operator::Scale) if self.rank() == Rank::Scalar => {
                self.binary(Operator::Scale, rhs)
            }
            Some(Operator::Scale) => rhs.binary(Operator::Scale, self),
            Some(op) => self.binary(op, rhs),
            None => Err(ConformanceError::UnresolvedProduct {
                lhs: self.shape,
                rhs: rhs.shape,
            }),
        }
    }

    /// Divides every component by a scalar.
    ///
    /// Division by zero follows IEEE 754 and is not an error.
    ///
    /// # Errors
    ///
    /// [`ConformanceError::RankMismatch`] if the divisor is not a scalar.
    pub fn div(self, divisor: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        self.binary(Operator::Divide, divisor.into_expr())
    }

    /// Multiplies every component by a scalar factor.
    ///
    /// # Errors
    ///
    /// [`ConformanceError::RankMismatch`] if the factor is not a scalar.
    pub fn scale(self, factor: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        factor.into_expr().binary(Operator::Scale, self)
    }

    /// Negates every component.
    pub fn negate(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Negate)
    }

    /// Absolute value of every component.
    pub fn absolute_value(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::AbsoluteValue)
    }

    /// Reciprocal of a scalar.
    ///
    /// The reciprocal of zero follows IEEE 754 and is not an error.
    ///
    /// # Errors
    ///
    /// [`ConformanceError::RankMismatch`] if the operand is not a scalar.
    pub fn reciprocal(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Reciprocal)
    }

    /// Inner product of two vectors of equal dimension.
    pub fn dot_product(self, rhs: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        self.binary(Operator::DotProduct, rhs.into_expr())
    }

    /// Cross product of two 3-vectors.
    pub fn cross_product(self, rhs: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        self.binary(Operator::CrossProduct, rhs.into_expr())
    }

    /// Signed area spanned by two 2-vectors.
    pub fn exterior_product_area(
        self,
        rhs: impl IntoExpr<'a, T>,
    ) -> Result<Self, ConformanceError> {
        self.binary(Operator::ExteriorProductArea, rhs.into_expr())
    }

    /// Product of two matrices with `cols(self) == rows(rhs)`.
    pub fn matrix_product(self, rhs: impl IntoExpr<'a, T>) -> Result<Self, ConformanceError> {
        self.binary(Operator::MatrixProduct, rhs.into_expr())
    }

    /// Product of a matrix and a vector of dimension `cols(self)`.
    pub fn matrix_vector_product(
        self,
        rhs: impl IntoExpr<'a, T>,
    ) -> Result<Self, ConformanceError> {
        self.binary(Operator::MatrixVectorProduct, rhs.into_expr())
    }

    /// Transpose of a matrix.
    pub fn transpose(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Transpose)
    }

    /// Sum of the diagonal of a square matrix.
    pub fn trace(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Trace)
    }

    /// Determinant of a square matrix.
    pub fn determinant(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Determinant)
    }

    /// Inverse of a square matrix.
    ///
    /// Singularity can only be detected from the values, so it is reported when a
    /// component is evaluated.
    pub fn inverse(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Inverse)
    }

    /// Squared Euclidean norm of a vector.
    pub fn magnitude_sqrd(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::MagnitudeSqrd)
    }

    /// Euclidean norm of a vector.
    pub fn magnitude(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Magnitude)
    }

    /// The vector divided by its magnitude.
    pub fn normalize(self) -> Result<Self, ConformanceError> {
        self.unary(Operator::Normalize)
    }
}

impl<T> fmt::Debug for Expr<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Leaf(_) => write!(f, "Leaf({})", self.shape),
            Node::Constant(value) => write!(f, "Constant({value:?})"),
            Node::Unary(op, a) => write!(f, "{op}({a:?})"),
            Node::Binary(op, a, b) => write!(f, "{op}({a:?}, {b:?})"),
        }
    }
}

macro_rules! impl_binary_operator {
    ($trait:ident, $method:ident) => {
        impl<'a, T, R> std::ops::$trait<R> for Expr<'a, T>
        where
            T: Float,
            R: IntoExpr<'a, T>,
        {
            type Output = Result<Expr<'a, T>, ConformanceError>;

            #[inline]
            fn $method(self, rhs: R) -> Self::Output {
                Expr::$method(self, rhs)
            }
        }
    };
}

impl_binary_operator!(Add, add);
impl_binary_operator!(Sub, sub);
impl_binary_operator!(Mul, mul);
impl_binary_operator!(Div, div);

impl<'a, T: Float> std::ops::Neg for Expr<'a, T> {
    type Output = Result<Expr<'a, T>, ConformanceError>;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negate()
    }
}
