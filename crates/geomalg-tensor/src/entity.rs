use std::fmt;

use num_traits::Float;

/// Tensor order of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    /// A single value.
    Scalar = 0,
    /// A vector or a point.
    Vector = 1,
    /// A matrix.
    Matrix = 2,
}

impl Rank {
    /// Returns the tensor order as a number.
    #[inline]
    pub const fn order(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Scalar => write!(f, "rank-0 scalar"),
            Rank::Vector => write!(f, "rank-1 vector"),
            Rank::Matrix => write!(f, "rank-2 matrix"),
        }
    }
}

/// The static shape of an entity.
///
/// The shape of a concrete entity type never depends on runtime values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// A single value.
    Scalar,
    /// A rank-1 entity with the given dimension.
    Vector(usize),
    /// A rank-2 entity with the given number of rows and columns.
    Matrix {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },
}

impl Shape {
    /// Returns the rank of the shape.
    #[inline]
    pub const fn rank(&self) -> Rank {
        match self {
            Shape::Scalar => Rank::Scalar,
            Shape::Vector(_) => Rank::Vector,
            Shape::Matrix { .. } => Rank::Matrix,
        }
    }

    /// Returns the number of components of an entity with this shape.
    #[inline]
    pub const fn len(&self) -> usize {
        match self {
            Shape::Scalar => 1,
            Shape::Vector(dim) => *dim,
            Shape::Matrix { rows, cols } => *rows * *cols,
        }
    }

    /// Returns true if the shape has no components.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the dimension of a rank-1 shape.
    #[inline]
    pub const fn dim(&self) -> Option<usize> {
        match self {
            Shape::Vector(dim) => Some(*dim),
            _ => None,
        }
    }

    /// Returns true for a rank-2 shape with as many rows as columns.
    #[inline]
    pub const fn is_square(&self) -> bool {
        matches!(self, Shape::Matrix { rows, cols } if *rows == *cols)
    }

    /// Returns true if `index` addresses a component of this shape.
    pub fn contains(&self, index: Index) -> bool {
        match (self, index) {
            (Shape::Scalar, Index::Scalar) => true,
            (Shape::Vector(dim), Index::Vector(i)) => i < *dim,
            (Shape::Matrix { rows, cols }, Index::Matrix(r, c)) => r < *rows && c < *cols,
            _ => false,
        }
    }

    /// Returns an iterator over every index of the shape in row-major order.
    ///
    /// # Example
    ///
    /// ```
    /// use geomalg_tensor::{Index, Shape};
    ///
    /// let indices: Vec<Index> = Shape::Matrix { rows: 2, cols: 2 }.indices().collect();
    /// assert_eq!(indices[1], Index::Matrix(0, 1));
    /// assert_eq!(indices[2], Index::Matrix(1, 0));
    /// ```
    pub fn indices(&self) -> Indices {
        Indices {
            shape: *self,
            position: 0,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Scalar => write!(f, "scalar"),
            Shape::Vector(dim) => write!(f, "vector[{dim}]"),
            Shape::Matrix { rows, cols } => write!(f, "matrix[{rows}x{cols}]"),
        }
    }
}

/// Address of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    /// The single value of a scalar.
    Scalar,
    /// Component `i` of a rank-1 entity.
    Vector(usize),
    /// Component `(row, col)` of a matrix.
    Matrix(usize, usize),
}

impl Index {
    /// Row of the component; the position for rank-1 entities, zero for scalars.
    #[inline]
    pub const fn row(&self) -> usize {
        match self {
            Index::Scalar => 0,
            Index::Vector(i) => *i,
            Index::Matrix(r, _) => *r,
        }
    }

    /// Column of the component; zero for scalars and rank-1 entities.
    #[inline]
    pub const fn col(&self) -> usize {
        match self {
            Index::Matrix(_, c) => *c,
            _ => 0,
        }
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::Scalar => write!(f, "()"),
            Index::Vector(i) => write!(f, "({i})"),
            Index::Matrix(r, c) => write!(f, "({r}, {c})"),
        }
    }
}

/// Row-major iterator over the indices of a [`Shape`].
#[derive(Debug, Clone)]
pub struct Indices {
    shape: Shape,
    position: usize,
}

impl Iterator for Indices {
    type Item = Index;

    fn next(&mut self) -> Option<Index> {
        if self.position >= self.shape.len() {
            return None;
        }
        let index = match self.shape {
            Shape::Scalar => Index::Scalar,
            Shape::Vector(_) => Index::Vector(self.position),
            Shape::Matrix { cols, .. } => Index::Matrix(self.position / cols, self.position % cols),
        };
        self.position += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.shape.len().saturating_sub(self.position);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Indices {}

/// Whether all components of an entity share one numeric type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Homogeneity {
    /// Every component has the same type.
    #[default]
    Homogeneous,
    /// Each component may have a distinct type.
    Heterogeneous,
}

impl Homogeneity {
    /// Homogeneity of an elementwise combination of two operands.
    #[inline]
    pub const fn combine(self, other: Homogeneity) -> Homogeneity {
        match (self, other) {
            (Homogeneity::Homogeneous, Homogeneity::Homogeneous) => Homogeneity::Homogeneous,
            _ => Homogeneity::Heterogeneous,
        }
    }
}

/// Tag identifying the coordinate system a vector or point is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame(u32);

impl Frame {
    /// The default frame.
    pub const WORLD: Frame = Frame(0);

    /// Creates a frame tag from an identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the frame identifier.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame#{}", self.0)
    }
}

/// An entity that can participate in expressions.
///
/// Implementing this trait is the one-time, per-type registration of rank, shape and
/// homogeneity. The engine only calls [`Entity::component`] with indices contained in
/// [`Entity::SHAPE`].
pub trait Entity {
    /// Numeric type expressions over this entity are evaluated in.
    type Scalar: Float;

    /// Static shape of the entity.
    const SHAPE: Shape;

    /// Whether all components share one numeric type.
    const HOMOGENEITY: Homogeneity = Homogeneity::Homogeneous;

    /// Reads the component at `index`.
    fn component(&self, index: Index) -> Self::Scalar;

    /// Reference frame of a rank-1 entity, if it carries one.
    fn frame(&self) -> Option<Frame> {
        None
    }
}

/// An entity that can be built from a full set of computed components.
pub trait FromComponents: Entity + Sized {
    /// Builds the entity by requesting every component of [`Entity::SHAPE`] in row-major
    /// order.
    ///
    /// The first error returned by `component` aborts the construction and is returned
    /// unchanged.
    fn try_from_components<E, F>(frame: Option<Frame>, component: F) -> Result<Self, E>
    where
        F: FnMut(Index) -> Result<Self::Scalar, E>;
}

/// Static classification of an entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Tensor order.
    pub rank: Rank,
    /// Static shape.
    pub shape: Shape,
    /// Whether all components share one numeric type.
    pub homogeneity: Homogeneity,
}

/// Returns the rank, shape and homogeneity registered for `E`.
pub fn classify<E: Entity + ?Sized>() -> Classification {
    Classification {
        rank: E::SHAPE.rank(),
        shape: E::SHAPE,
        homogeneity: E::HOMOGENEITY,
    }
}
