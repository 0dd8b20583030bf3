use num_traits::Float;

use crate::entity::{Entity, Frame, FromComponents, Index, Shape};

/// A fixed-dimension point expressed in a reference frame.
///
/// A point has the same shape as a [`crate::Vector`] of the same dimension; the result
/// type chosen when constructing an expression decides whether a rank-1 computation
/// yields a point or a vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T, const D: usize> {
    data: [T; D],
    frame: Frame,
}

impl<T: Float, const D: usize> Point<T, D> {
    /// Creates a point in the [`Frame::WORLD`] frame.
    #[inline]
    pub fn new(data: [T; D]) -> Self {
        Self::in_frame(data, Frame::WORLD)
    }

    /// Creates a point expressed in `frame`.
    #[inline]
    pub fn in_frame(data: [T; D], frame: Frame) -> Self {
        Self { data, frame }
    }

    /// The origin of the world frame.
    pub fn origin() -> Self {
        Self::new([T::zero(); D])
    }

    /// Returns the coordinates as an array.
    #[inline]
    pub fn as_array(&self) -> &[T; D] {
        &self.data
    }

    /// Returns the reference frame of the point.
    #[inline]
    pub fn reference_frame(&self) -> Frame {
        self.frame
    }
}

impl<T: Float> Point<T, 2> {
    /// Get the x coordinate.
    #[inline]
    pub fn x(&self) -> T {
        self.data[0]
    }

    /// Get the y coordinate.
    #[inline]
    pub fn y(&self) -> T {
        self.data[1]
    }
}

impl<T: Float> Point<T, 3> {
    /// Get the x coordinate.
    #[inline]
    pub fn x(&self) -> T {
        self.data[0]
    }

    /// Get the y coordinate.
    #[inline]
    pub fn y(&self) -> T {
        self.data[1]
    }

    /// Get the z coordinate.
    #[inline]
    pub fn z(&self) -> T {
        self.data[2]
    }
}

impl<T, const D: usize> std::ops::Index<usize> for Point<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Float, const D: usize> From<[T; D]> for Point<T, D> {
    #[inline]
    fn from(data: [T; D]) -> Self {
        Self::new(data)
    }
}

impl<T: Float, const D: usize> Entity for Point<T, D> {
    type Scalar = T;
    const SHAPE: Shape = Shape::Vector(D);

    #[inline]
    fn component(&self, index: Index) -> T {
        self.data[index.row()]
    }

    #[inline]
    fn frame(&self) -> Option<Frame> {
        Some(self.frame)
    }
}

impl<T: Float, const D: usize> FromComponents for Point<T, D> {
    fn try_from_components<E, F>(frame: Option<Frame>, mut component: F) -> Result<Self, E>
    where
        F: FnMut(Index) -> Result<T, E>,
    {
        let mut data = [T::zero(); D];
        for (i, value) in data.iter_mut().enumerate() {
            *value = component(Index::Vector(i))?;
        }
        Ok(Self::in_frame(data, frame.unwrap_or_default()))
    }
}
