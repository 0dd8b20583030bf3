use num_traits::Float;

use crate::{
    entity::{Entity, Frame, FromComponents, Index, Shape},
    error::TensorError,
};

/// A fixed-dimension vector expressed in a reference frame.
///
/// # Type Parameters
///
/// * `T` - The numeric type of the components.
/// * `D` - The dimension of the vector.
///
/// # Example
///
/// ```
/// use geomalg_tensor::{Frame, Vector3};
///
/// let v = Vector3::in_frame([1.0, 2.0, 3.0], Frame::new(1));
/// assert_eq!(v.z(), 3.0);
/// assert_eq!(v.reference_frame(), Frame::new(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector<T, const D: usize> {
    data: [T; D],
    frame: Frame,
}

impl<T: Float, const D: usize> Vector<T, D> {
    /// Creates a vector in the [`Frame::WORLD`] frame.
    #[inline]
    pub fn new(data: [T; D]) -> Self {
        Self::in_frame(data, Frame::WORLD)
    }

    /// Creates a vector expressed in `frame`.
    #[inline]
    pub fn in_frame(data: [T; D], frame: Frame) -> Self {
        Self { data, frame }
    }

    /// Creates a vector with all components set to zero.
    pub fn zeros() -> Self {
        Self::new([T::zero(); D])
    }

    /// Creates a vector from a slice of exactly `D` values.
    ///
    /// # Errors
    ///
    /// Returns [`TensorError::InvalidShape`] if the slice length is not `D`.
    pub fn from_slice(data: &[T]) -> Result<Self, TensorError> {
        let data: [T; D] = data
            .try_into()
            .map_err(|_| TensorError::invalid_shape(D, data.len()))?;
        Ok(Self::new(data))
    }

    /// Returns the components as an array.
    #[inline]
    pub fn as_array(&self) -> &[T; D] {
        &self.data
    }

    /// Returns the component at `i`, or `None` if out of range.
    #[inline]
    pub fn get(&self, i: usize) -> Option<T> {
        self.data.get(i).copied()
    }

    /// Returns the reference frame of the vector.
    #[inline]
    pub fn reference_frame(&self) -> Frame {
        self.frame
    }

    /// Returns the same components expressed in another frame.
    #[inline]
    pub fn with_frame(self, frame: Frame) -> Self {
        Self { frame, ..self }
    }
}

impl<T: Float> Vector<T, 2> {
    /// Get the x component.
    #[inline]
    pub fn x(&self) -> T {
        self.data[0]
    }

    /// Get the y component.
    #[inline]
    pub fn y(&self) -> T {
        self.data[1]
    }
}

impl<T: Float> Vector<T, 3> {
    /// Get the x component.
    #[inline]
    pub fn x(&self) -> T {
        self.data[0]
    }

    /// Get the y component.
    #[inline]
    pub fn y(&self) -> T {
        self.data[1]
    }

    /// Get the z component.
    #[inline]
    pub fn z(&self) -> T {
        self.data[2]
    }
}

impl<T, const D: usize> std::ops::Index<usize> for Vector<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T: Float, const D: usize> From<[T; D]> for Vector<T, D> {
    #[inline]
    fn from(data: [T; D]) -> Self {
        Self::new(data)
    }
}

impl<T: Float, const D: usize> From<Vector<T, D>> for [T; D] {
    #[inline]
    fn from(v: Vector<T, D>) -> Self {
        v.data
    }
}

impl<T: Float, const D: usize> Entity for Vector<T, D> {
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

impl<T: Float, const D: usize> FromComponents for Vector<T, D> {
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
