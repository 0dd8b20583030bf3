use num_traits::Float;

/// A component type that converts to and from the common evaluation scalar `T`.
///
/// Heterogeneous entities store each component in its own type (for instance a unit
/// newtype); expressions are evaluated in `T` and converted back when the result is built.
pub trait Component<T>: Copy {
    /// Returns the value of the component in the evaluation scalar.
    fn to_scalar(self) -> T;

    /// Builds the component from a value in the evaluation scalar.
    fn from_scalar(value: T) -> Self;
}

impl<T: Float> Component<T> for T {
    #[inline]
    fn to_scalar(self) -> T {
        self
    }

    #[inline]
    fn from_scalar(value: T) -> Self {
        value
    }
}

/// Declares a heterogeneous rank-1 entity as a record of named fields.
///
/// Each field type must implement [`Component`] for the declared evaluation scalar. The
/// generated struct implements [`crate::Entity`] with
/// [`crate::Homogeneity::Heterogeneous`] and [`crate::FromComponents`]; component `i` is
/// the `i`-th declared field.
///
/// # Example
///
/// ```
/// use geomalg_tensor::{classify, heterogeneous_vector, Component, Homogeneity, Shape};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// pub struct Meters(pub f64);
///
/// impl Component<f64> for Meters {
///     fn to_scalar(self) -> f64 {
///         self.0
///     }
///     fn from_scalar(value: f64) -> Self {
///         Meters(value)
///     }
/// }
///
/// heterogeneous_vector! {
///     /// Planar position with a weight.
///     pub struct WeightedPosition<f64> {
///         pub x: Meters,
///         pub y: Meters,
///         pub weight: f64,
///     }
/// }
///
/// let info = classify::<WeightedPosition>();
/// assert_eq!(info.shape, Shape::Vector(3));
/// assert_eq!(info.homogeneity, Homogeneity::Heterogeneous);
/// ```
#[macro_export]
macro_rules! heterogeneous_vector {
    (@count) => { 0usize };
    (@count $head:ident $($tail:ident)*) => {
        1usize + $crate::heterogeneous_vector!(@count $($tail)*)
    };
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident<$scalar:ty> {
            $($(#[$field_meta:meta])* $field_vis:vis $field:ident : $field_ty:ty),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        $vis struct $name {
            $($(#[$field_meta])* $field_vis $field: $field_ty),+
        }

        impl $crate::Entity for $name {
            type Scalar = $scalar;
            const SHAPE: $crate::Shape =
                $crate::Shape::Vector($crate::heterogeneous_vector!(@count $($field)+));
            const HOMOGENEITY: $crate::Homogeneity = $crate::Homogeneity::Heterogeneous;

            fn component(&self, index: $crate::Index) -> $scalar {
                let components = [$($crate::Component::<$scalar>::to_scalar(self.$field)),+];
                components[index.row()]
            }
        }

        impl $crate::FromComponents for $name {
            fn try_from_components<E, F>(
                _frame: ::core::option::Option<$crate::Frame>,
                mut component: F,
            ) -> ::core::result::Result<Self, E>
            where
                F: FnMut($crate::Index) -> ::core::result::Result<$scalar, E>,
            {
                let mut position = 0usize;
                $(
                    let $field = <$field_ty as $crate::Component<$scalar>>::from_scalar(
                        component($crate::Index::Vector(position))?,
                    );
                    position += 1;
                )+
                debug_assert_eq!(position, <Self as $crate::Entity>::SHAPE.len());
                Ok(Self { $($field),+ })
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::entity::{classify, Entity, FromComponents, Homogeneity, Index, Shape};

    use super::Component;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Meters(f64);

    impl Component<f64> for Meters {
        fn to_scalar(self) -> f64 {
            self.0
        }

        fn from_scalar(value: f64) -> Self {
            Meters(value)
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Feet(f64);

    impl Component<f64> for Feet {
        fn to_scalar(self) -> f64 {
            self.0
        }

        fn from_scalar(value: f64) -> Self {
            Feet(value)
        }
    }

    heterogeneous_vector! {
        struct Survey<f64> {
            easting: Meters,
            northing: Meters,
            elevation: Feet,
        }
    }

    #[test]
    fn test_heterogeneous_classification() {
        let info = classify::<Survey>();
        assert_eq!(info.shape, Shape::Vector(3));
        assert_eq!(info.homogeneity, Homogeneity::Heterogeneous);
    }

    #[test]
    fn test_heterogeneous_components() -> Result<(), ()> {
        let s = Survey {
            easting: Meters(10.0),
            northing: Meters(20.0),
            elevation: Feet(30.0),
        };
        assert_eq!(s.component(Index::Vector(0)), 10.0);
        assert_eq!(s.component(Index::Vector(2)), 30.0);
        assert_eq!(s.frame(), None);

        let rebuilt = Survey::try_from_components(None, |index| Ok::<_, ()>(s.component(index)))?;
        assert_eq!(rebuilt, s);
        Ok(())
    }

    #[test]
    fn test_scalar_component_identity() {
        assert_eq!(<f32 as Component<f32>>::to_scalar(1.5), 1.5);
        assert_eq!(<f64 as Component<f64>>::from_scalar(2.5), 2.5);
    }
}
