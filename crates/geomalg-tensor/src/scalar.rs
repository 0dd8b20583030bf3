use crate::entity::{Entity, Frame, FromComponents, Index, Shape};

macro_rules! impl_scalar_entity {
    ($($t:ty),*) => {
        $(
            impl Entity for $t {
                type Scalar = $t;
                const SHAPE: Shape = Shape::Scalar;

                #[inline]
                fn component(&self, _index: Index) -> $t {
                    *self
                }
            }

            impl FromComponents for $t {
                fn try_from_components<E, F>(_frame: Option<Frame>, mut component: F) -> Result<Self, E>
                where
                    F: FnMut(Index) -> Result<$t, E>,
                {
                    component(Index::Scalar)
                }
            }
        )*
    };
}

impl_scalar_entity!(f32, f64);
