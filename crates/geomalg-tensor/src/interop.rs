//! Conversions between single precision entities and `glam` types.
//!
//! `glam` matrices are column-major while [`Matrix`] is row-major; the conversions
//! transpose accordingly so that `m[(r, c)]` is preserved.

use crate::{matrix::Matrix, point::Point, vector::Vector};

macro_rules! impl_glam_vector {
    ($dim:literal, $glam:ty) => {
        impl From<$glam> for Vector<f32, $dim> {
            #[inline]
            fn from(v: $glam) -> Self {
                Self::new(v.to_array())
            }
        }

        impl From<Vector<f32, $dim>> for $glam {
            #[inline]
            fn from(v: Vector<f32, $dim>) -> Self {
                <$glam>::from_array(*v.as_array())
            }
        }

        impl From<$glam> for Point<f32, $dim> {
            #[inline]
            fn from(v: $glam) -> Self {
                Self::new(v.to_array())
            }
        }

        impl From<Point<f32, $dim>> for $glam {
            #[inline]
            fn from(p: Point<f32, $dim>) -> Self {
                <$glam>::from_array(*p.as_array())
            }
        }
    };
}

impl_glam_vector!(2, glam::Vec2);
impl_glam_vector!(3, glam::Vec3);
impl_glam_vector!(4, glam::Vec4);

macro_rules! impl_glam_matrix {
    ($dim:literal, $glam:ty) => {
        impl From<$glam> for Matrix<f32, $dim, $dim> {
            #[inline]
            fn from(m: $glam) -> Self {
                Self::new(m.transpose().to_cols_array_2d())
            }
        }

        impl From<Matrix<f32, $dim, $dim>> for $glam {
            #[inline]
            fn from(m: Matrix<f32, $dim, $dim>) -> Self {
                <$glam>::from_cols_array_2d(m.as_rows()).transpose()
            }
        }
    };
}

impl_glam_matrix!(2, glam::Mat2);
impl_glam_matrix!(3, glam::Mat3);
impl_glam_matrix!(4, glam::Mat4);
