#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! `geomalg-tensor` defines the entities the expression engine in `geomalg-tensor-ops`
//! operates on. Every entity type registers three static properties once, through the
//! [`Entity`] trait:
//!
//! - **Rank**: 0 (scalar), 1 (vector or point), 2 (matrix).
//! - **Shape**: the dimension of a rank-1 entity or the rows and columns of a matrix.
//! - **Homogeneity**: whether all components share one numeric type.
//!
//! A type that does not implement [`Entity`] cannot be used as an operand; this is a
//! compile error, not a runtime one.
//!
//! # Quick Start
//!
//! ```rust
//! use geomalg_tensor::{classify, Entity, Index, Matrix, Rank, Shape, Vector3};
//!
//! let v = Vector3::new([1.0, 2.0, 3.0]);
//! assert_eq!(v.component(Index::Vector(1)), 2.0);
//!
//! let info = classify::<Matrix<f64, 2, 3>>();
//! assert_eq!(info.rank, Rank::Matrix);
//! assert_eq!(info.shape, Shape::Matrix { rows: 2, cols: 3 });
//! ```
//!
//! # Heterogeneous entities
//!
//! Entities whose components carry distinct types (for instance a point whose axes have
//! different physical units) are declared with [`heterogeneous_vector!`]; each field type
//! implements [`Component`] to convert to and from the common evaluation scalar.

/// Per-component conversion used by heterogeneous entities.
pub mod component;

/// Entity classification: rank, shape, index, homogeneity and reference frames.
pub mod entity;

/// Error types for entity construction.
pub mod error;

/// Conversions between entities and `glam` types.
pub mod interop;

/// Fixed-size matrices.
pub mod matrix;

/// Fixed-size points.
pub mod point;

/// Rank-0 entities for the primitive floating point types.
pub mod scalar;

/// Serde support for the concrete entities.
#[cfg(feature = "serde")]
pub mod serde;

/// Fixed-size vectors.
pub mod vector;

pub use crate::component::Component;
pub use crate::entity::{
    classify, Classification, Entity, Frame, FromComponents, Homogeneity, Index, Indices, Rank,
    Shape,
};
pub use crate::error::TensorError;
pub use crate::matrix::Matrix;
pub use crate::point::Point;
pub use crate::vector::Vector;

/// Type alias for a 2-dimensional vector.
pub type Vector2<T> = Vector<T, 2>;

/// Type alias for a 3-dimensional vector.
pub type Vector3<T> = Vector<T, 3>;

/// Type alias for a 2-dimensional point.
pub type Point2<T> = Point<T, 2>;

/// Type alias for a 3-dimensional point.
pub type Point3<T> = Point<T, 3>;

/// Type alias for a 2x2 matrix.
pub type Matrix2<T> = Matrix<T, 2, 2>;

/// Type alias for a 3x3 matrix.
pub type Matrix3<T> = Matrix<T, 3, 3>;

/// Type alias for a 4x4 matrix.
pub type Matrix4<T> = Matrix<T, 4, 4>;
