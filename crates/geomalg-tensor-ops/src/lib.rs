#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Overview
//!
//! Arithmetic over [`geomalg_tensor::Entity`] values is captured as an [`Expr`] tree
//! instead of being computed eagerly. Each node is checked for shape conformance when it
//! is built, so a malformed expression is rejected before any arithmetic happens. A valid
//! tree is evaluated one output component at a time, reading only the operand components
//! the operator needs, and [`Expr::construct`] assembles a fresh entity of the inferred
//! shape.
//!
//! # Quick Start
//!
//! ```rust
//! use geomalg_tensor::{Matrix2, Vector2};
//! use geomalg_tensor_ops::{Expr, TensorOpsError};
//!
//! let m = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
//! let v = Vector2::new([1.0, 1.0]);
//!
//! // inverse(m) * v, without materializing the inverse
//! let x: Vector2<f64> = (Expr::leaf(&m).inverse()? * &v)?.construct()?;
//! assert!((x.x() + 1.0).abs() < 1e-12);
//! assert!((x.y() - 1.0).abs() < 1e-12);
//! # Ok::<(), TensorOpsError>(())
//! ```

/// Per-node conformance checks.
pub mod check;

/// Result constructor.
pub mod construct;

/// Error types for building and evaluating expressions.
pub mod error;

/// Lazy per-index evaluator.
pub mod eval;

/// Expression builder.
pub mod expr;

/// Free functions building and evaluating a single operator application.
pub mod ops;

/// The operator catalog.
pub mod operator;

/// Numeric tolerance configuration.
pub mod policy;

pub use crate::error::{ConformanceError, EvalError, TensorOpsError};
pub use crate::expr::{ComponentSource, Expr, IntoExpr};
pub use crate::operator::Operator;
pub use crate::policy::NumericPolicy;
