use approx::assert_relative_eq;
use geomalg_tensor::{
    heterogeneous_vector, Component, Entity, Frame, Homogeneity, Index, Matrix, Matrix2, Point2,
    Point3, Shape, Vector2, Vector3,
};
use geomalg_tensor_ops::{
    ops, ConformanceError, EvalError, Expr, NumericPolicy, Operator, TensorOpsError,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

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
struct Radians(f64);

impl Component<f64> for Radians {
    fn to_scalar(self) -> f64 {
        self.0
    }

    fn from_scalar(value: f64) -> Self {
        Radians(value)
    }
}

heterogeneous_vector! {
    /// A planar pose.
    struct Pose<f64> {
        x: Meters,
        y: Meters,
        heading: Radians,
    }
}

#[test]
fn unit_axes_cross_and_dot() -> Result<(), TensorOpsError> {
    init_logger();
    let a = Vector3::new([1.0, 0.0, 0.0]);
    let b = Vector3::new([0.0, 1.0, 0.0]);

    let c: Vector3<f64> = Expr::leaf(&a).cross_product(&b)?.construct()?;
    assert_eq!(c.as_array(), &[0.0, 0.0, 1.0]);
    assert_eq!(ops::dot_product(&a, &b)?, 0.0);
    Ok(())
}

#[test]
fn determinant_and_inverse_of_2x2() -> Result<(), TensorOpsError> {
    init_logger();
    let m = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
    assert_relative_eq!(ops::determinant(&m)?, -2.0, epsilon = 1e-12);

    let inv: Matrix2<f64> = ops::inverse(&m)?;
    assert_relative_eq!(inv[(0, 0)], -2.0, epsilon = 1e-12);
    assert_relative_eq!(inv[(0, 1)], 1.0, epsilon = 1e-12);
    assert_relative_eq!(inv[(1, 0)], 1.5, epsilon = 1e-12);
    assert_relative_eq!(inv[(1, 1)], -0.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn point_vector_affine_arithmetic() -> Result<(), TensorOpsError> {
    let p = Point2::new([1.0, 2.0]);
    let v = Vector2::new([3.0, 4.0]);

    let q: Point2<f64> = (Expr::leaf(&p) + &v)?.construct()?;
    assert_eq!(q, Point2::new([4.0, 6.0]));

    // (p + v) - p, built as one tree
    let back: Vector2<f64> = ((Expr::leaf(&p) + &v)? - &p)?.construct()?;
    assert_eq!(back, v);
    Ok(())
}

#[test]
fn build_time_failures_do_no_arithmetic() {
    let a = Vector2::new([1.0, 2.0]);
    let b = Vector3::new([1.0, 2.0, 3.0]);
    let left = Matrix::<f64, 2, 3>::zeros();
    let right = Matrix::<f64, 2, 2>::zeros();

    assert_eq!(
        Expr::leaf(&a).dot_product(&b).map(|e| e.shape()),
        Err(ConformanceError::ShapeMismatch {
            op: Operator::DotProduct,
            lhs: Shape::Vector(2),
            rhs: Shape::Vector(3),
        })
    );
    assert_eq!(
        Expr::leaf(&left).matrix_product(&right).map(|e| e.shape()),
        Err(ConformanceError::InnerDimensionMismatch {
            op: Operator::MatrixProduct,
            lhs: Shape::Matrix { rows: 2, cols: 3 },
            rhs: Shape::Matrix { rows: 2, cols: 2 },
        })
    );
}

fn identity_determinant<const N: usize>() -> Result<f64, TensorOpsError> {
    ops::determinant(&Matrix::<f64, N, N>::identity())
}

#[test]
fn identity_determinant_is_one() -> Result<(), TensorOpsError> {
    assert_eq!(identity_determinant::<2>()?, 1.0);
    assert_eq!(identity_determinant::<3>()?, 1.0);
    assert_eq!(identity_determinant::<4>()?, 1.0);
    assert_eq!(identity_determinant::<5>()?, 1.0);
    assert_eq!(identity_determinant::<6>()?, 1.0);
    // LU path
    assert_eq!(identity_determinant::<7>()?, 1.0);
    assert_eq!(identity_determinant::<9>()?, 1.0);
    Ok(())
}

#[test]
fn large_inverse_through_lu() -> Result<(), TensorOpsError> {
    init_logger();
    let m = Matrix::<f64, 8, 8>::from_fn(|r, c| {
        if r == c {
            10.0 + r as f64
        } else {
            1.0 / (1.0 + r as f64 + c as f64)
        }
    });
    let inv = Expr::leaf(&m).inverse()?;
    let product: Matrix<f64, 8, 8> = Expr::leaf(&m).matrix_product(inv)?.construct()?;
    for r in 0..8 {
        for c in 0..8 {
            let expected = if r == c { 1.0 } else { 0.0 };
            assert_relative_eq!(product[(r, c)], expected, epsilon = 1e-10);
        }
    }

    // cofactor expansion and LU agree on the leading 6x6 block
    let block = Matrix::<f64, 6, 6>::from_fn(|r, c| m[(r, c)]);
    let padded = Matrix::<f64, 7, 7>::from_fn(|r, c| match (r, c) {
        (6, 6) => 1.0,
        (6, _) | (_, 6) => 0.0,
        _ => m[(r, c)],
    });
    assert_relative_eq!(
        ops::determinant(&block)?,
        ops::determinant(&padded)?,
        max_relative = 1e-12
    );
    Ok(())
}

#[test]
fn retry_with_stricter_policy() -> Result<(), TensorOpsError> {
    let m = Matrix2::new([[1.0, 1.0], [1.0, 1.0 + 1e-12]]);
    let inv = Expr::leaf(&m).inverse()?;
    assert!(inv.construct::<Matrix2<f64>>().is_ok());

    let policy = NumericPolicy::default().with_singular_tolerance(1e-9);
    assert_eq!(
        inv.construct_with::<Matrix2<f64>>(&policy),
        Err(TensorOpsError::Eval(EvalError::Singular(Operator::Inverse)))
    );
    Ok(())
}

#[test]
fn heterogeneous_entities() -> Result<(), TensorOpsError> {
    let pose = Pose {
        x: Meters(1.0),
        y: Meters(2.0),
        heading: Radians(0.5),
    };
    let delta = Pose {
        x: Meters(0.5),
        y: Meters(-1.0),
        heading: Radians(0.25),
    };

    let e = Expr::leaf(&pose).add(&delta)?;
    assert_eq!(e.homogeneity(), Homogeneity::Heterogeneous);
    assert_eq!(e.frame(), None);

    let moved: Pose = e.construct()?;
    assert_eq!(moved.x, Meters(1.5));
    assert_eq!(moved.y, Meters(1.0));
    assert_eq!(moved.heading, Radians(0.75));

    // reductions mix components into one scalar
    let d = Expr::leaf(&pose).dot_product(&delta)?;
    assert_eq!(d.homogeneity(), Homogeneity::Homogeneous);
    assert_relative_eq!(d.scalar()?, 0.5 - 2.0 + 0.125);
    Ok(())
}

#[test]
fn frames_must_agree() -> Result<(), TensorOpsError> {
    let body = Frame::new(1);
    let world = Frame::WORLD;
    let p = Point3::in_frame([1.0, 2.0, 3.0], body);
    let v = Vector3::in_frame([1.0, 0.0, 0.0], world);

    let res = Expr::leaf(&p).add(&v).map(|e| e.shape());
    assert_eq!(
        res,
        Err(ConformanceError::FrameMismatch {
            op: Operator::Add,
            lhs: body,
            rhs: world,
        })
    );

    let q: Point3<f64> = Expr::leaf(&p).add(&v.with_frame(body))?.construct()?;
    assert_eq!(q.reference_frame(), body);
    Ok(())
}

#[test]
fn shared_operands_across_threads() -> Result<(), TensorOpsError> {
    let m = Matrix::<f64, 3, 3>::new([[2.0, 0.0, 1.0], [1.0, 3.0, 0.0], [0.0, 1.0, 4.0]]);
    let v = Vector3::new([1.0, 2.0, 3.0]);

    let results = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let (m, v) = (&m, &v);
                s.spawn(move || -> Result<f64, TensorOpsError> {
                    let e = Expr::leaf(m).matrix_vector_product(v)?;
                    Ok(e.evaluate(Index::Vector(i % 3))?)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| panic!("worker panicked")))
            .collect::<Result<Vec<_>, _>>()
    })?;

    assert_eq!(results, vec![5.0, 7.0, 14.0, 5.0]);
    Ok(())
}

#[test]
fn one_expression_evaluated_from_many_threads() -> Result<(), TensorOpsError> {
    let a = Vector3::new([1.0, 2.0, 2.0]);
    let e = Expr::leaf(&a).normalize()?;

    let values = std::thread::scope(|s| {
        let e = &e;
        let handles: Vec<_> = (0..3)
            .map(|i| s.spawn(move || e.evaluate(Index::Vector(i))))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap_or_else(|_| panic!("worker panicked")))
            .collect::<Result<Vec<_>, _>>()
    })?;

    assert_relative_eq!(values[0], 1.0 / 3.0);
    assert_relative_eq!(values[1], 2.0 / 3.0);
    assert_relative_eq!(values[2], 2.0 / 3.0);
    Ok(())
}

#[test]
fn single_component_of_a_chain() -> Result<(), TensorOpsError> {
    let a = Matrix2::new([[1.0, 2.0], [3.0, 4.0]]);
    let b = Matrix2::new([[0.0, 1.0], [1.0, 0.0]]);

    let e = ((Expr::leaf(&a) * &b)?.transpose()? * Expr::constant(2.0))?;
    assert_eq!(e.evaluate(Index::Matrix(0, 1))?, 8.0);
    assert_eq!(
        e.evaluate(Index::Matrix(2, 0)),
        Err(EvalError::IndexOutOfBounds {
            index: Index::Matrix(2, 0),
            shape: Shape::Matrix { rows: 2, cols: 2 },
        })
    );
    assert_eq!(a.component(Index::Matrix(0, 0)), 1.0);
    Ok(())
}

#[test]
fn normalize_vectors_with_extreme_components() -> Result<(), TensorOpsError> {
    let large: Vector2<f32> = ops::normalize(&Vector2::<f32>::new([1e20, 0.0]))?;
    assert_eq!(large, Vector2::new([1.0, 0.0]));
    assert_relative_eq!(ops::magnitude(&large)?, 1.0);

    let small: Vector2<f64> = ops::normalize(&Vector2::<f64>::new([1e-170, 0.0]))?;
    assert_eq!(small, Vector2::new([1.0, 0.0]));
    Ok(())
}
