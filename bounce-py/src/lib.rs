//! Python bindings for the bounce-core sphere/plane reflection library.
//!
//! Provides a simple Python API:
//!
//! ```python
//! from plane_bounce import BounceCalculator, Vec3, plane_normal_from_euler
//!
//! calc = BounceCalculator("corrected")
//! normal = plane_normal_from_euler(0.0, 0.0, 15.0)
//! result = calc.calculate(Vec3(0.0, 5.0, 0.0), Vec3(1.0, -1.0, 0.0), 1.0, normal, 0.0)
//! print(result.impact_point, result.final_position)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use bounce_core::types::{Ball, BounceResult as CoreBounceResult, Plane, Vec3 as CoreVec3};
use bounce_core::{BounceCalculator as CoreCalculator, BounceMode};

/// 3D vector for positions and directions.
#[pyclass]
#[derive(Clone, Copy)]
pub struct Vec3 {
    #[pyo3(get, set)]
    pub x: f64,
    #[pyo3(get, set)]
    pub y: f64,
    #[pyo3(get, set)]
    pub z: f64,
}

#[pymethods]
impl Vec3 {
    #[new]
    fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    fn __repr__(&self) -> String {
        format!("Vec3({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }

    fn magnitude(&self) -> f64 {
        CoreVec3::from(*self).magnitude()
    }

    fn to_tuple(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl From<CoreVec3> for Vec3 {
    fn from(v: CoreVec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<Vec3> for CoreVec3 {
    fn from(v: Vec3) -> Self {
        CoreVec3::new(v.x, v.y, v.z)
    }
}

/// Geometry of a single bounce.
#[pyclass]
#[derive(Clone, Copy)]
pub struct BounceResult {
    #[pyo3(get)]
    pub impact_point: Vec3,
    #[pyo3(get)]
    pub final_position: Vec3,
    #[pyo3(get)]
    pub approach_offset: Vec3,
    #[pyo3(get)]
    pub travel_to_impact: Vec3,
    #[pyo3(get)]
    pub clearance: f64,
}

#[pymethods]
impl BounceResult {
    fn __repr__(&self) -> String {
        format!(
            "BounceResult(impact={}, final={})",
            self.impact_point.__repr__(),
            self.final_position.__repr__()
        )
    }
}

impl From<CoreBounceResult> for BounceResult {
    fn from(r: CoreBounceResult) -> Self {
        Self {
            impact_point: r.impact_point.into(),
            final_position: r.final_position.into(),
            approach_offset: r.approach_offset.into(),
            travel_to_impact: r.travel_to_impact.into(),
            clearance: r.clearance,
        }
    }
}

/// Bounce calculator with a fixed denominator mode.
#[pyclass]
pub struct BounceCalculator {
    inner: CoreCalculator,
}

#[pymethods]
impl BounceCalculator {
    /// Create a calculator; `mode` is "faithful" (default) or "corrected".
    #[new]
    #[pyo3(signature = (mode = "faithful"))]
    fn new(mode: &str) -> PyResult<Self> {
        let mode: BounceMode = mode.parse().map_err(PyValueError::new_err)?;
        Ok(Self {
            inner: CoreCalculator::with_mode(mode),
        })
    }

    #[getter]
    fn mode(&self) -> &'static str {
        self.inner.config.mode.as_str()
    }

    /// Compute the bounce. Raises ValueError on a degenerate trajectory.
    fn calculate(
        &self,
        ball_position: Vec3,
        ball_travel_direction: Vec3,
        ball_radius: f64,
        plane_normal: Vec3,
        plane_distance: f64,
    ) -> PyResult<BounceResult> {
        let ball = Ball::new(
            ball_position.into(),
            ball_travel_direction.into(),
            ball_radius,
        );
        let plane = Plane {
            normal: plane_normal.into(),
            distance: plane_distance,
        };
        self.inner
            .calculate(&ball, &plane)
            .map(BounceResult::from)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }
}

/// Bounce with the faithful denominator.
#[pyfunction]
fn bounce(
    ball_position: Vec3,
    ball_travel_direction: Vec3,
    ball_radius: f64,
    plane_normal: Vec3,
    plane_distance: f64,
) -> PyResult<BounceResult> {
    bounce_core::bounce(
        ball_position.into(),
        ball_travel_direction.into(),
        ball_radius,
        plane_normal.into(),
        plane_distance,
    )
    .map(BounceResult::from)
    .map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
fn dot(a: Vec3, b: Vec3) -> f64 {
    bounce_core::dot(a.into(), b.into())
}

#[pyfunction]
fn normalize(v: Vec3) -> Vec3 {
    bounce_core::normalize(v.into()).into()
}

/// Unit plane normal from Euler angles in degrees.
#[pyfunction]
fn plane_normal_from_euler(x: f64, y: f64, z: f64) -> Vec3 {
    Plane::from_euler_degrees(CoreVec3::new(x, y, z), 0.0)
        .normal
        .into()
}

/// Python module definition.
#[pymodule]
fn plane_bounce(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Vec3>()?;
    m.add_class::<BounceResult>()?;
    m.add_class::<BounceCalculator>()?;
    m.add_function(wrap_pyfunction!(bounce, m)?)?;
    m.add_function(wrap_pyfunction!(dot, m)?)?;
    m.add_function(wrap_pyfunction!(normalize, m)?)?;
    m.add_function(wrap_pyfunction!(plane_normal_from_euler, m)?)?;
    Ok(())
}
