//! Core value types for the bounce computation.
//!
//! Everything here is `Copy` and carries no identity: a ball and a plane go
//! in, a [`BounceResult`] comes out. Units are whatever the caller uses for
//! positions; the computation is scale-free.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

// =============================================================================
// Vec3 - 3D Vector
// =============================================================================

/// A 3D vector used for positions, directions and offsets.
///
/// Coordinate system:
/// - X: horizontal
/// - Y: vertical (positive upward, the unrotated plane normal)
/// - Z: horizontal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// World up axis, the normal of an unrotated plane.
    pub const UP: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Squared magnitude (avoids sqrt for comparisons)
    pub fn magnitude_squared(&self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Magnitude (length) of the vector.
    ///
    /// Computed with `hypot`, so components far below 1e-154 or above
    /// 1e154 neither underflow to zero nor overflow to infinity.
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y).hypot(self.z)
    }

    /// Returns a unit vector in the same direction.
    ///
    /// A zero-length vector normalizes to [`Vec3::ZERO`] instead of NaN.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag > 0.0 {
            *self / mag
        } else {
            Self::ZERO
        }
    }

    /// Dot product
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// True when no component is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Component-wise approximate equality.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

// Operator overloads for Vec3
impl Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Standard three-component dot product.
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a.dot(&b)
}

/// Euclidean normalization; the zero vector maps to itself.
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalized()
}

// =============================================================================
// Ball
// =============================================================================

/// A ball about to bounce.
///
/// `travel_direction` does not have to be unit length. Its magnitude only
/// matters in [`BounceMode::Faithful`](crate::bounce::BounceMode::Faithful).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Ball {
    pub position: Vec3,
    pub travel_direction: Vec3,
    pub radius: f64,
}

impl Ball {
    pub fn new(position: Vec3, travel_direction: Vec3, radius: f64) -> Self {
        Self {
            position,
            travel_direction,
            radius,
        }
    }
}

impl Default for Ball {
    /// Unit-radius ball at the origin heading down and along +X.
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            travel_direction: Vec3::new(1.0, -1.0, 0.0),
            radius: 1.0,
        }
    }
}

// =============================================================================
// Plane
// =============================================================================

/// An infinite plane `{ p : p · normal = distance }`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f64,
}

impl Plane {
    /// Builds a plane, normalizing `normal` so the distance term stays valid.
    pub fn new(normal: Vec3, distance: f64) -> Self {
        Self {
            normal: normal.normalized(),
            distance,
        }
    }

    /// Builds a plane whose normal is the up axis rotated by Euler angles.
    ///
    /// Angles are in degrees and applied Z first, then X, then Y, the order
    /// scene editors commonly use for inspector rotations.
    pub fn from_euler_degrees(rotation: Vec3, distance: f64) -> Self {
        Self {
            normal: rotate_up_euler_degrees(rotation),
            distance,
        }
    }

    /// Point on the plane closest to the origin.
    pub fn origin(&self) -> Vec3 {
        self.normal * self.distance
    }

    /// Signed distance from `point` to the plane, positive on the normal side.
    pub fn signed_distance(&self, point: Vec3) -> f64 {
        point.dot(&self.normal) - self.distance
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self {
            normal: Vec3::UP,
            distance: 0.0,
        }
    }
}

/// Rotates `(0, 1, 0)` by Z, then X, then Y (degrees).
fn rotate_up_euler_degrees(rotation: Vec3) -> Vec3 {
    let (sx, cx) = rotation.x.to_radians().sin_cos();
    let (sy, cy) = rotation.y.to_radians().sin_cos();
    let (sz, cz) = rotation.z.to_radians().sin_cos();

    // Rz * up
    let v = Vec3::new(-sz, cz, 0.0);
    // Rx
    let v = Vec3::new(v.x, v.y * cx - v.z * sx, v.y * sx + v.z * cx);
    // Ry
    Vec3::new(v.x * cy + v.z * sy, v.y, -v.x * sy + v.z * cy)
}

// =============================================================================
// Bounce Result
// =============================================================================

/// Output of a single bounce.
///
/// `approach_offset` and `travel_to_impact` are the two construction vectors
/// a debug view draws between the start, impact and final positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BounceResult {
    /// Ball centre at the moment its surface touches the plane
    pub impact_point: Vec3,
    /// Ball centre after reflecting off the plane
    pub final_position: Vec3,
    /// VectorA: from the surface contact point back to the ball centre
    pub approach_offset: Vec3,
    /// VectorB: from the starting position to the impact point
    pub travel_to_impact: Vec3,
    /// Signed clearance between the ball surface and the plane
    pub clearance: f64,
}

// =============================================================================
// Tests
// =============================================================================
