//! Planar reflection of a sphere against an infinite plane.
//!
//! ## Construction
//!
//! ```text
//!        start ●
//!              |\
//!   approach   | \  travel_to_impact (B)
//!   offset (A) |  \
//!              v   ● impact           ● final = impact - 2A + B
//!   ═══════════════════════════════════════ plane
//! ```
//!
//! 1. `a = position · n - distance - radius` (clearance of the ball surface)
//! 2. `A = -n * a`
//! 3. `d = normalize(travel_direction)`
//! 4. `denom = A · travel_direction` (raw, or `A · d` in corrected mode)
//! 5. `B = d * (a² / denom)`
//! 6. `impact = position + B`
//! 7. `final = impact - A - A + B`
//!
//! ## Faithful vs. corrected denominator
//!
//! Step 4 dots `A` with the *raw* travel direction while step 5 scales the
//! *normalized* one. For a non-unit travel vector the impact point then lands
//! short of (or past) the plane. [`BounceMode::Faithful`] keeps that behaviour
//! as-is; [`BounceMode::Corrected`] uses `d` in both places so the impact
//! point sits exactly one radius above the plane.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{Ball, BounceResult, Plane, Vec3};

/// Error type for bounce computations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BounceError {
    /// The bounce length denominator was zero or the result was not finite.
    ///
    /// Happens when the ball travels parallel to the plane, has a zero
    /// travel direction, or already touches the plane.
    DegenerateTrajectory { denominator: f64 },
}

impl fmt::Display for BounceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BounceError::DegenerateTrajectory { denominator } => write!(
                f,
                "degenerate trajectory: bounce denominator is {}",
                denominator
            ),
        }
    }
}

impl std::error::Error for BounceError {}

/// Which travel vector feeds the bounce length denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BounceMode {
    /// Raw travel direction in the denominator (reference behaviour)
    #[default]
    Faithful,
    /// Normalized travel direction in the denominator
    Corrected,
}

impl BounceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BounceMode::Faithful => "faithful",
            BounceMode::Corrected => "corrected",
        }
    }
}

impl fmt::Display for BounceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BounceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "faithful" => Ok(BounceMode::Faithful),
            "corrected" => Ok(BounceMode::Corrected),
            other => Err(format!(
                "unknown bounce mode '{}', expected 'faithful' or 'corrected'",
                other
            )),
        }
    }
}

/// Configuration for bounce computation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BounceConfig {
    pub mode: BounceMode,
}

/// Bounce calculator for a ball against a single infinite plane.
///
/// Holds only configuration, so one instance can be shared freely between
/// threads and called every frame.
#[derive(Debug, Clone, Default)]
pub struct BounceCalculator {
    pub config: BounceConfig,
}

impl BounceCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BounceConfig) -> Self {
        Self { config }
    }

    pub fn with_mode(mode: BounceMode) -> Self {
        Self::with_config(BounceConfig { mode })
    }

    /// Compute the impact point and post-bounce position.
    ///
    /// # Arguments
    /// * `ball` - Ball position, travel direction and radius
    /// * `plane` - Plane with unit normal and signed distance
    ///
    /// # Returns
    /// The bounce geometry, or [`BounceError::DegenerateTrajectory`] when the
    /// reflection is undefined.
    pub fn calculate(&self, ball: &Ball, plane: &Plane) -> Result<BounceResult, BounceError> {
        let normal = plane.normal;

        // Clearance between the ball surface and the plane, along the normal
        let clearance = ball.position.dot(&normal) - plane.distance - ball.radius;
        let approach_offset = -normal * clearance;

        let direction = ball.travel_direction.normalized();
        let denominator = match self.config.mode {
            BounceMode::Faithful => approach_offset.dot(&ball.travel_direction),
            BounceMode::Corrected => approach_offset.dot(&direction),
        };

        if denominator == 0.0 {
            warn!(
                mode = %self.config.mode,
                clearance,
                "degenerate trajectory: zero bounce denominator"
            );
            return Err(BounceError::DegenerateTrajectory { denominator });
        }

        let bounce_length = clearance * clearance / denominator;
        let travel_to_impact = direction * bounce_length;
        let impact_point = ball.position + travel_to_impact;
        let final_position = impact_point - approach_offset - approach_offset + travel_to_impact;

        if !impact_point.is_finite() || !final_position.is_finite() {
            warn!(
                mode = %self.config.mode,
                denominator,
                "degenerate trajectory: non-finite bounce result"
            );
            return Err(BounceError::DegenerateTrajectory { denominator });
        }

        debug!(
            mode = %self.config.mode,
            clearance,
            bounce_length,
            "computed bounce"
        );

        Ok(BounceResult {
            impact_point,
            final_position,
            approach_offset,
            travel_to_impact,
            clearance,
        })
    }
}

/// Bounce a ball off a plane using the faithful denominator.
///
/// `plane_normal` must be unit length; it is used as given.
pub fn bounce(
    ball_position: Vec3,
    ball_travel_direction: Vec3,
    ball_radius: f64,
    plane_normal: Vec3,
    plane_distance: f64,
) -> Result<BounceResult, BounceError> {
    let ball = Ball::new(ball_position, ball_travel_direction, ball_radius);
    let plane = Plane {
        normal: plane_normal,
        distance: plane_distance,
    };
    BounceCalculator::new().calculate(&ball, &plane)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    fn floor() -> Plane {
        Plane::default()
    }

    #[test]
    fn test_straight_down_bounce() {
        let radius = 0.5;
        let height = 3.0;
        let result = bounce(
            Vec3::new(0.0, height, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            radius,
            Vec3::UP,
            0.0,
        )
        .unwrap();

        assert!(
            result.impact_point.approx_eq(&Vec3::new(0.0, radius, 0.0), TOL),
            "impact at {:?}",
            result.impact_point
        );
        // Straight back up to the starting height
        assert!(result
            .final_position
            .approx_eq(&Vec3::new(0.0, height, 0.0), TOL));
        assert!((result.clearance - (height - radius)).abs() < TOL);
    }

    #[test]
    fn test_drop_from_twice_the_radius_returns_to_2r() {
        let r = 1.25;
        let result = bounce(
            Vec3::new(0.0, 2.0 * r, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            r,
            Vec3::UP,
            0.0,
        )
        .unwrap();

        assert!(result.impact_point.approx_eq(&Vec3::new(0.0, r, 0.0), TOL));
        assert!(result
            .final_position
            .approx_eq(&Vec3::new(0.0, 2.0 * r, 0.0), TOL));
    }

    #[test]
    fn test_offset_plane_distance() {
        let result = bounce(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            1.0,
            Vec3::UP,
            2.0,
        )
        .unwrap();

        assert!(result.impact_point.approx_eq(&Vec3::new(0.0, 3.0, 0.0), TOL));
        assert!(result
            .approach_offset
            .approx_eq(&Vec3::new(0.0, -7.0, 0.0), TOL));
    }

    #[test]
    fn test_intermediate_vectors() {
        let result = bounce(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            1.0,
            Vec3::UP,
            0.0,
        )
        .unwrap();

        assert!(result
            .approach_offset
            .approx_eq(&Vec3::new(0.0, -4.0, 0.0), TOL));
        assert!(result
            .travel_to_impact
            .approx_eq(&Vec3::new(0.0, -4.0, 0.0), TOL));
    }

    #[test]
    fn test_parallel_travel_is_degenerate() {
        let result = bounce(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            1.0,
            Vec3::UP,
            0.0,
        );

        match result {
            Err(BounceError::DegenerateTrajectory { denominator }) => {
                assert_eq!(denominator, 0.0);
            }
            other => panic!("Expected DegenerateTrajectory, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_travel_is_degenerate() {
        let result = bounce(Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO, 1.0, Vec3::UP, 0.0);
        assert!(matches!(
            result,
            Err(BounceError::DegenerateTrajectory { .. })
        ));
    }

    #[test]
    fn test_touching_plane_is_degenerate() {
        let result = bounce(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            1.0,
            Vec3::UP,
            0.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_input_is_degenerate() {
        let result = bounce(
            Vec3::new(0.0, 5.0, 0.0),
            Vec3::new(f64::NAN, -1.0, 0.0),
            1.0,
            Vec3::UP,
            0.0,
        );
        assert!(matches!(
            result,
            Err(BounceError::DegenerateTrajectory { .. })
        ));
    }

    #[test]
    fn test_radius_scales_clearance_linearly() {
        let offset_len = |radius: f64| {
            bounce(
                Vec3::new(0.0, 10.0, 0.0),
                Vec3::new(0.3, -1.0, 0.0),
                radius,
                Vec3::UP,
                0.0,
            )
            .unwrap()
            .approach_offset
            .magnitude()
        };

        let r1 = offset_len(1.0);
        let r2 = offset_len(2.0);
        let r4 = offset_len(4.0);

        assert!((r1 - 9.0).abs() < TOL);
        assert!((r2 - 8.0).abs() < TOL);
        // Equal radius steps give equal offset steps
        assert!(((r1 - r2) * 2.0 - (r2 - r4)).abs() < TOL);
    }

    #[test]
    fn test_repeated_calls_are_bit_identical() {
        let ball = Ball::new(Vec3::new(0.3, 7.1, -2.2), Vec3::new(0.7, -1.3, 0.4), 0.8);
        let plane = Plane::from_euler_degrees(Vec3::new(12.0, 33.0, -8.0), 0.6);
        let calc = BounceCalculator::new();

        let first = calc.calculate(&ball, &plane).unwrap();
        let second = calc.calculate(&ball, &plane).unwrap();

        assert_eq!(first.impact_point.x.to_bits(), second.impact_point.x.to_bits());
        assert_eq!(first.impact_point.y.to_bits(), second.impact_point.y.to_bits());
        assert_eq!(first.impact_point.z.to_bits(), second.impact_point.z.to_bits());
        assert_eq!(first, second);
    }

    #[test]
    fn test_faithful_diagonal_uses_raw_denominator() {
        let ball = Ball::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 1.0);
        let result = BounceCalculator::new().calculate(&ball, &floor()).unwrap();

        // denom = (0,-4,0)·(1,-1,0) = 4, so B has length 16/4 = 4 along d
        let h = 4.0 / 2f64.sqrt();
        assert!(result
            .travel_to_impact
            .approx_eq(&Vec3::new(h, -h, 0.0), TOL));
        assert!(result
            .impact_point
            .approx_eq(&Vec3::new(h, 5.0 - h, 0.0), TOL));
    }

    #[test]
    fn test_corrected_diagonal_mirrors_across_plane() {
        let ball = Ball::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, -1.0, 0.0), 1.0);
        let calc = BounceCalculator::with_mode(BounceMode::Corrected);
        let result = calc.calculate(&ball, &floor()).unwrap();

        assert!(result.impact_point.approx_eq(&Vec3::new(4.0, 1.0, 0.0), TOL));
        assert!(result
            .final_position
            .approx_eq(&Vec3::new(8.0, 5.0, 0.0), TOL));
    }

    #[test]
    fn test_modes_differ_only_for_non_unit_travel() {
        let plane = floor();
        let faithful = BounceCalculator::with_mode(BounceMode::Faithful);
        let corrected = BounceCalculator::with_mode(BounceMode::Corrected);

        let unit = Ball::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -1.0, 0.0), 1.0);
        assert_eq!(
            faithful.calculate(&unit, &plane).unwrap(),
            corrected.calculate(&unit, &plane).unwrap()
        );

        let scaled = Ball::new(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -2.0, 0.0), 1.0);
        let f = faithful.calculate(&scaled, &plane).unwrap();
        let c = corrected.calculate(&scaled, &plane).unwrap();

        assert!(f.impact_point.approx_eq(&Vec3::new(0.0, 3.0, 0.0), TOL));
        assert!(c.impact_point.approx_eq(&Vec3::new(0.0, 1.0, 0.0), TOL));
    }

    #[test]
    fn test_corrected_impact_touches_tilted_plane() {
        let plane = Plane::from_euler_degrees(Vec3::new(25.0, 40.0, -15.0), 1.5);
        let start = plane.origin() + plane.normal * 6.0 + Vec3::new(0.4, 0.0, -0.3);
        let travel = -plane.normal * 3.0 + Vec3::new(1.0, 0.2, 0.5);
        let ball = Ball::new(start, travel, 0.75);

        let result = BounceCalculator::with_mode(BounceMode::Corrected)
            .calculate(&ball, &plane)
            .unwrap();

        assert!((plane.signed_distance(result.impact_point) - ball.radius).abs() < 1e-9);
        // Reflection preserves height above the plane
        assert!(
            (plane.signed_distance(result.final_position) - plane.signed_distance(start)).abs()
                < 1e-9
        );
    }

    #[test]
    fn test_extreme_travel_magnitudes_keep_direction() {
        let start = Vec3::new(0.0, 5.0, 0.0);
        let plane = floor();
        let faithful = BounceCalculator::new();
        let corrected = BounceCalculator::with_mode(BounceMode::Corrected);

        let unit = Ball::new(start, Vec3::new(1.0, -1.0, 0.0), 1.0);
        let unit_dir = faithful
            .calculate(&unit, &plane)
            .unwrap()
            .travel_to_impact
            .normalized();

        for travel in [Vec3::new(1e-170, -1e-170, 0.0), Vec3::new(1e200, -1e200, 0.0)] {
            let ball = Ball::new(start, travel, 1.0);

            let f = faithful.calculate(&ball, &plane).unwrap();
            assert!(
                f.travel_to_impact.normalized().approx_eq(&unit_dir, 1e-12),
                "faithful direction for {:?} was {:?}",
                travel,
                f.travel_to_impact
            );

            let c = corrected.calculate(&ball, &plane).unwrap();
            assert!(
                c.impact_point.approx_eq(&Vec3::new(4.0, 1.0, 0.0), TOL),
                "corrected impact for {:?} was {:?}",
                travel,
                c.impact_point
            );
            assert!(c.final_position.approx_eq(&Vec3::new(8.0, 5.0, 0.0), TOL));
        }
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("faithful".parse::<BounceMode>(), Ok(BounceMode::Faithful));
        assert_eq!("Corrected".parse::<BounceMode>(), Ok(BounceMode::Corrected));
        assert!("raw".parse::<BounceMode>().is_err());
        assert_eq!(BounceMode::default(), BounceMode::Faithful);
    }

    #[test]
    fn test_error_display() {
        let err = BounceError::DegenerateTrajectory { denominator: 0.0 };
        assert!(err.to_string().contains("degenerate trajectory"));
    }
}
