//! # Bounce Core
//!
//! Reflection geometry of a sphere bouncing off an infinite plane.
//!
//! ## Architecture
//!
//! - `types`: Value types (Vec3, Ball, Plane, BounceResult) and vector helpers
//! - `bounce`: The bounce calculator and its faithful/corrected modes
//! - `scene`: YAML scene loader

pub mod bounce;
pub mod scene;
pub mod types;

pub use bounce::{bounce, BounceCalculator, BounceConfig, BounceError, BounceMode};
pub use scene::{PlaneSpec, Scene, SceneError, SceneLoader};
pub use types::{dot, normalize, Ball, BounceResult, Plane, Vec3};
