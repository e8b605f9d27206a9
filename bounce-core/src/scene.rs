//! Scene configuration loader.
//!
//! A scene is one ball/plane setup stored as YAML, so setups can be shared
//! and replayed without recompiling.
//!
//! ## Directory Structure
//!
//! ```text
//! scenes/
//! ├── straight_drop.yaml
//! ├── diagonal.yaml
//! └── tilted_plane.yaml
//! ```
//!
//! ## File Format
//!
//! ```yaml
//! name: Tilted plane
//! ball:
//!   position: { x: 0.0, y: 6.0, z: 0.0 }
//!   travel_direction: { x: 1.0, y: -1.0, z: 0.0 }
//!   radius: 1.0
//! plane:
//!   rotation: { x: 0.0, y: 0.0, z: 20.0 }
//!   distance: 0.5
//! mode: corrected
//! ```
//!
//! Every field except `name` is optional and falls back to the defaults of
//! [`Ball`], [`PlaneSpec`] and [`BounceMode`]. Unknown keys are rejected.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bounce::{BounceCalculator, BounceError, BounceMode};
use crate::types::{Ball, BounceResult, Plane, Vec3};

/// Error type for scene loading operations.
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(serde_yaml::Error),
    NotFound(String),
    Bounce(BounceError),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "YAML parse error: {}", e),
            SceneError::NotFound(name) => write!(f, "Scene not found: {}", name),
            SceneError::Bounce(e) => write!(f, "Bounce failed: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::IoError(e) => Some(e),
            SceneError::ParseError(e) => Some(e),
            SceneError::Bounce(e) => Some(e),
            SceneError::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(err: std::io::Error) -> Self {
        SceneError::IoError(err)
    }
}

impl From<serde_yaml::Error> for SceneError {
    fn from(err: serde_yaml::Error) -> Self {
        SceneError::ParseError(err)
    }
}

impl From<BounceError> for SceneError {
    fn from(err: BounceError) -> Self {
        SceneError::Bounce(err)
    }
}

/// Plane as an editor would describe it: Euler rotation plus offset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaneSpec {
    /// Euler angles in degrees, applied to the up axis
    pub rotation: Vec3,
    /// Offset along the rotated normal from the origin
    pub distance: f64,
}

impl PlaneSpec {
    pub fn to_plane(&self) -> Plane {
        Plane::from_euler_degrees(self.rotation, self.distance)
    }
}

/// A single ball/plane configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    pub name: String,
    #[serde(default)]
    pub ball: Ball,
    #[serde(default)]
    pub plane: PlaneSpec,
    #[serde(default)]
    pub mode: BounceMode,
}

impl Scene {
    pub fn new(name: impl Into<String>, ball: Ball, plane: PlaneSpec) -> Self {
        Self {
            name: name.into(),
            ball,
            plane,
            mode: BounceMode::default(),
        }
    }

    /// Parse a scene from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, SceneError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn to_yaml(&self) -> Result<String, SceneError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn plane(&self) -> Plane {
        self.plane.to_plane()
    }

    /// Run the bounce for this scene with its own mode.
    pub fn evaluate(&self) -> Result<BounceResult, SceneError> {
        self.evaluate_with(self.mode)
    }

    /// Run the bounce for this scene, overriding its mode.
    pub fn evaluate_with(&self, mode: BounceMode) -> Result<BounceResult, SceneError> {
        let calculator = BounceCalculator::with_mode(mode);
        Ok(calculator.calculate(&self.ball, &self.plane())?)
    }
}

/// Scene loader with configurable base directory.
pub struct SceneLoader {
    base_path: PathBuf,
}

impl SceneLoader {
    /// Create a new loader reading `*.yaml` files from `base_path`.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Load a scene by name (without .yaml extension).
    ///
    /// # Example
    /// ```ignore
    /// let loader = SceneLoader::new("scenes");
    /// let scene = loader.load_scene("diagonal")?;
    /// let result = scene.evaluate()?;
    /// ```
    pub fn load_scene(&self, name: &str) -> Result<Scene, SceneError> {
        let path = self.base_path.join(format!("{}.yaml", name));
        if !path.exists() {
            return Err(SceneError::NotFound(name.to_string()));
        }
        let contents = fs::read_to_string(&path)?;
        let scene = Scene::from_yaml(&contents)?;
        debug!(scene = %scene.name, path = %path.display(), "loaded scene");
        Ok(scene)
    }

    /// List all available scenes, sorted by name.
    pub fn list_scenes(&self) -> Result<Vec<String>, SceneError> {
        if !self.base_path.exists() {
            return Ok(vec![]);
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if name.ends_with(".yaml") {
                names.push(name.trim_end_matches(".yaml").to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}

// =============================================================================
// Tests
// =============================================================================
