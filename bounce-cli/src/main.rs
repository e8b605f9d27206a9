//! plane-bounce CLI
//!
//! Subcommands:
//!   scene  Evaluate a named YAML scene from a scene directory
//!   list   List scenes available in a scene directory
//!   eval   Evaluate a bounce given inline ball/plane arguments
//!
//! Example:
//!   plane-bounce eval --position 0,5,0 --direction 1,-1,0 --radius 1 \
//!       --rotation 0,0,15 --distance 0 --mode corrected
//!
//! Logging follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bounce_core::{Ball, BounceMode, BounceResult, Plane, PlaneSpec, Scene, SceneLoader, Vec3};

#[derive(Parser, Debug)]
#[command(author, version, about = "Sphere/plane bounce calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate a scene file by name
    Scene(SceneArgs),
    /// List available scenes
    List(ListArgs),
    /// Evaluate a bounce from inline arguments
    Eval(EvalArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene name (file stem without .yaml)
    name: String,
    #[arg(long, default_value = "scenes")]
    dir: PathBuf,
    /// Override the scene's denominator mode
    #[arg(long)]
    mode: Option<BounceMode>,
}

#[derive(Args, Debug)]
struct ListArgs {
    #[arg(long, default_value = "scenes")]
    dir: PathBuf,
}

#[derive(Args, Debug)]
struct EvalArgs {
    /// Ball centre as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,0,0")]
    position: Vec3,
    /// Travel direction as x,y,z (need not be unit length)
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "1,-1,0")]
    direction: Vec3,
    /// Ball radius (not validated, negative values pass through)
    #[arg(long, default_value_t = 1.0, allow_hyphen_values = true)]
    radius: f64,
    /// Plane Euler rotation in degrees as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true, default_value = "0,0,0")]
    rotation: Vec3,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    distance: f64,
    #[arg(long, default_value_t = BounceMode::Faithful)]
    mode: BounceMode,
}

/// What gets printed for every evaluated bounce.
#[derive(Serialize, Debug)]
struct Report<'a> {
    scene: &'a str,
    mode: BounceMode,
    ball: Ball,
    plane: Plane,
    result: BounceResult,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{}'", s));
    }
    let mut xyz = [0.0; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid component '{}': {}", part, e))?;
    }
    Ok(Vec3::new(xyz[0], xyz[1], xyz[2]))
}

fn print_report(scene: &Scene, mode: BounceMode) -> Result<()> {
    let result = scene
        .evaluate_with(mode)
        .with_context(|| format!("evaluating scene '{}'", scene.name))?;
    let report = Report {
        scene: &scene.name,
        mode,
        ball: scene.ball,
        plane: scene.plane(),
        result,
    };
    print!("{}", serde_yaml::to_string(&report)?);
    Ok(())
}

fn cmd_scene(a: SceneArgs) -> Result<()> {
    let loader = SceneLoader::new(&a.dir);
    let scene = loader
        .load_scene(&a.name)
        .with_context(|| format!("loading scene '{}' from {}", a.name, a.dir.display()))?;
    let mode = a.mode.unwrap_or(scene.mode);
    info!(scene = %scene.name, %mode, "evaluating scene");
    print_report(&scene, mode)
}

fn cmd_list(a: ListArgs) -> Result<()> {
    let loader = SceneLoader::new(&a.dir);
    let names = loader
        .list_scenes()
        .with_context(|| format!("listing scenes in {}", a.dir.display()))?;
    if names.is_empty() {
        info!(dir = %a.dir.display(), "no scenes found");
    }
    for name in names {
        println!("{}", name);
    }
    Ok(())
}

fn cmd_eval(a: EvalArgs) -> Result<()> {
    let mut scene = Scene::new(
        "inline",
        Ball::new(a.position, a.direction, a.radius),
        PlaneSpec {
            rotation: a.rotation,
            distance: a.distance,
        },
    );
    scene.mode = a.mode;
    print_report(&scene, a.mode)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scene(a) => cmd_scene(a),
        Commands::List(a) => cmd_list(a),
        Commands::Eval(a) => cmd_eval(a),
    }
}
