//! CLI command implementations.

use planar_body::shapes::box_polygon;
use planar_body::{ConvexPolygon, RigidBody};
use planar_math::Vec2;
use planar_telemetry::TracingSink;
use planar_world::{World, WorldConfig};
use serde::{Deserialize, Serialize};

/// Final-state snapshot written by `simulate` and read by `inspect`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Steps completed.
    pub step: u64,
    /// Accumulated simulation time in seconds.
    pub sim_time: f64,
    /// Every live body, in arena order.
    pub bodies: Vec<RigidBody>,
}

/// Run the canned stacking scene: a fixed ground slab and a column of
/// unit boxes settling under gravity.
pub fn simulate(
    config_path: &str,
    steps: u64,
    boxes: u32,
    output_path: Option<&str>,
    telemetry: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Planar Simulation");
    println!("─────────────────");

    let config = match std::fs::read_to_string(config_path) {
        Ok(content) => {
            println!("Config: {config_path}");
            WorldConfig::from_toml_str(&content)?
        }
        Err(_) => {
            println!("Config: defaults ({config_path} not found)");
            WorldConfig::default()
        }
    };
    println!(
        "dt={:.5}s  iterations={}  gravity=({}, {})",
        config.dt, config.iterations, config.gravity[0], config.gravity[1]
    );
    println!();

    let mut world = World::new(config)?;
    if telemetry {
        tracing_subscriber::fmt().init();
        world
            .telemetry_mut()
            .add_sink(Box::new(TracingSink::new(tracing::Level::INFO)));
    }

    world.spawn_fixed(box_polygon(20.0, 1.0)?, 0.6, Vec2::ZERO)?;
    for i in 0..boxes {
        // Slight lateral stagger so the stack has to find equilibrium.
        let x = 0.05 * if i % 2 == 0 { 1.0 } else { -1.0 };
        let y = 1.05 + 1.05 * i as f32;
        world.spawn_dynamic(box_polygon(1.0, 1.0)?, 1.0, 0.6, Vec2::new(x, y))?;
    }

    let report_interval = (steps / 10).max(1);
    for step in 0..steps {
        let summary = world.step()?;
        if step % report_interval == 0 || step + 1 == steps {
            println!(
                "step {:>5}  t={:>7.3}s  arbiters={:<3} contacts={:<3} max_pen={:.4}  KE={:.4e}",
                step,
                world.sim_time(),
                summary.arbiters,
                summary.contacts,
                summary.max_penetration,
                summary.kinetic_energy,
            );
        }
    }

    println!();
    println!("Final body states:");
    for (_, body) in world.bodies().iter() {
        println!(
            "  body {:>3}  pos=({:>8.4}, {:>8.4})  rot={:>7.4}  |v|={:.4}",
            body.id().raw(),
            body.position.x,
            body.position.y,
            body.rotation,
            body.velocity.length(),
        );
    }

    if let Some(path) = output_path {
        let snapshot = SceneSnapshot {
            step: world.step_count(),
            sim_time: world.sim_time(),
            bodies: world.bodies().iter().map(|(_, b)| b.clone()).collect(),
        };
        std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
        println!();
        println!("Snapshot written to: {path}");
    }

    Ok(())
}

/// Validate a world config or a polygon vertex list.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Planar Validator");
    println!("────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating config: {path}");
        let content = std::fs::read_to_string(path)?;
        let config = WorldConfig::from_toml_str(&content)?;
        println!(
            "Config is valid (dt={:.5}s, {} iterations).",
            config.dt, config.iterations
        );
    } else if path.ends_with(".json") {
        println!("Validating polygon: {path}");
        let content = std::fs::read_to_string(path)?;
        let raw: Vec<[f32; 2]> = serde_json::from_str(&content)?;
        let vertices = raw.iter().map(|&[x, y]| Vec2::new(x, y)).collect();
        match ConvexPolygon::new(vertices) {
            Ok(poly) => println!(
                "Polygon is valid ({} vertices, area {:.4}).",
                poly.vertex_count(),
                poly.area()
            ),
            Err(e) => println!("Polygon validation failed: {e}"),
        }
    } else {
        println!("Unsupported file format. Use .toml (config) or .json (polygon).");
    }

    Ok(())
}

/// Inspect a JSON state snapshot.
pub fn inspect(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Planar Snapshot Inspector");
    println!("─────────────────────────");
    println!();

    let content = std::fs::read_to_string(path)?;
    let snapshot: SceneSnapshot = serde_json::from_str(&content)?;

    println!("Step:       {}", snapshot.step);
    println!("Sim time:   {:.4}s", snapshot.sim_time);
    println!("Bodies:     {}", snapshot.bodies.len());

    if !snapshot.bodies.is_empty() {
        let min_y = snapshot
            .bodies
            .iter()
            .map(|b| b.position.y)
            .fold(f32::INFINITY, f32::min);
        let max_y = snapshot
            .bodies
            .iter()
            .map(|b| b.position.y)
            .fold(f32::NEG_INFINITY, f32::max);
        let max_speed = snapshot
            .bodies
            .iter()
            .map(|b| b.velocity.length())
            .fold(0.0f32, f32::max);
        let dynamic = snapshot.bodies.iter().filter(|b| !b.is_fixed()).count();
        println!("Dynamic:    {dynamic}");
        println!("Y range:    [{min_y:.4}, {max_y:.4}]");
        println!("Max speed:  {max_speed:.4} m/s");
    }

    Ok(())
}
