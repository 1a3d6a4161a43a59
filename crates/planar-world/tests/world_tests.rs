//! Integration tests for the stepping loop, arbiter persistence, and
//! scene configuration.

use std::sync::{Arc, Mutex};

use planar_body::shapes::box_polygon;
use planar_math::Vec2;
use planar_telemetry::{EventSink, StepEvent};
use planar_world::{World, WorldConfig};

fn zero_gravity() -> WorldConfig {
    WorldConfig {
        gravity: [0.0, 0.0],
        ..Default::default()
    }
}

// ─────────────────────────── Configuration ───────────────────────────

#[test]
fn default_config_is_valid() {
    let config = WorldConfig::default();
    assert!(config.validate().is_ok());
    assert!((config.dt - 1.0 / 60.0).abs() < 1e-9);
    assert_eq!(config.iterations, 10);
    assert!((config.gravity[1] + 9.81).abs() < 1e-6);
}

#[test]
fn config_rejects_bad_values() {
    let bad_dt = WorldConfig {
        dt: 0.0,
        ..Default::default()
    };
    assert!(bad_dt.validate().is_err());

    let bad_iterations = WorldConfig {
        iterations: 0,
        ..Default::default()
    };
    assert!(bad_iterations.validate().is_err());

    let bad_gravity = WorldConfig {
        gravity: [0.0, f32::NAN],
        ..Default::default()
    };
    assert!(bad_gravity.validate().is_err());
}

#[test]
fn config_toml_round_trip() {
    let config = WorldConfig {
        dt: 0.005,
        iterations: 20,
        gravity: [0.0, -3.71],
    };
    let toml = config.to_toml_string().unwrap();
    let back = WorldConfig::from_toml_str(&toml).unwrap();
    assert!((back.dt - 0.005).abs() < 1e-9);
    assert_eq!(back.iterations, 20);
    assert!((back.gravity[1] + 3.71).abs() < 1e-6);
}

#[test]
fn config_toml_partial_fills_defaults() {
    let config = WorldConfig::from_toml_str("iterations = 5\n").unwrap();
    assert_eq!(config.iterations, 5);
    assert!((config.dt - 1.0 / 60.0).abs() < 1e-9);
}

#[test]
fn config_toml_rejects_invalid_values() {
    assert!(WorldConfig::from_toml_str("dt = -0.01\n").is_err());
    assert!(WorldConfig::from_toml_str("not toml at all [").is_err());
}

#[test]
fn world_rejects_invalid_config() {
    let config = WorldConfig {
        iterations: 0,
        ..Default::default()
    };
    assert!(World::new(config).is_err());
}

// ─────────────────────────── Resting Contact ───────────────────────────

#[test]
fn falling_box_comes_to_rest_on_ground() {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world
        .spawn_fixed(box_polygon(10.0, 1.0).unwrap(), 0.5, Vec2::ZERO)
        .unwrap();
    let falling = world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.5,
            Vec2::new(0.0, 1.1),
        )
        .unwrap();

    for _ in 0..180 {
        world.step().unwrap();
    }

    // Resting height: ground top (0.5) + half extent (0.5) minus the
    // penetration slop the bias tolerates.
    let body = world.bodies().get(falling).unwrap();
    assert!(
        body.position.y > 0.97 && body.position.y < 1.005,
        "resting height {}",
        body.position.y
    );
    assert!(body.velocity.length() < 0.1, "velocity {}", body.velocity);
    assert!(body.angular_velocity.abs() < 0.1);
}

#[test]
fn two_box_stack_stays_ordered() {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world
        .spawn_fixed(box_polygon(10.0, 1.0).unwrap(), 0.6, Vec2::ZERO)
        .unwrap();
    let lower = world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.6,
            Vec2::new(0.0, 1.05),
        )
        .unwrap();
    let upper = world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.6,
            Vec2::new(0.0, 2.1),
        )
        .unwrap();

    for _ in 0..240 {
        world.step().unwrap();
    }

    let low = world.bodies().get(lower).unwrap();
    let high = world.bodies().get(upper).unwrap();
    assert!(high.position.y > low.position.y + 0.9);
    assert!(low.velocity.length() < 0.15);
    assert!(high.velocity.length() < 0.15);
}

// ─────────────────────────── Momentum ───────────────────────────

#[test]
fn head_on_collision_conserves_momentum_and_stops() {
    // Equal masses, equal and opposite velocities, no gravity, no
    // friction, no restitution: both bodies end at rest. The approach
    // speed keeps first-frame penetration inside the allowed slop, so
    // no position-correction bias is injected and the stop is clean.
    let mut world = World::new(zero_gravity()).unwrap();
    let left = world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.0,
            Vec2::new(-0.6, 0.0),
        )
        .unwrap();
    let right = world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.0,
            Vec2::new(0.6, 0.0),
        )
        .unwrap();
    world.bodies_mut().get_mut(left).unwrap().velocity = Vec2::new(0.25, 0.0);
    world.bodies_mut().get_mut(right).unwrap().velocity = Vec2::new(-0.25, 0.0);

    for _ in 0..60 {
        world.step().unwrap();

        // Equal masses: momentum is the plain velocity sum, and it must
        // stay zero through every solve.
        let va = world.bodies().get(left).unwrap().velocity;
        let vb = world.bodies().get(right).unwrap().velocity;
        assert!((va + vb).length() < 1e-4, "momentum drift {:?}", va + vb);
    }

    // The bodies made contact and stopped dead, never re-approaching.
    assert!(world.arbiter_count() == 1);
    let va = world.bodies().get(left).unwrap().velocity;
    let vb = world.bodies().get(right).unwrap().velocity;
    assert!((vb - va).x >= -1e-4, "still approaching: {va:?} {vb:?}");
    assert!(va.length() < 0.01, "va = {va:?}");
    assert!(vb.length() < 0.01, "vb = {vb:?}");
}

// ─────────────────────────── Arbiter Persistence ───────────────────────────

#[test]
fn resting_contact_carries_impulses_across_frames() {
    let mut world = World::new(WorldConfig::default()).unwrap();
    world
        .spawn_fixed(box_polygon(10.0, 1.0).unwrap(), 0.5, Vec2::ZERO)
        .unwrap();
    world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.5,
            Vec2::new(0.0, 0.95),
        )
        .unwrap();

    // First contact frame starts cold.
    let first = world.step().unwrap();
    assert_eq!(first.arbiters, 1);
    assert_eq!(first.carried, 0);

    // Every later frame inherits the cached impulses.
    for _ in 0..30 {
        let summary = world.step().unwrap();
        assert_eq!(summary.arbiters, 1);
        assert_eq!(summary.carried, 1);
    }

    let arbiter = world.arbiters().next().unwrap();
    assert!(arbiter
        .contacts()
        .iter()
        .any(|c| c.normal_impulse > 0.0));
}

#[test]
fn separating_pair_evicts_cached_arbiter() {
    let mut world = World::new(zero_gravity()).unwrap();
    let a = world
        .spawn_dynamic(box_polygon(1.0, 1.0).unwrap(), 1.0, 0.2, Vec2::ZERO)
        .unwrap();
    let b = world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.2,
            Vec2::new(0.0, 0.9),
        )
        .unwrap();

    let first = world.step().unwrap();
    assert_eq!(first.arbiters, 1);

    // Drive them apart; the pair key must disappear from the cache.
    world.bodies_mut().get_mut(a).unwrap().velocity = Vec2::new(0.0, -5.0);
    world.bodies_mut().get_mut(b).unwrap().velocity = Vec2::new(0.0, 5.0);

    let mut saw_eviction = false;
    for _ in 0..30 {
        let summary = world.step().unwrap();
        if summary.evicted > 0 {
            saw_eviction = true;
        }
    }
    assert!(saw_eviction);
    assert_eq!(world.arbiter_count(), 0);
}

#[test]
fn removing_a_body_drops_its_arbiters() {
    let mut world = World::new(zero_gravity()).unwrap();
    let a = world
        .spawn_dynamic(box_polygon(1.0, 1.0).unwrap(), 1.0, 0.2, Vec2::ZERO)
        .unwrap();
    world
        .spawn_dynamic(
            box_polygon(1.0, 1.0).unwrap(),
            1.0,
            0.2,
            Vec2::new(0.0, 0.9),
        )
        .unwrap();

    world.step().unwrap();
    assert_eq!(world.arbiter_count(), 1);

    assert!(world.remove_body(a).is_some());
    assert_eq!(world.arbiter_count(), 0);

    // The survivor simulates on without the removed body.
    let summary = world.step().unwrap();
    assert_eq!(summary.pairs_tested, 0);
    assert_eq!(summary.arbiters, 0);
}

// ─────────────────────────── Telemetry ───────────────────────────

/// Sink that shares its capture buffer with the test body.
struct SharedSink {
    events: Arc<Mutex<Vec<StepEvent>>>,
}

impl EventSink for SharedSink {
    fn handle(&mut self, event: &StepEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &str {
        "shared_sink"
    }
}

#[test]
fn each_step_emits_the_full_event_sequence() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let mut world = World::new(zero_gravity()).unwrap();
    world.telemetry_mut().add_sink(Box::new(SharedSink {
        events: Arc::clone(&events),
    }));
    world
        .spawn_dynamic(box_polygon(1.0, 1.0).unwrap(), 1.0, 0.5, Vec2::ZERO)
        .unwrap();

    world.step().unwrap();
    world.step().unwrap();

    let captured = events.lock().unwrap();
    // StepBegin, NarrowPhase, WarmStart, SolverPass, Energy, StepEnd.
    assert_eq!(captured.len(), 12);
    assert_eq!(captured[0].step, 0);
    assert_eq!(captured[6].step, 1);
}

#[test]
fn kinetic_energy_tracks_velocity() {
    let mut world = World::new(zero_gravity()).unwrap();
    let a = world
        .spawn_dynamic(box_polygon(1.0, 1.0).unwrap(), 2.0, 0.5, Vec2::ZERO)
        .unwrap();
    world.bodies_mut().get_mut(a).unwrap().velocity = Vec2::new(3.0, 0.0);

    // Mass 2 at speed 3: ½·2·9 = 9.
    assert!((world.kinetic_energy() - 9.0).abs() < 1e-4);
}
