//! Integration tests for planar-body.

use planar_body::shapes::{box_polygon, regular_polygon};
use planar_body::{BodySet, ConvexPolygon, RigidBody};
use planar_math::Vec2;
use planar_types::{BodyId, PlanarError};

// ─── Polygon Validation Tests ─────────────────────────────────

#[test]
fn polygon_rejects_too_few_vertices() {
    let result = ConvexPolygon::new(vec![Vec2::ZERO, Vec2::X]);
    assert!(matches!(result, Err(PlanarError::InvalidShape(_))));
}

#[test]
fn polygon_rejects_zero_length_edge() {
    let result = ConvexPolygon::new(vec![Vec2::ZERO, Vec2::ZERO, Vec2::Y]);
    assert!(matches!(result, Err(PlanarError::InvalidShape(_))));
}

#[test]
fn polygon_rejects_clockwise_winding() {
    let result = ConvexPolygon::new(vec![Vec2::ZERO, Vec2::Y, Vec2::X]);
    assert!(matches!(result, Err(PlanarError::InvalidShape(_))));
}

#[test]
fn polygon_rejects_concave_loop() {
    let result = ConvexPolygon::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(2.0, 0.0),
        Vec2::new(1.0, 0.5), // Dent
        Vec2::new(2.0, 2.0),
        Vec2::new(0.0, 2.0),
    ]);
    assert!(matches!(result, Err(PlanarError::InvalidShape(_))));
}

#[test]
fn unit_square_mass_properties() {
    let square = box_polygon(1.0, 1.0).unwrap();
    assert!((square.area() - 1.0).abs() < 1e-6);
    assert!(square.centroid().length() < 1e-6);
    // Second moment of a unit square about its centroid: (w⁴·h + w·h⁴
    // terms collapse to) 1/6 for w = h = 1.
    assert!((square.second_moment() - 1.0 / 6.0).abs() < 1e-5);
}

#[test]
fn off_center_square_centroid() {
    let square = ConvexPolygon::new(vec![
        Vec2::new(1.0, 1.0),
        Vec2::new(3.0, 1.0),
        Vec2::new(3.0, 3.0),
        Vec2::new(1.0, 3.0),
    ])
    .unwrap();
    assert!((square.centroid() - Vec2::new(2.0, 2.0)).length() < 1e-5);
    assert!((square.area() - 4.0).abs() < 1e-5);
}

#[test]
fn regular_polygon_area_approaches_circle() {
    let poly = regular_polygon(64, 1.0).unwrap();
    assert!((poly.area() - std::f32::consts::PI).abs() < 0.02);
}

// ─── Rigid Body Tests ─────────────────────────────────────────

#[test]
fn dynamic_body_mass_from_density() {
    let shape = box_polygon(2.0, 1.0).unwrap();
    let body = RigidBody::dynamic(BodyId(0), shape, 3.0, 0.5, Vec2::ZERO).unwrap();
    // mass = density * area = 3 * 2
    assert!((body.inv_mass() - 1.0 / 6.0).abs() < 1e-6);
    assert!(body.inv_inertia() > 0.0);
    assert!(!body.is_fixed());
}

#[test]
fn fixed_body_has_zero_inverse_terms() {
    let shape = box_polygon(10.0, 1.0).unwrap();
    let body = RigidBody::fixed(BodyId(0), shape, 0.8, Vec2::ZERO).unwrap();
    assert_eq!(body.inv_mass(), 0.0);
    assert_eq!(body.inv_inertia(), 0.0);
    assert!(body.is_fixed());
}

#[test]
fn negative_density_rejected() {
    let shape = box_polygon(1.0, 1.0).unwrap();
    let result = RigidBody::dynamic(BodyId(0), shape, -1.0, 0.5, Vec2::ZERO);
    assert!(matches!(result, Err(PlanarError::InvalidConfig(_))));
}

#[test]
fn local_to_world_rotates_and_translates() {
    let shape = box_polygon(2.0, 2.0).unwrap();
    let mut body = RigidBody::dynamic(BodyId(0), shape, 1.0, 0.2, Vec2::new(5.0, 0.0)).unwrap();
    body.rotation = std::f32::consts::FRAC_PI_2;
    // Local +X maps onto world +Y after a quarter turn.
    let p = body.local_to_world(Vec2::X);
    assert!((p - Vec2::new(5.0, 1.0)).length() < 1e-5);
}

#[test]
fn impulse_changes_linear_and_angular_velocity() {
    let shape = box_polygon(1.0, 1.0).unwrap();
    let mut body = RigidBody::dynamic(BodyId(0), shape, 1.0, 0.2, Vec2::ZERO).unwrap();
    // Impulse along +Y at a lever arm on +X spins counter-clockwise.
    body.apply_impulse(Vec2::new(0.0, 2.0), Vec2::new(0.5, 0.0));
    assert!((body.velocity.y - 2.0).abs() < 1e-6);
    assert!(body.angular_velocity > 0.0);
}

#[test]
fn impulse_on_fixed_body_is_noop() {
    let shape = box_polygon(1.0, 1.0).unwrap();
    let mut body = RigidBody::fixed(BodyId(0), shape, 0.2, Vec2::ZERO).unwrap();
    body.apply_impulse(Vec2::new(100.0, 100.0), Vec2::X);
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(body.angular_velocity, 0.0);
}

#[test]
fn integrate_forces_applies_gravity() {
    let shape = box_polygon(1.0, 1.0).unwrap();
    let mut body = RigidBody::dynamic(BodyId(0), shape, 1.0, 0.2, Vec2::ZERO).unwrap();
    body.integrate_forces(0.5, Vec2::new(0.0, -10.0));
    assert!((body.velocity.y + 5.0).abs() < 1e-6);
}

#[test]
fn integrate_velocities_moves_body() {
    let shape = box_polygon(1.0, 1.0).unwrap();
    let mut body = RigidBody::dynamic(BodyId(0), shape, 1.0, 0.2, Vec2::ZERO).unwrap();
    body.velocity = Vec2::new(2.0, 0.0);
    body.angular_velocity = 1.0;
    body.integrate_velocities(0.25);
    assert!((body.position.x - 0.5).abs() < 1e-6);
    assert!((body.rotation - 0.25).abs() < 1e-6);
}

// ─── BodySet Tests ────────────────────────────────────────────

fn test_body(id: u32) -> RigidBody {
    let shape = box_polygon(1.0, 1.0).unwrap();
    RigidBody::dynamic(BodyId(id), shape, 1.0, 0.5, Vec2::ZERO).unwrap()
}

#[test]
fn insert_and_get() {
    let mut set = BodySet::new();
    let h = set.insert(test_body(7));
    assert_eq!(set.len(), 1);
    assert_eq!(set.get(h).unwrap().id(), BodyId(7));
}

#[test]
fn removed_handle_is_stale() {
    let mut set = BodySet::new();
    let h = set.insert(test_body(0));
    assert!(set.remove(h).is_some());
    assert!(!set.contains(h));
    assert!(matches!(set.get(h), Err(PlanarError::StaleBody { .. })));
}

#[test]
fn reused_slot_invalidates_old_handle() {
    let mut set = BodySet::new();
    let h_old = set.insert(test_body(0));
    set.remove(h_old);
    let h_new = set.insert(test_body(1));
    // New body reuses the slot, but the old handle must not see it.
    assert_eq!(h_old.index(), h_new.index());
    assert!(matches!(set.get(h_old), Err(PlanarError::StaleBody { .. })));
    assert_eq!(set.get(h_new).unwrap().id(), BodyId(1));
}

#[test]
fn double_remove_returns_none() {
    let mut set = BodySet::new();
    let h = set.insert(test_body(0));
    assert!(set.remove(h).is_some());
    assert!(set.remove(h).is_none());
    assert_eq!(set.len(), 0);
}

#[test]
fn pair_mut_borrows_both_ends() {
    let mut set = BodySet::new();
    let ha = set.insert(test_body(0));
    let hb = set.insert(test_body(1));
    let (a, b) = set.pair_mut(ha, hb).unwrap();
    a.velocity = Vec2::X;
    b.velocity = Vec2::Y;
    assert_eq!(set.get(ha).unwrap().velocity, Vec2::X);
    assert_eq!(set.get(hb).unwrap().velocity, Vec2::Y);
}

#[test]
fn pair_mut_preserves_argument_order() {
    let mut set = BodySet::new();
    let ha = set.insert(test_body(0));
    let hb = set.insert(test_body(1));
    // Ask with the higher slot first; returned order must match arguments.
    let (b, a) = set.pair_mut(hb, ha).unwrap();
    assert_eq!(b.id(), BodyId(1));
    assert_eq!(a.id(), BodyId(0));
}

#[test]
fn pair_mut_same_body_rejected() {
    let mut set = BodySet::new();
    let h = set.insert(test_body(0));
    assert!(matches!(
        set.pair_mut(h, h),
        Err(PlanarError::InvariantViolation(_))
    ));
}

#[test]
fn pair_mut_stale_end_rejected() {
    let mut set = BodySet::new();
    let ha = set.insert(test_body(0));
    let hb = set.insert(test_body(1));
    set.remove(hb);
    assert!(matches!(
        set.pair_mut(ha, hb),
        Err(PlanarError::StaleBody { .. })
    ));
}

#[test]
fn iter_visits_live_bodies_only() {
    let mut set = BodySet::new();
    let ha = set.insert(test_body(0));
    let hb = set.insert(test_body(1));
    let hc = set.insert(test_body(2));
    set.remove(hb);
    let ids: Vec<u32> = set.iter().map(|(_, b)| b.id().raw()).collect();
    assert_eq!(ids, vec![0, 2]);
    assert!(set.contains(ha));
    assert!(set.contains(hc));
}
