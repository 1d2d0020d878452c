/// Terrain collision tests: sideways blocking, swept floors and ceilings, and
/// the gravity integration built on top of them.
use bugscape::animation::FrameId;
use bugscape::collision::{Terrain, resolve_horizontal, resolve_vertical};
use bugscape::config::PhysicsConfig;
use bugscape::entity::{Body, Motion, fall};
use bugscape::geometry::{Facing, Rect};

fn block(x: f32, y: f32, w: f32, h: f32) -> Terrain {
    Terrain::new(Rect::new(x, y, w, h), false, FrameId(0))
}

fn wall(x: f32, y: f32, w: f32, h: f32) -> Terrain {
    Terrain::new(Rect::new(x, y, w, h), true, FrameId(0))
}

// ── Horizontal ───────────────────────────────────────────────────────────────

#[test]
fn walking_into_a_block_snaps_to_its_edge() {
    let terrain = [block(100.0, 0.0, 50.0, 100.0)];
    let mut r = Rect::new(65.0, 20.0, 40.0, 40.0);
    let side = resolve_horizontal(&mut r, 55.0, &terrain);
    assert_eq!(side, Some(Facing::Right));
    assert_eq!(r.right(), 100.0);

    let mut r = Rect::new(145.0, 20.0, 40.0, 40.0);
    let side = resolve_horizontal(&mut r, 155.0, &terrain);
    assert_eq!(side, Some(Facing::Left));
    assert_eq!(r.left(), 150.0);
}

/// Overlapping a floor edge by a quarter of the height or less does not block.
#[test]
fn shallow_overlap_with_a_floor_passes() {
    let terrain = [block(100.0, 95.0, 200.0, 50.0)];
    let mut r = Rect::new(75.0, 60.0, 40.0, 40.0);
    assert_eq!(resolve_horizontal(&mut r, 70.0, &terrain), None);
    assert_eq!(r.x, 75.0);
}

#[test]
fn deep_overlap_with_a_floor_blocks() {
    let terrain = [block(100.0, 70.0, 200.0, 50.0)];
    let mut r = Rect::new(75.0, 60.0, 40.0, 40.0);
    assert_eq!(resolve_horizontal(&mut r, 70.0, &terrain), Some(Facing::Right));
    assert_eq!(r.right(), 100.0);
}

#[test]
fn walls_block_even_a_shallow_overlap() {
    let terrain = [wall(100.0, 95.0, 10.0, 300.0)];
    let mut r = Rect::new(75.0, 60.0, 40.0, 40.0);
    assert_eq!(resolve_horizontal(&mut r, 70.0, &terrain), Some(Facing::Right));
    assert_eq!(r.right(), 100.0);
}

// ── Vertical ─────────────────────────────────────────────────────────────────

/// A large downward step across a thin platform still lands on it.
#[test]
fn falling_never_tunnels_through_thin_platforms() {
    let terrain = [block(0.0, 300.0, 200.0, 2.0)];
    let prev = Rect::new(50.0, 200.0, 40.0, 50.0);
    let mut cur = Rect::new(50.0, 350.0, 40.0, 50.0);
    let mut vy = 900.0;
    let contact = resolve_vertical(&mut cur, &prev, &mut vy, &terrain);
    assert!(contact.grounded);
    assert_eq!(cur.bottom(), 300.0);
    assert_eq!(vy, 0.0);
}

#[test]
fn rising_into_a_ceiling_stops_at_its_bottom() {
    let terrain = [block(0.0, 0.0, 200.0, 100.0)];
    let prev = Rect::new(50.0, 110.0, 40.0, 50.0);
    let mut cur = Rect::new(50.0, 90.0, 40.0, 50.0);
    let mut vy = -600.0;
    let contact = resolve_vertical(&mut cur, &prev, &mut vy, &terrain);
    assert!(contact.ceiling);
    assert!(!contact.grounded);
    assert_eq!(cur.top(), 100.0);
    assert_eq!(vy, 0.0);
}

#[test]
fn walls_are_not_floors() {
    let terrain = [wall(0.0, 300.0, 200.0, 20.0)];
    let prev = Rect::new(50.0, 240.0, 40.0, 50.0);
    let mut cur = Rect::new(50.0, 260.0, 40.0, 50.0);
    let mut vy = 300.0;
    let contact = resolve_vertical(&mut cur, &prev, &mut vy, &terrain);
    assert!(!contact.grounded);
    assert_eq!(cur.y, 260.0);
}

#[test]
fn edge_aligned_terrain_is_not_a_floor() {
    let terrain = [block(90.0, 300.0, 100.0, 20.0)];
    let prev = Rect::new(50.0, 240.0, 40.0, 50.0);
    let mut cur = Rect::new(50.0, 260.0, 40.0, 50.0);
    let mut vy = 300.0;
    assert!(!resolve_vertical(&mut cur, &prev, &mut vy, &terrain).grounded);
}

/// Starting inside a platform (deeper than the edge tolerance) does not snap.
#[test]
fn starting_below_a_floor_top_does_not_snap() {
    let terrain = [block(0.0, 300.0, 200.0, 100.0)];
    let prev = Rect::new(50.0, 260.0, 40.0, 50.0);
    let mut cur = Rect::new(50.0, 270.0, 40.0, 50.0);
    let mut vy = 300.0;
    assert!(!resolve_vertical(&mut cur, &prev, &mut vy, &terrain).grounded);
}

// ── Gravity ──────────────────────────────────────────────────────────────────

#[test]
fn fall_lands_and_grounds() {
    let physics = PhysicsConfig::default();
    let terrain = [block(0.0, 300.0, 400.0, 50.0)];
    let mut body = Body::new(Rect::new(100.0, 100.0, 40.0, 50.0));
    let mut motion = Motion::default();
    for _ in 0..120 {
        fall(&mut body, &mut motion, &physics, &terrain, 1.0 / 60.0);
    }
    assert!(motion.grounded);
    assert_eq!(body.rect.bottom(), 300.0);
    assert_eq!(motion.velocity.y, 0.0);
}

#[test]
fn fall_speed_is_capped() {
    let physics = PhysicsConfig::default();
    let mut body = Body::new(Rect::new(0.0, 0.0, 40.0, 50.0));
    let mut motion = Motion::default();
    for _ in 0..120 {
        fall(&mut body, &mut motion, &physics, &[], 1.0 / 60.0);
    }
    assert!(!motion.grounded);
    assert!((motion.velocity.y - physics.max_fall_speed).abs() < 1e-3);
}

/// One long frame is split into sub-steps, so the thin platform still catches.
#[test]
fn long_frame_still_lands_on_thin_platform() {
    let physics = PhysicsConfig::default();
    let terrain = [block(0.0, 400.0, 400.0, 2.0)];
    let mut body = Body::new(Rect::new(100.0, 100.0, 40.0, 50.0));
    let mut motion = Motion { velocity: glam::Vec2::new(0.0, physics.max_fall_speed), grounded: false };
    for _ in 0..10 {
        fall(&mut body, &mut motion, &physics, &terrain, 0.1);
    }
    assert!(motion.grounded);
    assert_eq!(body.rect.bottom(), 400.0);
}
