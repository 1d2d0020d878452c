use bugscape::camera::Camera;
use bugscape::geometry::Rect;
use glam::Vec2;

const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

#[test]
fn test_follow_centres_on_target() {
    let mut cam = Camera::new(VIEWPORT, 1.0);
    cam.follow(Vec2::new(1000.0, 700.0), Vec2::new(3000.0, 2000.0));
    assert_eq!(cam.position, Vec2::new(1000.0, 700.0));
    assert_eq!(cam.view_rect(), Rect::new(600.0, 400.0, 800.0, 600.0));
}

#[test]
fn test_follow_clamps_to_world_edges() {
    let mut cam = Camera::new(VIEWPORT, 1.0);
    let world = Vec2::new(3000.0, 2000.0);
    cam.follow(Vec2::new(10.0, 10.0), world);
    assert_eq!(cam.view_rect().top_left(), Vec2::ZERO);
    cam.follow(Vec2::new(2990.0, 1990.0), world);
    let view = cam.view_rect();
    assert_eq!(view.right(), 3000.0);
    assert_eq!(view.bottom(), 2000.0);
}

#[test]
fn test_small_world_pins_to_origin() {
    let mut cam = Camera::new(VIEWPORT, 1.0);
    cam.follow(Vec2::new(300.0, 200.0), Vec2::new(500.0, 400.0));
    assert_eq!(cam.view_rect().top_left(), Vec2::ZERO);
}

#[test]
fn test_zoom_shrinks_the_view() {
    let mut cam = Camera::new(VIEWPORT, 2.0);
    assert_eq!(cam.view_size(), Vec2::new(400.0, 300.0));
    cam.follow(Vec2::new(0.0, 0.0), Vec2::new(3000.0, 2000.0));
    assert_eq!(cam.position, Vec2::new(200.0, 150.0));
}

#[test]
fn test_zoom_eases_toward_target() {
    let mut cam = Camera::new(VIEWPORT, 1.0);
    cam.set_zoom(2.0);
    cam.tick(1.0 / 60.0);
    assert!(cam.zoom > 1.0 && cam.zoom < 2.0);
    for _ in 0..120 {
        cam.tick(1.0 / 60.0);
    }
    assert!((cam.zoom - 2.0).abs() < 1e-3);
}

#[test]
fn test_shake_decays_to_zero() {
    let mut cam = Camera::new(VIEWPORT, 1.0);
    cam.shake(6.0);
    assert!(cam.is_shaking());
    cam.tick(0.1);
    assert!(cam.shake_offset().length() <= 6.0 * 2f32.sqrt());
    for _ in 0..10 {
        cam.tick(0.1);
    }
    assert!(!cam.is_shaking());
    assert_eq!(cam.shake_offset(), Vec2::ZERO);
}

#[test]
fn zooming_out_keeps_the_view_inside_the_world() {
    let mut cam = Camera::new(VIEWPORT, 1.0);
    let world = Vec2::new(1200.0, 600.0);
    cam.set_zoom(0.5);
    for _ in 0..30 {
        cam.follow(Vec2::new(50.0, 50.0), world);
        cam.tick(1.0 / 60.0);
        let view = cam.view_rect();
        assert!(view.x >= 0.0 && view.y >= 0.0, "view left the world at {view:?}");
        assert!(view.right() <= world.x || view.x == 0.0);
        assert!(view.bottom() <= world.y || view.y == 0.0);
    }
}
