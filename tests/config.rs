use bugscape::GameConfig;
use bugscape::config::PhysicsConfig;

#[test]
fn test_partial_json_keeps_defaults() {
    let cfg = GameConfig::from_json(r#"{ "player": { "jump_impulse": 1000.0 }, "seed": 7 }"#).unwrap();
    assert_eq!(cfg.player.jump_impulse, 1000.0);
    assert_eq!(cfg.player.max_health, 3);
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.enemy, GameConfig::default().enemy);
}

#[test]
fn test_empty_json_is_default() {
    assert_eq!(GameConfig::from_json("{}").unwrap(), GameConfig::default());
}

#[test]
fn test_bad_json_is_an_error() {
    assert!(GameConfig::from_json(r#"{ "seed": "seven" }"#).is_err());
}

#[test]
fn test_builders() {
    let cfg = GameConfig::default().with_seed(3).with_viewport(640.0, 360.0);
    assert_eq!(cfg.seed, 3);
    assert_eq!(cfg.camera.viewport, glam::Vec2::new(640.0, 360.0));
}

#[test]
fn test_substeps_cover_the_frame() {
    let physics = PhysicsConfig::default();
    let steps: Vec<f32> = physics.substeps(0.025).collect();
    assert_eq!(steps.len(), 2);
    let total: f32 = steps.iter().sum();
    assert!((total - 0.025).abs() < 1e-6);
    assert!(steps.iter().all(|s| *s <= physics.fixed_step + 1e-6));
}

#[test]
fn test_substeps_are_capped() {
    let physics = PhysicsConfig::default();
    assert_eq!(physics.substeps(10.0).count(), physics.max_substeps as usize);
    assert_eq!(physics.substeps(0.0).count(), 0);
}

#[test]
fn test_long_frames_are_fully_simulated() {
    let physics = PhysicsConfig::default();
    let total: f32 = physics.substeps(0.5).sum();
    assert!((total - 0.5).abs() < 1e-5);
}
