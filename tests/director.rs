/// Session-level tests: menu and pause, scene loading, dialogue and choices,
/// transitions, death, and the draw list, all against the built-in catalog.
use bugscape::entity::npc::{NOZE_ACCEPTED, NOZE_GIFT};
use bugscape::error::GameError;
use bugscape::input::FrameInput;
use bugscape::render::SpriteKind;
use bugscape::scene::GameData;
use bugscape::{GameConfig, SceneDirector, SessionMode};
use glam::Vec2;

const DT: f32 = 1.0 / 60.0;

fn director() -> SceneDirector {
    SceneDirector::new(GameData::builtin().unwrap(), GameConfig::default()).unwrap()
}

fn playing() -> SceneDirector {
    let mut d = director();
    step(&mut d, FrameInput { confirm: true, ..Default::default() });
    assert_eq!(d.mode(), SessionMode::Playing);
    d
}

fn step(d: &mut SceneDirector, input: FrameInput) {
    d.step(&input, DT).unwrap();
}

fn idle(d: &mut SceneDirector, frames: usize) {
    for _ in 0..frames {
        step(d, FrameInput::default());
    }
}

fn interact(d: &mut SceneDirector) {
    step(d, FrameInput { interact: true, ..Default::default() });
}

/// Load `scene` and stand the player at `pos`, letting one frame settle.
fn stand(d: &mut SceneDirector, scene: &str, pos: Vec2) {
    d.load_scene(scene).unwrap();
    d.player_mut().place_at(pos);
    idle(d, 1);
}

// ── Session ──────────────────────────────────────────────────────────────────

#[test]
fn starts_in_the_menu() {
    let mut d = director();
    assert_eq!(d.mode(), SessionMode::Menu);
    assert!(d.scene().is_none());
    idle(&mut d, 5);
    assert_eq!(d.mode(), SessionMode::Menu);
    assert!(d.draw_list().sprites.is_empty());
}

#[test]
fn confirm_starts_at_the_start_scene() {
    let d = playing();
    assert_eq!(d.scene_id(), Some("scene1"));
    assert_eq!(d.player().body.rect.x, 100.0);
    assert_eq!(d.player().body.rect.y, 90.0);
}

#[test]
fn empty_catalog_is_rejected() {
    let data = GameData::from_json(r#"{ "start_scene": "a" }"#).unwrap();
    assert!(matches!(SceneDirector::new(data, GameConfig::default()), Err(GameError::NoScenes)));
}

#[test]
fn pause_freezes_the_simulation() {
    let mut d = playing();
    idle(&mut d, 30);
    step(&mut d, FrameInput { pause: true, ..Default::default() });
    assert_eq!(d.mode(), SessionMode::Paused);

    let before = d.player().body.rect;
    let clock = d.clock();
    for _ in 0..10 {
        step(&mut d, FrameInput { move_right: true, ..Default::default() });
    }
    assert_eq!(d.player().body.rect, before);
    assert_eq!(d.clock(), clock);

    step(&mut d, FrameInput { pause: true, ..Default::default() });
    assert_eq!(d.mode(), SessionMode::Playing);
    step(&mut d, FrameInput { move_right: true, ..Default::default() });
    assert!(d.player().body.rect.x > before.x);
}

#[test]
fn death_returns_to_the_menu_and_new_game_resets() {
    let mut d = playing();
    d.flags_mut().raise("truth_seeker_initial_talk_done");
    d.player_data_mut().give_item("void_heart");
    d.player_mut().take_damage(3);
    idle(&mut d, 1);
    assert_eq!(d.mode(), SessionMode::Menu);
    assert!(d.draw_list().sprites.is_empty());

    step(&mut d, FrameInput { confirm: true, ..Default::default() });
    assert_eq!(d.mode(), SessionMode::Playing);
    assert!(d.player().is_alive());
    assert!(d.player().health.is_full());
    assert!(!d.flags().get("truth_seeker_initial_talk_done"));
    assert!(d.player_data().inventory.is_empty());
    assert_eq!(d.scene_id(), Some("scene1"));
}

// ── Scene loading ────────────────────────────────────────────────────────────

#[test]
fn unknown_scene_keeps_the_current_one() {
    let mut d = playing();
    d.load_scene("scene2").unwrap();
    d.load_scene("nowhere").unwrap();
    assert_eq!(d.scene_id(), Some("scene2"));
}

#[test]
fn unknown_scene_with_nothing_loaded_uses_the_first() {
    let mut d = director();
    d.load_scene("nowhere").unwrap();
    assert_eq!(d.scene_id(), Some("scene1"));
}

#[test]
fn cycling_wraps_around_the_catalog() {
    let mut d = playing();
    step(&mut d, FrameInput { cycle_scene: 1, ..Default::default() });
    assert_eq!(d.scene_id(), Some("scene2"));
    step(&mut d, FrameInput { cycle_scene: -1, ..Default::default() });
    step(&mut d, FrameInput { cycle_scene: -1, ..Default::default() });
    assert_eq!(d.scene_id(), Some("scene5"));
}

#[test]
fn player_state_survives_scene_loads() {
    let mut d = playing();
    d.player_mut().take_damage(1);
    d.player_data_mut().give_item("void_heart");
    d.load_scene("scene3").unwrap();
    assert_eq!(d.player().health.current(), 2);
    assert!(d.player_data().has_item("void_heart"));
}

// ── Dialogue ─────────────────────────────────────────────────────────────────

#[test]
fn talking_to_the_truth_seeker_raises_the_scene_flag() {
    let mut d = playing();
    stand(&mut d, "scene1", Vec2::new(355.0, 110.0));
    assert_eq!(d.interaction_candidate().map(|n| n.name.as_str()), Some("truth_seeker"));
    assert!(d.draw_list().interact_prompt.is_some());

    interact(&mut d);
    let session = d.dialogue().unwrap();
    assert_eq!(session.key, "intro");
    assert_eq!(session.line_count(), 4);
    assert!(d.interaction_candidate().is_none());

    for _ in 0..3 {
        interact(&mut d);
    }
    assert_eq!(d.dialogue().unwrap().line_index(), 3);
    assert_eq!(d.draw_list().dialogue.unwrap().line, ".. the destiny will be fulfilled.");
    interact(&mut d);
    assert!(d.dialogue().is_none());
    assert!(d.flags().get("truth_seeker_initial_talk_done"));

    interact(&mut d);
    assert_eq!(d.dialogue().unwrap().key, "quest_offer");
    interact(&mut d);
    interact(&mut d);
    assert!(d.flags().get("truth_seeker_quest_accepted"));
}

#[test]
fn dialogue_freezes_the_player() {
    let mut d = playing();
    stand(&mut d, "scene1", Vec2::new(355.0, 110.0));
    interact(&mut d);
    let before = d.player().body.rect.x;
    for _ in 0..10 {
        step(&mut d, FrameInput { move_right: true, jump: true, ..Default::default() });
    }
    assert_eq!(d.player().body.rect.x, before);
    assert!(d.dialogue().is_some());
}

#[test]
fn end_rule_only_fires_for_its_dialogue_key() {
    let mut d = playing();
    stand(&mut d, "scene4", Vec2::new(120.0, 430.0));
    interact(&mut d);
    assert_eq!(d.dialogue().unwrap().key, "first_encounter");
    interact(&mut d);
    interact(&mut d);
    assert!(d.flags().get("hornhead_first_talk_done"));

    interact(&mut d);
    assert_eq!(d.dialogue().unwrap().key, "subsequent_talk");
}

#[test]
fn accepting_noze_gift_curses_the_jump() {
    let mut d = playing();
    stand(&mut d, "scene3", Vec2::new(535.0, 350.0));
    assert_eq!(d.interaction_candidate().map(|n| n.name.as_str()), Some("noze"));

    interact(&mut d);
    interact(&mut d);
    interact(&mut d);
    assert!(d.dialogue().is_none());
    let choice = d.draw_list().choice.unwrap();
    assert_eq!(choice.options, ["yes", "no"]);
    assert_eq!(choice.highlighted, 0);

    // Navigation wraps; come back to "yes".
    step(&mut d, FrameInput { menu_down: true, ..Default::default() });
    step(&mut d, FrameInput { menu_up: true, ..Default::default() });
    assert_eq!(d.choice().unwrap().highlighted(), 0);
    step(&mut d, FrameInput { confirm: true, ..Default::default() });

    assert!(d.choice().is_none());
    assert!(d.flags().get(NOZE_ACCEPTED));
    assert!(d.player_data().has_item(NOZE_GIFT));
    assert!((d.player().jump_impulse() - 0.6 * d.player().base_jump_impulse()).abs() < 1e-3);

    interact(&mut d);
    assert_eq!(d.dialogue().unwrap().key, "item_accepted_followup");
}

#[test]
fn declining_noze_leaves_the_jump_alone() {
    let mut d = playing();
    stand(&mut d, "scene3", Vec2::new(535.0, 350.0));
    for _ in 0..3 {
        interact(&mut d);
    }
    step(&mut d, FrameInput { menu_down: true, ..Default::default() });
    step(&mut d, FrameInput { confirm: true, ..Default::default() });
    assert!(d.flags().get("noze_item_declined"));
    assert_eq!(d.player().jump_impulse(), d.player().base_jump_impulse());
    assert!(d.player_data().inventory.is_empty());
}

// ── Transitions ──────────────────────────────────────────────────────────────

#[test]
fn location_transition_places_the_player() {
    let mut d = playing();
    d.player_mut().place_at(Vec2::new(1160.0, 300.0));
    idle(&mut d, 1);
    assert_eq!(d.scene_id(), Some("scene2"));
    assert_eq!(d.player().body.rect.x, 600.0);
    assert_eq!(d.player().body.rect.y, 0.0);
}

#[test]
fn gated_transition_needs_flag_and_cleared_scene() {
    let mut d = playing();
    stand(&mut d, "scene2", Vec2::new(1150.0, 460.0));
    idle(&mut d, 5);
    assert_eq!(d.scene_id(), Some("scene2"), "flag not set");

    d.flags_mut().raise("truth_seeker_initial_talk_done");
    idle(&mut d, 1);
    assert_eq!(d.scene_id(), Some("scene2"), "enemies alive");

    for enemy in &mut d.scene_mut().unwrap().enemies {
        enemy.take_damage(3);
    }
    idle(&mut d, 1);
    assert_eq!(d.scene_id(), Some("scene3"));
    assert_eq!(d.player().body.rect.x, 0.0);
    assert!(d.defeated().contains("shrine_enemy_floor_1"));
    assert!(d.defeated().contains("shrine_enemy_platform_1"));

    d.load_scene("scene2").unwrap();
    assert!(d.scene().unwrap().enemies.is_empty(), "defeated enemies stay dead");
}

#[test]
fn first_matching_transition_wins() {
    let json = r#"{
        "start_scene": "a",
        "images": { "floor": 1 },
        "scenes": [
            {
                "id": "a",
                "player_start": [100, 250],
                "terrain": [[0, 300, 1200, 50, "floor", false]],
                "transitions": [
                    { "type": "player_at_location", "rect": [0, 0, 400, 400], "target_scene_id": "b" },
                    { "type": "player_at_location", "rect": [50, 50, 300, 300], "target_scene_id": "c" }
                ]
            },
            { "id": "b", "player_start": [600, 250] },
            { "id": "c", "player_start": [600, 250] }
        ]
    }"#;
    let mut d = SceneDirector::new(GameData::from_json(json).unwrap(), GameConfig::default()).unwrap();
    step(&mut d, FrameInput { confirm: true, ..Default::default() });
    assert_eq!(d.scene_id(), Some("a"));
    idle(&mut d, 1);
    assert_eq!(d.scene_id(), Some("b"));
}

#[test]
fn scene_jump_waits_for_the_choice() {
    let json = r#"{
        "start_scene": "a",
        "images": { "floor": 1, "noze_img": 2 },
        "dialogue": {
            "noze": { "initial_offer": ["take it.", "mwehehe..."] }
        },
        "scenes": [
            {
                "id": "a",
                "player_start": [210, 200],
                "terrain": [[0, 300, 1200, 50, "floor", false]],
                "npcs": [{
                    "name": "noze",
                    "x": 200,
                    "y": 230,
                    "image_key": "noze_img",
                    "on_interaction_end": {
                        "if_dialog_key_was": "initial_offer",
                        "next_scene_if_flag_is_also_set": { "flag": "noze_item_accepted", "scene_id": "b" }
                    }
                }]
            },
            { "id": "b", "player_start": [600, 250] }
        ]
    }"#;
    let mut d = SceneDirector::new(GameData::from_json(json).unwrap(), GameConfig::default()).unwrap();
    step(&mut d, FrameInput { confirm: true, ..Default::default() });
    idle(&mut d, 30);
    assert_eq!(d.interaction_candidate().map(|n| n.name.as_str()), Some("noze"));

    interact(&mut d);
    interact(&mut d);
    interact(&mut d);
    assert!(d.dialogue().is_none());
    assert!(d.choice().is_some());
    assert_eq!(d.scene_id(), Some("a"));

    step(&mut d, FrameInput { confirm: true, ..Default::default() });
    assert!(d.flags().get(NOZE_ACCEPTED));
    assert_eq!(d.scene_id(), Some("b"));
}

// ── Projectiles ──────────────────────────────────────────────────────────────

#[test]
fn witcher_shoots_the_player() {
    let mut d = playing();
    stand(&mut d, "scene5", Vec2::new(900.0, 450.0));
    assert_eq!(d.projectiles().len(), 1);
    assert_eq!(d.draw_list().count(SpriteKind::Projectile), 1);

    idle(&mut d, 90);
    assert!(d.player().health.current() < 3);
}

#[test]
fn projectiles_are_cleared_on_scene_load() {
    let mut d = playing();
    stand(&mut d, "scene5", Vec2::new(900.0, 450.0));
    assert!(!d.projectiles().is_empty());
    d.load_scene("scene4").unwrap();
    assert!(d.projectiles().is_empty());
}

// ── Draw list ────────────────────────────────────────────────────────────────

#[test]
fn draw_list_describes_the_scene() {
    let d = playing();
    let list = d.draw_list();
    assert_eq!(list.mode, SessionMode::Playing);
    assert_eq!(list.background, d.data().image("bg1").unwrap());
    assert_eq!(list.count(SpriteKind::Terrain), 5);
    assert_eq!(list.count(SpriteKind::Npc), 1);
    assert_eq!(list.count(SpriteKind::Enemy), 2);
    assert_eq!(list.count(SpriteKind::Player), 1);
    assert_eq!(list.sprites.last().map(|s| s.kind), Some(SpriteKind::Player));
    assert_eq!(list.hud.health, 3);
    assert_eq!(list.hud.max_health, 3);
    assert!(list.dialogue.is_none());
}
