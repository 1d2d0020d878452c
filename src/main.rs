//! Headless driver: plays a short scripted session against the built-in game
//! data and logs what happens. Set `RUST_LOG=debug` for per-event detail.
//!
//! Usage: `bugscape [game_data.json] [config.json]`

use std::fs;

use env_logger::Env;

use bugscape::input::{FrameInput, InputState, KeyCode, default_bindings};
use bugscape::render::SpriteKind;
use bugscape::{GameConfig, GameData, GameError, Result, SceneDirector};

const DT: f32 = 1.0 / 60.0;

// ── Script ───────────────────────────────────────────────────────────────────

/// Keys held for a number of frames.
struct Beat {
    keys: &'static [KeyCode],
    frames: u32,
}

const SCRIPT: &[Beat] = &[
    Beat { keys: &[KeyCode::Enter], frames: 1 },
    Beat { keys: &[], frames: 30 },
    Beat { keys: &[KeyCode::ArrowRight], frames: 45 },
    Beat { keys: &[KeyCode::KeyE], frames: 1 },
    Beat { keys: &[], frames: 1 },
    Beat { keys: &[KeyCode::KeyE], frames: 1 },
    Beat { keys: &[], frames: 1 },
    Beat { keys: &[KeyCode::KeyE], frames: 1 },
    Beat { keys: &[], frames: 1 },
    Beat { keys: &[KeyCode::KeyE], frames: 1 },
    Beat { keys: &[], frames: 1 },
    Beat { keys: &[KeyCode::KeyE], frames: 1 },
    Beat { keys: &[KeyCode::ArrowRight, KeyCode::Space], frames: 1 },
    Beat { keys: &[KeyCode::ArrowRight], frames: 180 },
    Beat { keys: &[KeyCode::KeyZ], frames: 20 },
    Beat { keys: &[KeyCode::Escape], frames: 1 },
    Beat { keys: &[], frames: 10 },
    Beat { keys: &[KeyCode::Escape], frames: 1 },
    Beat { keys: &[KeyCode::PageDown], frames: 1 },
    Beat { keys: &[], frames: 120 },
];

// ── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let data = match args.next() {
        Some(path) => GameData::from_json(&read(&path)?)?,
        None => GameData::builtin()?,
    };
    let config = match args.next() {
        Some(path) => GameConfig::from_json(&read(&path)?)?,
        None => GameConfig::default(),
    };

    let mut director = SceneDirector::new(data, config)?;
    let bindings = default_bindings();
    let mut input = InputState::new();
    let mut frame = 0u32;

    for beat in SCRIPT {
        for _ in 0..beat.frames {
            for key in input.keys_held.clone() {
                if !beat.keys.contains(&key) {
                    input.release_key(key);
                }
            }
            for key in beat.keys {
                input.press_key(*key);
            }
            director.step(&FrameInput::from_state(&bindings, &input), DT)?;
            input.clear_frame_state();
            frame += 1;
        }
        report(&director, frame);
    }
    Ok(())
}

fn read(path: &str) -> Result<String> {
    fs::read_to_string(path).map_err(|e| GameError::Io { path: path.to_string(), source: e })
}

fn report(director: &SceneDirector, frame: u32) {
    let list = director.draw_list();
    let player = director.player();
    log::info!(
        "frame {frame:>4} {:?} scene={} pos=({:.0}, {:.0}) hp={}/{} enemies={} projectiles={}",
        list.mode,
        director.scene_id().unwrap_or("-"),
        player.body.rect.x,
        player.body.rect.y,
        list.hud.health,
        list.hud.max_health,
        list.count(SpriteKind::Enemy),
        list.count(SpriteKind::Projectile),
    );
    if let Some(d) = &list.dialogue {
        log::info!("  {}: \"{}\" ({}/{})", d.speaker, d.line, d.line_index + 1, d.line_count);
    }
    if let Some(c) = &list.choice {
        log::info!("  {} {:?} > {}", c.prompt, c.options, c.highlighted);
    }
}
