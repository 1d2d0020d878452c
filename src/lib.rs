pub mod animation;
pub mod camera;
pub mod collision;
pub mod config;
pub mod dialogue;
pub mod director;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod input;
pub mod render;
pub mod scene;
pub mod story;

pub use config::GameConfig;
pub use director::{SceneDirector, SessionMode};
pub use error::{GameError, Result};
pub use scene::GameData;

/// Built-in game data: five scenes, six NPC scripts and their animations.
pub const DEFAULT_GAME_DATA: &str = include_str!("../resources/game_data.json");
