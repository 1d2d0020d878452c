//! Tuning constants for the simulation.
//!
//! Every field has a default, so a config file only needs to name the values
//! it changes:
//!
//! ```json
//! { "player": { "jump_impulse": 1000.0 }, "seed": 7 }
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;

// ── Physics ──────────────────────────────────────────────────────────────────

/// Gravity and integration step settings shared by every falling entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in world units per second squared.
    pub gravity: f32,
    /// Terminal fall speed in world units per second.
    pub max_fall_speed: f32,
    /// Length of one physics sub-step in seconds.
    pub fixed_step: f32,
    /// Upper bound on sub-steps per frame; long frames are truncated.
    pub max_substeps: u32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 3600.0,
            max_fall_speed: 900.0,
            fixed_step: 1.0 / 60.0,
            max_substeps: 8,
        }
    }
}

impl PhysicsConfig {
    /// Equal sub-step lengths summing to `dt`. Each is at most `fixed_step`
    /// unless the frame needs more than `max_substeps` of them, in which case
    /// the steps stretch so the whole frame is still simulated.
    pub fn substeps(&self, dt: f32) -> impl Iterator<Item = f32> {
        let step = if self.fixed_step > 0.0 { self.fixed_step } else { dt };
        let n = if dt > 0.0 && step > 0.0 {
            ((dt / step).ceil() as u32).clamp(1, self.max_substeps.max(1))
        } else {
            0
        };
        let each = if n > 0 { dt / n as f32 } else { 0.0 };
        std::iter::repeat_n(each, n as usize)
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub size: Vec2,
    pub max_health: u32,
    /// Horizontal speed in world units per second.
    pub speed: f32,
    /// Upward launch speed of a jump.
    pub jump_impulse: f32,
    /// Seconds between the start of one swing and the next.
    pub attack_cooldown: f32,
    /// Hitbox width measured from the player's centre toward its facing side.
    pub attack_reach: f32,
    pub attack_damage: u32,
    /// Attack animation frame on which the hitbox is live.
    pub strike_frame: usize,
    /// Seconds without damage before regeneration starts.
    pub regen_delay: f32,
    /// Seconds per regenerated health point.
    pub regen_interval: f32,
    pub interaction_radius: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(40.0, 50.0),
            max_health: 3,
            speed: 300.0,
            jump_impulse: 900.0,
            attack_cooldown: 0.5,
            attack_reach: 40.0,
            attack_damage: 1,
            strike_frame: 1,
            regen_delay: 10.0,
            regen_interval: 1.0,
            interaction_radius: 60.0,
        }
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Size used when an enemy definition gives none.
    pub size: Vec2,
    pub max_health: u32,
    pub speed: f32,
    /// Distance either side of the spawn x the enemy paces.
    pub patrol_distance: f32,
    pub attack_range: f32,
    pub damage: u32,
    pub attack_cooldown: f32,
    /// Extra width added to the enemy's own width for its attack hitbox.
    pub hitbox_extra_width: f32,
    pub strike_frame: usize,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            size: Vec2::new(60.0, 60.0),
            max_health: 3,
            speed: 80.0,
            patrol_distance: 100.0,
            attack_range: 50.0,
            damage: 1,
            attack_cooldown: 2.0,
            hitbox_extra_width: 20.0,
            strike_frame: 1,
        }
    }
}

// ── Marksman ─────────────────────────────────────────────────────────────────

/// The NPC that hops in place and shoots at the player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarksmanConfig {
    pub hop_interval_min: f32,
    pub hop_interval_max: f32,
    pub hop_duration: f32,
    pub hop_height: f32,
    pub fire_range: f32,
    pub fire_cooldown: f32,
    pub projectile_speed: f32,
    pub projectile_size: f32,
    pub projectile_damage: u32,
    pub projectile_lifetime: f32,
}

impl Default for MarksmanConfig {
    fn default() -> Self {
        Self {
            hop_interval_min: 2.0,
            hop_interval_max: 4.0,
            hop_duration: 0.6,
            hop_height: 60.0,
            fire_range: 450.0,
            fire_cooldown: 1.5,
            projectile_speed: 280.0,
            projectile_size: 12.0,
            projectile_damage: 1,
            projectile_lifetime: 5.0,
        }
    }
}

// ── Camera ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Viewport size in screen pixels.
    pub viewport: Vec2,
    pub zoom: f32,
    /// Peak shake displacement when the player is hurt.
    pub hurt_shake: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { viewport: Vec2::new(1200.0, 600.0), zoom: 1.0, hurt_shake: 6.0 }
    }
}

// ── GameConfig ───────────────────────────────────────────────────────────────

/// All tuning for one playthrough.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
    pub marksman: MarksmanConfig,
    pub camera: CameraConfig,
    /// Seed for behaviour randomness. Equal seeds give identical runs.
    pub seed: u64,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_physics(mut self, physics: PhysicsConfig) -> Self {
        self.physics = physics;
        self
    }

    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.camera.viewport = Vec2::new(width, height);
        self
    }
}
