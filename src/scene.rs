//! Scene definitions and the catalog they live in, plus the rebuild that turns
//! a definition into live terrain, NPCs and enemies.
//!
//! Definitions are immutable. Loading a scene always builds a fresh
//! [`SceneInstance`]; nothing is carried over from the previous one except what
//! the director keeps explicitly (player, flags, defeated enemies).

use std::collections::HashMap;

use glam::Vec2;
use rand::RngCore;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::animation::{AnimationDef, FrameId};
use crate::collision::Terrain;
use crate::config::GameConfig;
use crate::entity::npc::DialogueScript;
use crate::entity::{Enemy, HopShooter, Npc, ProjectileQueue};
use crate::error::Result;
use crate::geometry::Rect;
use crate::story::{DefeatedEnemies, StoryFlags};

// ── Catalog ──────────────────────────────────────────────────────────────────

/// Everything the runtime needs that is not tuning: scenes, dialogue scripts,
/// image handles and animations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameData {
    pub start_scene: String,
    /// Flags present at the start of every playthrough.
    #[serde(default)]
    pub initial_flags: StoryFlags,
    #[serde(default)]
    pub images: HashMap<String, FrameId>,
    #[serde(default)]
    pub animations: HashMap<String, AnimationDef>,
    /// NPC name → dialogue script.
    #[serde(default)]
    pub dialogue: HashMap<String, DialogueScript>,
    #[serde(default)]
    pub scenes: Vec<SceneDef>,
}

impl GameData {
    /// Parse and validate a catalog.
    pub fn from_json(json: &str) -> Result<Self> {
        let data: GameData = serde_json::from_str(json)?;
        for (key, def) in &data.animations {
            def.validate(key)?;
        }
        Ok(data)
    }

    /// The catalog embedded in the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(crate::DEFAULT_GAME_DATA)
    }

    pub fn scene(&self, id: &str) -> Option<&SceneDef> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn scene_index(&self, id: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.id == id)
    }

    pub fn image(&self, key: &str) -> Option<FrameId> {
        self.images.get(key).copied()
    }
}

// ── Definitions ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDef {
    pub id: String,
    #[serde(default)]
    pub background_key: String,
    #[serde(default = "default_world_size")]
    pub world_size: Vec2,
    pub player_start: Vec2,
    #[serde(default)]
    pub terrain: Vec<TerrainDef>,
    #[serde(default)]
    pub npcs: Vec<NpcDef>,
    #[serde(default)]
    pub enemies: Vec<EnemyDef>,
    #[serde(default)]
    pub transitions: Vec<TransitionRule>,
}

fn default_world_size() -> Vec2 {
    Vec2::new(1200.0, 600.0)
}

impl SceneDef {
    /// Id an enemy is tracked under: its explicit id, or `"<scene>#<index>"`.
    pub fn enemy_id(&self, index: usize) -> String {
        match self.enemies.get(index).and_then(|e| e.id.clone()) {
            Some(id) => id,
            None => format!("{}#{index}", self.id),
        }
    }

    pub fn npc(&self, name: &str) -> Option<&NpcDef> {
        self.npcs.iter().find(|n| n.name == name)
    }
}

/// `[x, y, w, h, image_key, is_wall]` in data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32, f32, f32, String, bool)", into = "(f32, f32, f32, f32, String, bool)")]
pub struct TerrainDef {
    pub rect: Rect,
    pub image_key: String,
    pub is_wall: bool,
}

impl From<(f32, f32, f32, f32, String, bool)> for TerrainDef {
    fn from((x, y, w, h, image_key, is_wall): (f32, f32, f32, f32, String, bool)) -> Self {
        Self { rect: Rect::new(x, y, w, h), image_key, is_wall }
    }
}

impl From<TerrainDef> for (f32, f32, f32, f32, String, bool) {
    fn from(t: TerrainDef) -> Self {
        (t.rect.x, t.rect.y, t.rect.w, t.rect.h, t.image_key, t.is_wall)
    }
}

/// Autonomous behaviours an NPC definition can opt into.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    HopShooter,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NpcDef {
    pub name: String,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_npc_width")]
    pub width: f32,
    #[serde(default = "default_npc_height")]
    pub height: f32,
    pub image_key: String,
    /// Only spawn while this flag is set.
    #[serde(default)]
    pub appears_if_flag_true: Option<String>,
    #[serde(default)]
    pub on_interaction_end: Option<InteractionEndRule>,
    #[serde(default)]
    pub behavior: Option<BehaviorKind>,
}

fn default_npc_width() -> f32 {
    50.0
}

fn default_npc_height() -> f32 {
    70.0
}

/// Scene-level reaction to finishing a conversation with an NPC.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionEndRule {
    #[serde(default)]
    pub set_story_flag: Option<String>,
    /// Only react when this was the sequence just finished.
    #[serde(default)]
    pub if_dialog_key_was: Option<String>,
    #[serde(default)]
    pub next_scene_if_flag_is_also_set: Option<SceneJump>,
}

impl InteractionEndRule {
    pub fn applies_to(&self, key: &str) -> bool {
        self.if_dialog_key_was.as_deref().is_none_or(|k| k == key)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneJump {
    /// Required flag; the jump is unconditional without one.
    #[serde(default)]
    pub flag: Option<String>,
    pub scene_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyDef {
    #[serde(default)]
    pub id: Option<String>,
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub width: Option<f32>,
    #[serde(default)]
    pub height: Option<f32>,
    #[serde(default)]
    pub attack_range: Option<f32>,
    #[serde(default)]
    pub damage: Option<u32>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    PlayerAtLocation,
    PlayerAtLocationAndFlag,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransitionRule {
    #[serde(rename = "type")]
    pub kind: TransitionKind,
    pub rect: Rect,
    #[serde(default)]
    pub required_story_flag: Option<String>,
    #[serde(default)]
    pub must_all_enemies_be_slain: bool,
    pub target_scene_id: String,
    /// Spawn override for the target scene.
    #[serde(default)]
    pub target_player_pos: Option<Vec2>,
}

impl TransitionRule {
    /// True when the player stands in the trigger and every gate passes.
    /// A named flag is always required, whatever the rule kind.
    pub fn fires(&self, player: &Rect, flags: &StoryFlags, enemies_alive: bool) -> bool {
        if !player.intersects(&self.rect) {
            return false;
        }
        if let Some(flag) = &self.required_story_flag {
            if !flags.get(flag) {
                return false;
            }
        }
        !(self.must_all_enemies_be_slain && enemies_alive)
    }
}

// ── Instances ────────────────────────────────────────────────────────────────

/// Live contents of the loaded scene.
#[derive(Debug)]
pub struct SceneInstance {
    pub id: String,
    /// Position in the catalog.
    pub index: usize,
    pub background: FrameId,
    pub world_size: Vec2,
    pub terrain: Vec<Terrain>,
    pub npcs: Vec<Npc>,
    pub enemies: Vec<Enemy>,
}

/// Shared state a scene rebuild reads from.
pub struct BuildContext<'a> {
    pub data: &'a GameData,
    pub config: &'a GameConfig,
    pub flags: &'a StoryFlags,
    pub defeated: &'a DefeatedEnemies,
    pub projectiles: &'a ProjectileQueue,
}

impl SceneInstance {
    /// Build live objects from `def`. Terrain with an unknown image and NPCs
    /// without a script or image are logged and skipped. Defeated enemies and
    /// flag-gated NPCs whose flag is unset are left out.
    pub fn build(def: &SceneDef, index: usize, ctx: &BuildContext<'_>, rng: &mut StdRng) -> Self {
        let data = ctx.data;
        let background = data.image(&def.background_key).unwrap_or_else(|| {
            log::debug!("scene '{}': background '{}' not found", def.id, def.background_key);
            FrameId::MISSING
        });

        let mut terrain = Vec::with_capacity(def.terrain.len());
        for t in &def.terrain {
            match data.image(&t.image_key) {
                Some(image) => terrain.push(Terrain::new(t.rect, t.is_wall, image)),
                None => log::warn!("scene '{}': terrain image '{}' not found, skipping", def.id, t.image_key),
            }
        }

        let mut npcs = Vec::new();
        for n in &def.npcs {
            if let Some(flag) = &n.appears_if_flag_true {
                if !ctx.flags.get(flag) {
                    continue;
                }
            }
            let (Some(script), Some(image)) = (data.dialogue.get(&n.name), data.image(&n.image_key)) else {
                log::warn!("scene '{}': missing dialogue or image for NPC '{}' (image '{}'), skipping", def.id, n.name, n.image_key);
                continue;
            };
            let rect = Rect::new(n.x, n.y, n.width, n.height);
            let mut npc = Npc::new(n.name.clone(), rect, script.clone(), image);
            if let Some(BehaviorKind::HopShooter) = n.behavior {
                let shooter = HopShooter::new(
                    &ctx.config.marksman,
                    rect.y,
                    Box::new(ctx.projectiles.clone()),
                    rng.next_u64(),
                    &data.animations,
                );
                npc = npc.with_behavior(shooter);
            }
            npcs.push(npc);
        }

        let mut enemies = Vec::new();
        for (i, e) in def.enemies.iter().enumerate() {
            let id = def.enemy_id(i);
            if ctx.defeated.contains(&id) {
                continue;
            }
            let cfg = &ctx.config.enemy;
            let rect = Rect::new(e.x, e.y, e.width.unwrap_or(cfg.size.x), e.height.unwrap_or(cfg.size.y));
            let enemy = Enemy::new(id, rect, cfg, &data.animations)
                .with_attack(e.attack_range.unwrap_or(cfg.attack_range), e.damage.unwrap_or(cfg.damage));
            enemies.push(enemy);
        }

        Self {
            id: def.id.clone(),
            index,
            background,
            world_size: def.world_size,
            terrain,
            npcs,
            enemies,
        }
    }
}
