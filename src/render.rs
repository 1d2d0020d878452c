//! Per-frame snapshot for an external renderer. Nothing here draws; it only
//! describes what is visible and where.

use glam::Vec2;

use crate::animation::FrameId;
use crate::director::SessionMode;
use crate::geometry::{Facing, Rect};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Terrain,
    Npc,
    Enemy,
    Projectile,
    Player,
}

/// One image to place in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub rect: Rect,
    /// Renderers mirror sprites facing left.
    pub facing: Facing,
    pub frame: FrameId,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Hud {
    pub health: u32,
    pub max_health: u32,
    pub currency: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DialogueView {
    pub speaker: String,
    pub line: String,
    pub line_index: usize,
    pub line_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChoiceView {
    pub prompt: String,
    pub options: Vec<String>,
    pub highlighted: usize,
}

/// Everything needed to draw one frame, back to front in `sprites`.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawList {
    pub mode: SessionMode,
    pub background: FrameId,
    /// Visible world rectangle.
    pub view: Rect,
    pub zoom: f32,
    /// Screen-shake displacement to add to the view origin.
    pub shake: Vec2,
    pub sprites: Vec<Sprite>,
    pub hud: Hud,
    pub dialogue: Option<DialogueView>,
    pub choice: Option<ChoiceView>,
    /// World point above the NPC the player can talk to, if any.
    pub interact_prompt: Option<Vec2>,
}

impl DrawList {
    /// Empty list for when no scene is loaded (the menu).
    pub fn empty(mode: SessionMode, view: Rect, zoom: f32) -> Self {
        Self {
            mode,
            background: FrameId::MISSING,
            view,
            zoom,
            shake: Vec2::ZERO,
            sprites: Vec::new(),
            hud: Hud::default(),
            dialogue: None,
            choice: None,
            interact_prompt: None,
        }
    }

    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.iter().filter(|s| s.kind == kind).count()
    }
}
