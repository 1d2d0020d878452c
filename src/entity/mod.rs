//! Entities and the components they are built from.
//!
//! Every entity kind is a plain struct composed of the shared pieces below
//! ([`Body`], [`Motion`], [`Health`]) plus its own state machine. Lists of
//! entities are owned by the scene director and updated in a fixed order each
//! frame.

pub mod behavior;
pub mod enemy;
pub mod npc;
pub mod player;
pub mod projectile;

use glam::Vec2;

use crate::collision::{Terrain, VerticalContact, resolve_vertical};
use crate::config::PhysicsConfig;
use crate::geometry::Rect;

pub use behavior::HopShooter;
pub use enemy::{Enemy, EnemyPose, EnemyState};
pub use npc::{Effect, Interaction, InteractionOutcome, Npc, Persona};
pub use player::{Player, PlayerIntent, PlayerPose};
pub use projectile::{Projectile, ProjectileQueue, ProjectileSink};

// ── Components ───────────────────────────────────────────────────────────────

/// Bounding box and liveness.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    pub rect: Rect,
    pub alive: bool,
}

impl Body {
    pub fn new(rect: Rect) -> Self {
        Self { rect, alive: true }
    }
}

/// Velocity and ground contact for entities affected by gravity.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Motion {
    /// `x` is the horizontal speed applied this frame, `y` the vertical
    /// velocity carried between frames (positive is downward).
    pub velocity: Vec2,
    pub grounded: bool,
}

impl Motion {
    pub fn stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.grounded = false;
    }
}

/// Hit points clamped to `[0, max]`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Subtract `amount`, saturating at zero. Returns true if this emptied it.
    pub fn damage(&mut self, amount: u32) -> bool {
        let was_empty = self.is_empty();
        self.current = self.current.saturating_sub(amount);
        !was_empty && self.is_empty()
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}

// ── Physics ──────────────────────────────────────────────────────────────────

/// Apply gravity over `dt` in fixed sub-steps, resolving floors and ceilings
/// after each one. Updates `motion.grounded` from the final sub-step.
pub fn fall(body: &mut Body, motion: &mut Motion, physics: &PhysicsConfig, terrain: &[Terrain], dt: f32) -> VerticalContact {
    let mut last = VerticalContact::default();
    for step in physics.substeps(dt) {
        motion.velocity.y = (motion.velocity.y + physics.gravity * step).min(physics.max_fall_speed);
        let prev = body.rect;
        body.rect.y += motion.velocity.y * step;
        last = resolve_vertical(&mut body.rect, &prev, &mut motion.velocity.y, terrain);
    }
    motion.grounded = last.grounded;
    last
}
