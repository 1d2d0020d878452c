//! Straight-flying projectiles and the queue NPC behaviours spawn them into.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;

use crate::animation::FrameId;
use crate::geometry::Rect;

use super::Body;

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub body: Body,
    pub velocity: Vec2,
    pub damage: u32,
    /// Seconds alive so far.
    pub age: f32,
    pub lifetime: f32,
    pub frame: FrameId,
}

impl Projectile {
    pub fn new(rect: Rect, velocity: Vec2, damage: u32, lifetime: f32, frame: FrameId) -> Self {
        Self { body: Body::new(rect), velocity, damage, age: 0.0, lifetime, frame }
    }

    /// Move, age, and test against the player. Returns the damage dealt.
    ///
    /// A projectile hits at most once: it dies on contact.
    pub fn update(&mut self, player: &Rect, dt: f32) -> u32 {
        if !self.body.alive {
            return 0;
        }
        self.body.rect.x += self.velocity.x * dt;
        self.body.rect.y += self.velocity.y * dt;
        self.age += dt;
        if self.age > self.lifetime {
            self.body.alive = false;
            return 0;
        }
        if self.body.rect.intersects(player) {
            self.body.alive = false;
            return self.damage;
        }
        0
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Capability handed to entities that create projectiles.
pub trait ProjectileSink {
    fn spawn(&self, projectile: Projectile);
}

/// Shared pending-projectile buffer.
///
/// Behaviours push into a clone of the queue during their update; the director
/// drains it into its live list before projectiles are stepped.
#[derive(Clone, Debug, Default)]
pub struct ProjectileQueue {
    pending: Rc<RefCell<Vec<Projectile>>>,
}

impl ProjectileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Projectile> {
        std::mem::take(&mut *self.pending.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.pending.borrow_mut().clear();
    }
}

impl ProjectileSink for ProjectileQueue {
    fn spawn(&self, projectile: Projectile) {
        self.pending.borrow_mut().push(projectile);
    }
}
